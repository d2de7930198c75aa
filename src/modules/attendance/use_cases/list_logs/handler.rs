use crate::modules::attendance::core::columns::{FIRST_DATA_ROW, RawColumn, SheetLayout, cell};
use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::core::time_format::{normalize_time, parse_sheet_date};
use crate::modules::attendance::use_cases::list_logs::query::LogFilter;
use crate::shared::infrastructure::sheets::SheetStore;
use chrono::Datelike;
use serde::Serialize;
use std::sync::Arc;

/// One raw log row as the admin page sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    #[serde(rename = "rowIndex")]
    pub row_index: u32,
    pub horodatage: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub user: String,
    pub jour: String,
    pub heure: String,
    pub lat: String,
    pub lng: String,
}

/// Keep rows whose day parses and matches the filter. Row indexes are absolute, gaps included.
pub fn select_rows(rows: &[Vec<String>], filter: &LogFilter) -> Vec<LogRow> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let date = parse_sheet_date(cell(row, RawColumn::Date))?;
            if !filter.matches(date.year(), date.month()) {
                return None;
            }
            Some(LogRow {
                row_index: FIRST_DATA_ROW + i as u32,
                horodatage: cell(row, RawColumn::Timestamp).to_string(),
                kind: cell(row, RawColumn::Kind).to_string(),
                user: cell(row, RawColumn::User).to_string(),
                jour: cell(row, RawColumn::Date).to_string(),
                heure: normalize_time(cell(row, RawColumn::Time)),
                lat: cell(row, RawColumn::Latitude).to_string(),
                lng: cell(row, RawColumn::Longitude).to_string(),
            })
        })
        .collect()
}

pub struct ListLogsHandler {
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
}

impl ListLogsHandler {
    pub fn new(store: Arc<dyn SheetStore>, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    pub async fn handle(&self, filter: LogFilter) -> Result<Vec<LogRow>, ApplicationError> {
        let rows = self.store.read(&self.layout.raw_data_range()).await?;
        Ok(select_rows(&rows, &filter))
    }
}
