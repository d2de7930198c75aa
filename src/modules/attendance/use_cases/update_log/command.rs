use crate::modules::attendance::core::coordinates::coordinate_cell;
use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::core::row_index::{RowIndexInput, parse_row_index};
use crate::modules::attendance::core::time_format::{
    compose_timestamp, normalize_time, parse_sheet_date,
};
use serde_json::Value;

/// Validated edit of one raw log row.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateLog {
    pub row_index: u32,
    pub timestamp: String,
    pub kind: String,
    pub user: String,
    pub date: String,
    pub time: String,
    pub latitude: Value,
    pub longitude: Value,
}

#[derive(Debug, Default, Clone)]
pub struct UpdateLogInput {
    pub row_index: Option<RowIndexInput>,
    pub date: Option<String>,
    pub kind: Option<String>,
    pub user: Option<String>,
    pub time: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

fn text(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or("").to_string()
}

impl UpdateLog {
    pub fn parse(input: UpdateLogInput) -> Result<Self, ApplicationError> {
        let row_index = parse_row_index(input.row_index.as_ref())?;

        let date = text(input.date.as_deref());
        if !date.is_empty() && parse_sheet_date(&date).is_none() {
            return Err(ApplicationError::invalid(format!("Invalid date: {date}")));
        }

        let raw_time = text(input.time.as_deref());
        let time = normalize_time(&raw_time);
        if !raw_time.is_empty() && time.is_empty() {
            return Err(ApplicationError::invalid(format!("Invalid time: {raw_time}")));
        }

        let timestamp = compose_timestamp(&date, &time)
            .map_err(|e| ApplicationError::invalid(e.to_string()))?;

        Ok(Self {
            row_index,
            timestamp,
            kind: text(input.kind.as_deref()),
            user: text(input.user.as_deref()),
            date,
            time,
            latitude: coordinate_cell(input.latitude)?,
            longitude: coordinate_cell(input.longitude)?,
        })
    }
}
