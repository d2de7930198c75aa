use crate::modules::attendance::core::columns::{RAW_LOG_SCHEMA, RawColumn, SheetColumn, SheetLayout};
use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::use_cases::record_check::command::RecordCheck;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::sheets::{Row, SheetStore, ValueInputOption};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde_json::Value;
use std::sync::Arc;

/// The 8-cell raw log row for a check taken at `now`. Worked hours stay empty, the sheet computes them.
pub fn attendance_row(command: &RecordCheck, now: DateTime<Local>) -> Row {
    let mut row: Row = vec![Value::String(String::new()); RAW_LOG_SCHEMA.len()];
    let mut set = |column: RawColumn, value: Value| row[column.offset()] = value;

    set(
        RawColumn::Timestamp,
        Value::String(
            now.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    );
    set(RawColumn::Kind, Value::String(command.kind.to_string()));
    set(RawColumn::User, Value::String(command.user_name.clone()));
    set(RawColumn::Date, Value::String(now.format("%d/%m/%Y").to_string()));
    set(RawColumn::Time, Value::String(now.format("%H:%M:%S").to_string()));
    set(RawColumn::Latitude, command.latitude.clone());
    set(RawColumn::Longitude, command.longitude.clone());
    row
}

pub struct RecordCheckHandler {
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
    clock: Arc<dyn Clock>,
}

impl RecordCheckHandler {
    pub fn new(store: Arc<dyn SheetStore>, layout: SheetLayout, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            layout,
            clock,
        }
    }

    pub async fn handle(&self, command: RecordCheck) -> Result<(), ApplicationError> {
        let row = attendance_row(&command, self.clock.now());
        self.store
            .append(
                &self.layout.raw_append_range(),
                vec![row],
                ValueInputOption::UserEntered,
            )
            .await?;
        tracing::info!(user = %command.user_name, kind = %command.kind, "check recorded");
        Ok(())
    }
}
