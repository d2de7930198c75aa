use crate::modules::attendance::core::columns::{RawColumn, SheetLayout};
use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::use_cases::update_log::command::UpdateLog;
use crate::shared::infrastructure::sheets::{SheetStore, ValueInputOption};
use serde_json::Value;
use std::sync::Arc;

pub struct UpdateLogHandler {
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
}

impl UpdateLogHandler {
    pub fn new(store: Arc<dyn SheetStore>, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    /// Writes A..E then G..H. Worked hours (F) and the formula columns are left alone.
    /// The two writes are independent: if the second fails the first stays applied.
    pub async fn handle(&self, command: UpdateLog) -> Result<(), ApplicationError> {
        let row = command.row_index;

        self.store
            .update(
                &self
                    .layout
                    .raw_cells(row, RawColumn::Timestamp, RawColumn::Time),
                vec![vec![
                    Value::String(command.timestamp),
                    Value::String(command.kind),
                    Value::String(command.user),
                    Value::String(command.date),
                    Value::String(command.time),
                ]],
                ValueInputOption::UserEntered,
            )
            .await?;

        self.store
            .update(
                &self
                    .layout
                    .raw_cells(row, RawColumn::Latitude, RawColumn::Longitude),
                vec![vec![command.latitude, command.longitude]],
                ValueInputOption::UserEntered,
            )
            .await?;

        tracing::info!(row, "raw log row updated");
        Ok(())
    }
}
