use crate::modules::attendance::core::columns::SheetLayout;
use crate::modules::attendance::core::errors::ApplicationError;
use crate::shared::infrastructure::sheets::SheetStore;
use std::sync::Arc;

pub struct DeleteLogHandler {
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
}

impl DeleteLogHandler {
    pub fn new(store: Arc<dyn SheetStore>, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    /// Clears A..K of `row_index`. The row stays in place, so other indexes remain valid.
    pub async fn handle(&self, row_index: u32) -> Result<(), ApplicationError> {
        self.store
            .clear(&self.layout.raw_full_row(row_index))
            .await?;
        tracing::info!(row = row_index, "raw log row cleared");
        Ok(())
    }
}
