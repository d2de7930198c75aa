use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;

use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::core::row_index::{RowIndexInput, parse_row_index};
use crate::shared::core::envelope::MessageEnvelope;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLogBody {
    pub row_index: Option<RowIndexInput>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<DeleteLogBody>, JsonRejection>,
) -> Result<Json<MessageEnvelope>, ApplicationError> {
    let Json(body) = body?;
    let row_index = parse_row_index(body.row_index.as_ref())?;
    state.delete_log.handle(row_index).await?;
    Ok(Json(MessageEnvelope::ok("Row deleted")))
}
