use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use serde_json::Value;

use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::use_cases::record_check::command::RecordCheck;
use crate::shared::core::envelope::MessageEnvelope;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCheckBody {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_name: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<RecordCheckBody>, JsonRejection>,
) -> Result<Json<MessageEnvelope>, ApplicationError> {
    let Json(body) = body?;
    let command = RecordCheck::parse(
        body.kind.as_deref(),
        body.user_name.as_deref(),
        body.latitude,
        body.longitude,
    )?;
    state.record_check.handle(command).await?;
    Ok(Json(MessageEnvelope::ok("Check recorded")))
}
