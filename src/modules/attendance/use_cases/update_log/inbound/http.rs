use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use serde_json::Value;

use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::core::row_index::RowIndexInput;
use crate::modules::attendance::use_cases::update_log::command::{UpdateLog, UpdateLogInput};
use crate::shared::core::envelope::MessageEnvelope;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogBody {
    pub row_index: Option<RowIndexInput>,
    pub jour: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user: Option<String>,
    pub heure: Option<String>,
    pub lat: Option<Value>,
    pub lng: Option<Value>,
}

impl From<UpdateLogBody> for UpdateLogInput {
    fn from(body: UpdateLogBody) -> Self {
        Self {
            row_index: body.row_index,
            date: body.jour,
            kind: body.kind,
            user: body.user,
            time: body.heure,
            latitude: body.lat,
            longitude: body.lng,
        }
    }
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<UpdateLogBody>, JsonRejection>,
) -> Result<Json<MessageEnvelope>, ApplicationError> {
    let Json(body) = body?;
    let command = UpdateLog::parse(body.into())?;
    state.update_log.handle(command).await?;
    Ok(Json(MessageEnvelope::ok("Row updated")))
}
