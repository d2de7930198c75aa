use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use serde_json::Value;

use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::use_cases::send_report::command::SendReport;
use crate::shared::core::envelope::MessageEnvelope;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SendReportBody {
    pub year: Option<Value>,
    pub month: Option<Value>,
    pub to: Option<String>,
}

/// The admin page may send the period as numbers or as strings.
fn period_text(raw: Option<Value>) -> Result<Option<String>, ApplicationError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(ApplicationError::invalid(format!("Invalid period: {other}"))),
    }
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<SendReportBody>, JsonRejection>,
) -> Result<Json<MessageEnvelope>, ApplicationError> {
    let Json(body) = body?;
    let command = SendReport::parse(
        period_text(body.year)?,
        period_text(body.month)?,
        body.to,
        state.clock.now().date_naive(),
    )?;
    let to = command.to.clone();
    state.send_report.handle(command).await?;
    Ok(Json(MessageEnvelope::ok(format!("Report sent to {to}"))))
}
