use crate::modules::attendance::use_cases::send_report::pdf::ReportError;
use crate::shared::core::envelope::MessageEnvelope;
use crate::shared::infrastructure::mailer::MailerError;
use crate::shared::infrastructure::sheets::SheetError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Sheets(#[from] SheetError),

    #[error(transparent)]
    Mail(#[from] MailerError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("mail relay is not configured")]
    MailerUnavailable,
}

impl ApplicationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ApplicationError::InvalidInput(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApplicationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApplicationError {
    fn from(rejection: JsonRejection) -> Self {
        ApplicationError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApplicationError {
    fn from(rejection: QueryRejection) -> Self {
        ApplicationError::InvalidInput(format!("Invalid query: {}", rejection.body_text()))
    }
}

/// Validation messages go back verbatim; backend failures are logged and answered generically.
impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApplicationError::InvalidInput(message) => message.clone(),
            ApplicationError::Sheets(e) => {
                tracing::error!(error = %e, "sheet store failure");
                "Server error while accessing the spreadsheet.".to_string()
            }
            ApplicationError::Mail(e) => {
                tracing::error!(error = %e, "mail relay failure");
                "Server error while sending the report.".to_string()
            }
            ApplicationError::Report(e) => {
                tracing::error!(error = %e, "report rendering failure");
                "Server error while generating the report.".to_string()
            }
            ApplicationError::MailerUnavailable => {
                tracing::error!("report requested but SMTP is not configured");
                "Server error while sending the report.".to_string()
            }
        };
        (self.status(), Json(MessageEnvelope::failure(message))).into_response()
    }
}
