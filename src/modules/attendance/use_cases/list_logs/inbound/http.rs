use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::use_cases::list_logs::handler::LogRow;
use crate::modules::attendance::use_cases::list_logs::query::LogFilter;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListLogsParams {
    pub year: Option<String>,
    pub month: Option<String>,
}

#[derive(Serialize)]
pub struct ListLogsResponse {
    pub success: bool,
    pub rows: Vec<LogRow>,
}

pub async fn handle(
    State(state): State<AppState>,
    params: Result<Query<ListLogsParams>, QueryRejection>,
) -> Result<Json<ListLogsResponse>, ApplicationError> {
    let Query(params) = params?;
    let filter = LogFilter::parse(params.year.as_deref(), params.month.as_deref())?;
    let rows = state.list_logs.handle(filter).await?;
    Ok(Json(ListLogsResponse {
        success: true,
        rows,
    }))
}
