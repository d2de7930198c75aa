use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::use_cases::dashboard::handler::{Dashboard, parse_year};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct DashboardParams {
    pub year: Option<String>,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

pub async fn handle(
    State(state): State<AppState>,
    params: Result<Query<DashboardParams>, QueryRejection>,
) -> Result<Json<DashboardResponse>, ApplicationError> {
    let Query(params) = params?;
    let year = parse_year(params.year.as_deref(), state.clock.now().year())?;
    let dashboard = state.dashboard.handle(year).await?;
    Ok(Json(DashboardResponse {
        success: true,
        dashboard,
    }))
}
