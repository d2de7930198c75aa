use axum::{
    Router, middleware,
    response::Html,
    routing::{get, post},
};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::modules::attendance::use_cases::dashboard::inbound::http as dashboard_http;
use crate::modules::attendance::use_cases::delete_log::inbound::http as delete_http;
use crate::modules::attendance::use_cases::list_logs::inbound::http as list_http;
use crate::modules::attendance::use_cases::record_check::inbound::http as check_http;
use crate::modules::attendance::use_cases::send_report::inbound::http as report_http;
use crate::modules::attendance::use_cases::update_log::inbound::http as update_http;
use crate::shell::auth::require_admin;
use crate::shell::state::AppState;

const ADMIN_PAGE: &str = include_str!("admin.html");

async fn admin_page() -> Html<&'static str> {
    Html(ADMIN_PAGE)
}

/// Every route behind basic auth.
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/api/dashboard", get(dashboard_http::handle))
        .route("/admin/api/logs", get(list_http::handle))
        .route("/admin/api/logs/update", post(update_http::handle))
        .route("/admin/api/logs/delete", post(delete_http::handle))
        .route("/admin/api/send-report", post(report_http::handle))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// JSON API plus admin page; anything else is looked up in `static_dir`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/check", post(check_http::handle))
        .merge(admin_routes(state.clone()))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
