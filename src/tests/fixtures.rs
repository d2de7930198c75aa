// Shared test fixtures: a fixed clock, seeded in-memory sheets and a wired AppState.

use crate::modules::attendance::core::columns::{CLEAN_SCHEMA, RAW_LOG_SCHEMA, SheetLayout};
use crate::shared::core::clock::{Clock, FixedClock};
use crate::shared::infrastructure::mailer::Mailer;
use crate::shared::infrastructure::mailer::in_memory::InMemoryMailer;
use crate::shared::infrastructure::sheets::in_memory::InMemorySheetStore;
use crate::shell::auth::AdminCredentials;
use crate::shell::state::AppState;
use axum::response::Response;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Local, TimeZone};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-password";

/// 2025-01-10 08:00:00 local time.
pub fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 1, 10, 8, 0, 0)
        .single()
        .expect("unambiguous local time")
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixed_now()))
}

pub fn layout() -> SheetLayout {
    SheetLayout::new("Horodatage", "Clean")
}

fn with_header<'a>(header: Vec<&'a str>, rows: Vec<Vec<&'a str>>) -> Vec<Vec<&'a str>> {
    std::iter::once(header).chain(rows).collect()
}

/// Raw log sheet: header row, then `rows` from row 2.
pub fn raw_store(rows: Vec<Vec<&str>>) -> InMemorySheetStore {
    let header = RAW_LOG_SCHEMA.iter().map(|(_, name)| *name).collect();
    InMemorySheetStore::new().with_sheet("Horodatage", with_header(header, rows))
}

/// Cleaned table: header row, then `rows` from row 2.
pub fn clean_store(rows: Vec<Vec<&str>>) -> InMemorySheetStore {
    let header = CLEAN_SCHEMA.iter().map(|(_, name)| *name).collect();
    InMemorySheetStore::new().with_sheet("Clean", with_header(header, rows))
}

pub fn admin_credentials() -> AdminCredentials {
    AdminCredentials::new(ADMIN_USER, ADMIN_PASSWORD)
}

pub fn basic_auth_header() -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{ADMIN_USER}:{ADMIN_PASSWORD}"))
    )
}

pub fn test_state(store: Arc<InMemorySheetStore>, mailer: Option<Arc<InMemoryMailer>>) -> AppState {
    AppState::new(
        store,
        mailer.map(|m| m as Arc<dyn Mailer>),
        layout(),
        fixed_clock(),
        admin_credentials(),
    )
}

pub async fn json_body(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not JSON")
}
