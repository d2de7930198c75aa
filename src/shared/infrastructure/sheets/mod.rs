// Port to the remote spreadsheet store.
//
// Purpose
// - Describe the range based read, append, update and clear calls the use cases need.
//
// Boundaries
// - No network code here. `google` talks to the Sheets REST API, `in_memory` emulates a grid for tests.

pub mod google;
pub mod in_memory;
pub mod service_account;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("sheets api returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for SheetError {
    fn from(err: reqwest::Error) -> Self {
        SheetError::Transport(err.to_string())
    }
}

/// How the store interprets written values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Values are parsed as if typed by a user, so "48.85" becomes a number.
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// Zero-based column offset to spreadsheet letters: 0 -> "A", 25 -> "Z", 26 -> "AA".
pub fn column_letter(offset: usize) -> String {
    let mut n = offset + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A rectangular A1 range on one sheet. Rows are 1-based; an absent end row means "to the last row".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub first_column: usize,
    pub last_column: usize,
    pub first_row: Option<u32>,
    pub last_row: Option<u32>,
}

impl A1Range {
    /// Whole columns, e.g. `Sheet!A:H`.
    pub fn columns(sheet: impl Into<String>, first_column: usize, last_column: usize) -> Self {
        Self {
            sheet: sheet.into(),
            first_column,
            last_column,
            first_row: None,
            last_row: None,
        }
    }

    /// From `first_row` down to the end of the sheet, e.g. `Sheet!A2:K`.
    pub fn from_row(
        sheet: impl Into<String>,
        first_column: usize,
        last_column: usize,
        first_row: u32,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            first_column,
            last_column,
            first_row: Some(first_row),
            last_row: None,
        }
    }

    /// A single row slice, e.g. `Sheet!A5:E5`.
    pub fn row(sheet: impl Into<String>, first_column: usize, last_column: usize, row: u32) -> Self {
        Self {
            sheet: sheet.into(),
            first_column,
            last_column,
            first_row: Some(row),
            last_row: Some(row),
        }
    }
}

/// Only plain identifiers may go bare in A1 notation. Anything else, including a name
/// that starts with a digit or reads like a cell reference (`AB12`), is quoted.
fn needs_quoting(sheet: &str) -> bool {
    let plain = sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let starts_with_digit = sheet.chars().next().is_none_or(|c| c.is_ascii_digit());
    let letters = sheet.trim_end_matches(|c: char| c.is_ascii_digit());
    let cell_like = letters.len() < sheet.len()
        && !letters.is_empty()
        && letters.chars().all(|c| c.is_ascii_alphabetic());
    !plain || starts_with_digit || cell_like
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sheet = if needs_quoting(&self.sheet) {
            format!("'{}'", self.sheet.replace('\'', "''"))
        } else {
            self.sheet.clone()
        };
        let first_row = self.first_row.map(|r| r.to_string()).unwrap_or_default();
        let last_row = self.last_row.map(|r| r.to_string()).unwrap_or_default();
        write!(
            f,
            "{sheet}!{}{first_row}:{}{last_row}",
            column_letter(self.first_column),
            column_letter(self.last_column),
        )
    }
}

/// Cells are JSON values so numbers (coordinates) reach the store untouched.
pub type Row = Vec<Value>;

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Append rows after the last non-empty row of the table covered by `range`.
    async fn append(
        &self,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<(), SheetError>;

    /// Formatted cell values, one vector per row starting at the range's first row.
    /// Trailing empty rows and trailing empty cells are omitted, as the Sheets API does.
    async fn read(&self, range: &A1Range) -> Result<Vec<Vec<String>>, SheetError>;

    /// Overwrite the cells of `range`.
    async fn update(
        &self,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<(), SheetError>;

    /// Remove cell contents without shifting any row.
    async fn clear(&self, range: &A1Range) -> Result<(), SheetError>;
}

/// Render a written JSON cell the way the store would display it.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
