use crate::modules::attendance::core::errors::ApplicationError;
use serde_json::Value;

/// Latitude/longitude cell. Numbers pass through so the sheet keeps them numeric,
/// strings are trimmed, absent or null becomes an empty cell.
pub fn coordinate_cell(raw: Option<Value>) -> Result<Value, ApplicationError> {
    match raw {
        None | Some(Value::Null) => Ok(Value::String(String::new())),
        Some(Value::Number(n)) => Ok(Value::Number(n)),
        Some(Value::String(s)) => Ok(Value::String(s.trim().to_string())),
        Some(_) => Err(ApplicationError::invalid("Invalid coordinates")),
    }
}
