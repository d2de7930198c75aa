use crate::modules::attendance::core::check_kind::CheckKind;
use crate::modules::attendance::core::coordinates::coordinate_cell;
use crate::modules::attendance::core::errors::ApplicationError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordCheck {
    pub kind: CheckKind,
    pub user_name: String,
    pub latitude: Value,
    pub longitude: Value,
}

impl RecordCheck {
    pub fn parse(
        kind: Option<&str>,
        user_name: Option<&str>,
        latitude: Option<Value>,
        longitude: Option<Value>,
    ) -> Result<Self, ApplicationError> {
        let kind = kind
            .and_then(|k| k.parse::<CheckKind>().ok())
            .ok_or_else(|| ApplicationError::invalid("Invalid type"))?;

        let user_name = user_name.map(str::trim).unwrap_or("");
        if user_name.is_empty() {
            return Err(ApplicationError::invalid("User name is required"));
        }

        Ok(Self {
            kind,
            user_name: user_name.to_string(),
            latitude: coordinate_cell(latitude)?,
            longitude: coordinate_cell(longitude)?,
        })
    }
}
