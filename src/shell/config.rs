// Process configuration, read once at startup.
//
// Responsibilities
// - Pull every setting from the environment (a .env file is loaded beforehand by main).
// - Fail fast on missing or malformed required values.
// - Decide whether report mailing is enabled.

use crate::modules::attendance::core::columns::SheetLayout;
use crate::shared::infrastructure::mailer::smtp::SmtpSettings;
use crate::shared::infrastructure::sheets::service_account::ServiceAccountKey;
use crate::shell::auth::AdminCredentials;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_RAW_SHEET: &str = "Horodatage";
const DEFAULT_CLEAN_SHEET: &str = "Clean";
const DEFAULT_ADMIN: &str = "admin";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("GOOGLE_SERVICE_ACCOUNT_KEY is not a valid service account key: {0}")]
    ServiceAccountKey(#[source] serde_json::Error),

    #[error("{name} must be a port number, got {value:?}")]
    Port { name: &'static str, value: String },

    #[error("SMTP is partially configured, missing {0}")]
    PartialSmtp(String),
}

#[derive(Debug)]
pub struct AppConfig {
    pub service_account: ServiceAccountKey,
    pub spreadsheet_id: String,
    pub layout: SheetLayout,
    pub admin: AdminCredentials,
    /// True when either admin variable fell back to its default.
    pub admin_is_default: bool,
    pub smtp: Option<SmtpSettings>,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let service_account = ServiceAccountKey::from_json(&require("GOOGLE_SERVICE_ACCOUNT_KEY")?)
            .map_err(ConfigError::ServiceAccountKey)?;
        let spreadsheet_id = require("SPREADSHEET_ID")?;

        let layout = SheetLayout::new(
            get("RAW_SHEET_NAME").unwrap_or_else(|| DEFAULT_RAW_SHEET.to_string()),
            get("CLEAN_SHEET_NAME").unwrap_or_else(|| DEFAULT_CLEAN_SHEET.to_string()),
        );

        let admin_user = get("ADMIN_USER");
        let admin_password = get("ADMIN_PASSWORD");
        let admin_is_default = admin_user.is_none() || admin_password.is_none();
        let admin = AdminCredentials::new(
            admin_user.unwrap_or_else(|| DEFAULT_ADMIN.to_string()),
            admin_password.unwrap_or_else(|| DEFAULT_ADMIN.to_string()),
        );

        let port = parse_port("PORT", get("PORT"), DEFAULT_PORT)?;
        let smtp = smtp_settings(&get)?;

        Ok(Self {
            service_account,
            spreadsheet_id,
            layout,
            admin,
            admin_is_default,
            smtp,
            port,
            static_dir: PathBuf::from(
                get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
        })
    }
}

fn parse_port(name: &'static str, raw: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Port { name, value }),
    }
}

/// All of host, user, password and sender, or none of them.
fn smtp_settings(
    get: &impl Fn(&str) -> Option<String>,
) -> Result<Option<SmtpSettings>, ConfigError> {
    const GROUP: [&str; 4] = ["SMTP_HOST", "SMTP_USER", "SMTP_PASS", "SMTP_FROM"];
    let values: Vec<Option<String>> = GROUP.iter().map(|name| get(name)).collect();

    if values.iter().all(Option::is_none) {
        return Ok(None);
    }
    let missing: Vec<&str> = GROUP
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::PartialSmtp(missing.join(", ")));
    }

    let mut values = values.into_iter().flatten();
    let mut next = || values.next().unwrap_or_default();
    let (host, user, password, from) = (next(), next(), next(), next());
    Ok(Some(SmtpSettings {
        host,
        port: parse_port("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
        user,
        password,
        from,
    }))
}
