use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use time_clock::modules::attendance::core::columns::{
    CLEAN_LAST_COLUMN, CLEAN_SCHEMA, RAW_LOG_LAST_COLUMN, RAW_LOG_SCHEMA, SheetLayout,
    header_drift, validate_schema,
};
use time_clock::shared::core::clock::SystemClock;
use time_clock::shared::infrastructure::mailer::Mailer;
use time_clock::shared::infrastructure::mailer::smtp::SmtpMailer;
use time_clock::shared::infrastructure::sheets::SheetStore;
use time_clock::shared::infrastructure::sheets::google::GoogleSheetsClient;
use time_clock::shell::config::AppConfig;
use time_clock::shell::http::router;
use time_clock::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    validate_schema(&RAW_LOG_SCHEMA, RAW_LOG_LAST_COLUMN).context("raw log column mapping")?;
    validate_schema(&CLEAN_SCHEMA, CLEAN_LAST_COLUMN).context("clean table column mapping")?;

    let config = AppConfig::from_env().context("loading configuration")?;
    if config.admin_is_default {
        tracing::warn!("ADMIN_USER or ADMIN_PASSWORD not set, using the insecure default");
    }

    let store: Arc<dyn SheetStore> = Arc::new(
        GoogleSheetsClient::new(&config.spreadsheet_id, config.service_account.clone())
            .context("building the spreadsheet client")?,
    );

    let mailer: Option<Arc<dyn Mailer>> = match &config.smtp {
        Some(settings) => {
            let mailer = SmtpMailer::new(settings).context("building the SMTP transport")?;
            tracing::info!(host = %settings.host, port = settings.port, "report mailing enabled");
            Some(Arc::new(mailer))
        }
        None => {
            tracing::warn!("SMTP is not configured, monthly reports cannot be sent");
            None
        }
    };

    warn_on_header_drift(store.as_ref(), &config.layout).await;

    let state = AppState::new(
        store,
        mailer,
        config.layout.clone(),
        Arc::new(SystemClock),
        config.admin.clone(),
    );
    let app = router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, static_dir = %config.static_dir.display(), "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Compare the live raw header row to the expected names. Never fatal.
async fn warn_on_header_drift(store: &dyn SheetStore, layout: &SheetLayout) {
    match store.read(&layout.raw_header_range()).await {
        Ok(rows) => {
            let header = rows.into_iter().next().unwrap_or_default();
            for drift in header_drift(&RAW_LOG_SCHEMA, &header) {
                tracing::warn!(sheet = %layout.raw_sheet, "{drift}");
            }
        }
        Err(e) => tracing::warn!(error = %e, "could not read the raw log header row"),
    }
}
