use crate::modules::attendance::core::columns::SheetLayout;
use crate::modules::attendance::use_cases::dashboard::handler::DashboardHandler;
use crate::modules::attendance::use_cases::delete_log::handler::DeleteLogHandler;
use crate::modules::attendance::use_cases::list_logs::handler::ListLogsHandler;
use crate::modules::attendance::use_cases::record_check::handler::RecordCheckHandler;
use crate::modules::attendance::use_cases::send_report::handler::SendReportHandler;
use crate::modules::attendance::use_cases::update_log::handler::UpdateLogHandler;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::mailer::Mailer;
use crate::shared::infrastructure::sheets::SheetStore;
use crate::shell::auth::AdminCredentials;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub record_check: Arc<RecordCheckHandler>,
    pub list_logs: Arc<ListLogsHandler>,
    pub update_log: Arc<UpdateLogHandler>,
    pub delete_log: Arc<DeleteLogHandler>,
    pub send_report: Arc<SendReportHandler>,
    pub dashboard: Arc<DashboardHandler>,
    pub clock: Arc<dyn Clock>,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    /// Wire every handler onto the same store, layout and clock.
    pub fn new(
        store: Arc<dyn SheetStore>,
        mailer: Option<Arc<dyn Mailer>>,
        layout: SheetLayout,
        clock: Arc<dyn Clock>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            record_check: Arc::new(RecordCheckHandler::new(
                store.clone(),
                layout.clone(),
                clock.clone(),
            )),
            list_logs: Arc::new(ListLogsHandler::new(store.clone(), layout.clone())),
            update_log: Arc::new(UpdateLogHandler::new(store.clone(), layout.clone())),
            delete_log: Arc::new(DeleteLogHandler::new(store.clone(), layout.clone())),
            send_report: Arc::new(SendReportHandler::new(
                store.clone(),
                layout.clone(),
                mailer,
            )),
            dashboard: Arc::new(DashboardHandler::new(store, layout)),
            clock,
            admin: Arc::new(admin),
        }
    }
}
