use crate::modules::attendance::core::columns::{CleanColumn, SheetLayout, cell};
use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::use_cases::send_report::command::SendReport;
use crate::modules::attendance::use_cases::send_report::pdf::{ReportError, render_report};
use crate::shared::infrastructure::mailer::{MailAttachment, Mailer, OutgoingMail};
use crate::shared::infrastructure::sheets::SheetStore;
use std::sync::Arc;

pub const NO_DATA_LINE: &str = "No data for this period.";

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Report lines for the cleaned rows of `year`/`month`, in sheet order.
pub fn report_lines(rows: &[Vec<String>], year: &str, month: &str) -> Vec<String> {
    rows.iter()
        .filter(|row| cell(row, CleanColumn::Year) == year && cell(row, CleanColumn::Month) == month)
        .map(|row| {
            format!(
                "{} – {}: {} → {} ({})",
                or_dash(cell(row, CleanColumn::Date)),
                or_dash(cell(row, CleanColumn::User)),
                or_dash(cell(row, CleanColumn::TimeIn)),
                or_dash(cell(row, CleanColumn::TimeOut)),
                or_dash(cell(row, CleanColumn::WorkedHours)),
            )
        })
        .collect()
}

pub struct SendReportHandler {
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
    mailer: Option<Arc<dyn Mailer>>,
}

impl SendReportHandler {
    pub fn new(
        store: Arc<dyn SheetStore>,
        layout: SheetLayout,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            store,
            layout,
            mailer,
        }
    }

    pub async fn handle(&self, command: SendReport) -> Result<(), ApplicationError> {
        let mailer = self
            .mailer
            .as_ref()
            .ok_or(ApplicationError::MailerUnavailable)?;

        let rows = self.store.read(&self.layout.clean_data_range()).await?;
        let mut lines = report_lines(&rows, &command.year, &command.month);
        let entries = lines.len();
        if lines.is_empty() {
            lines.push(NO_DATA_LINE.to_string());
        }

        let title = command.title();
        let pdf = {
            let title = title.clone();
            tokio::task::spawn_blocking(move || render_report(&title, &lines))
                .await
                .map_err(|e| ReportError::Render(e.to_string()))?
        };

        mailer
            .send(OutgoingMail {
                to: command.to.clone(),
                subject: title,
                body: format!(
                    "Please find attached the attendance report for {}/{}.",
                    command.month, command.year
                ),
                attachment: Some(MailAttachment {
                    filename: command.attachment_name(),
                    content_type: "application/pdf".into(),
                    bytes: pdf,
                }),
            })
            .await?;

        tracing::info!(
            to = %command.to,
            year = %command.year,
            month = %command.month,
            entries,
            "attendance report sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod send_report_handler_tests {
    use super::*;
    use crate::shared::infrastructure::mailer::in_memory::InMemoryMailer;
    use crate::shared::infrastructure::sheets::in_memory::{InMemorySheetStore, SheetCall};
    use crate::tests::fixtures::{clean_store, layout};
    use rstest::{fixture, rstest};

    #[fixture]
    fn command() -> SendReport {
        SendReport {
            year: "2025".into(),
            month: "1".into(),
            to: "boss@example.com".into(),
        }
    }

    fn seeded() -> InMemorySheetStore {
        clean_store(vec![
            vec!["Alice", "10/01/2025", "2025", "1", "08:00", "17:00", "9"],
            vec!["Bob", "11/01/2025", "2025", "1", "09:00"],
            vec!["Alice", "03/02/2025", "2025", "2", "08:00", "16:00", "8"],
            vec!["Carol", "10/01/2024", "2024", "1", "08:00", "12:00", "4"],
        ])
    }

    #[rstest]
    fn it_should_format_matching_rows_with_dashes_for_gaps() {
        let rows = vec![
            vec!["Alice", "10/01/2025", "2025", "1", "08:00", "17:00", "9"],
            vec!["Bob", "11/01/2025", "2025", "1", "09:00"],
            vec!["Carol", "10/01/2024", "2024", "1", "08:00", "12:00", "4"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(str::to_string).collect())
        .collect::<Vec<Vec<String>>>();

        assert_eq!(
            report_lines(&rows, "2025", "1"),
            vec![
                "10/01/2025 – Alice: 08:00 → 17:00 (9)".to_string(),
                "11/01/2025 – Bob: 09:00 → - (-)".to_string(),
            ]
        );
    }

    #[rstest]
    fn it_should_match_the_period_as_exact_text() {
        let rows = vec![vec![
            "Alice".to_string(),
            "10/01/2025".to_string(),
            "2025".to_string(),
            "01".to_string(),
        ]];
        assert!(report_lines(&rows, "2025", "1").is_empty());
        assert_eq!(report_lines(&rows, "2025", "01").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_mail_the_pdf_to_the_recipient(command: SendReport) {
        let store = Arc::new(seeded());
        let mailer = Arc::new(InMemoryMailer::new());
        let handler = SendReportHandler::new(store.clone(), layout(), Some(mailer.clone()));

        handler.handle(command).await.expect("handle failed");

        assert_eq!(
            store.calls().await,
            vec![SheetCall::Read {
                range: layout().clean_data_range()
            }]
        );
        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "boss@example.com");
        assert_eq!(sent[0].subject, "Attendance report 1/2025");
        let attachment = sent[0].attachment.as_ref().expect("no attachment");
        assert_eq!(attachment.filename, "attendance-2025-1.pdf");
        assert_eq!(attachment.content_type, "application/pdf");
        assert!(attachment.bytes.starts_with(b"%PDF-"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_still_send_a_report_for_an_empty_month(mut command: SendReport) {
        command.month = "7".into();
        let mailer = Arc::new(InMemoryMailer::new());
        let handler = SendReportHandler::new(Arc::new(seeded()), layout(), Some(mailer.clone()));

        handler.handle(command).await.expect("handle failed");

        assert_eq!(mailer.sent().await.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_without_a_mailer_and_not_touch_the_store(command: SendReport) {
        let store = Arc::new(seeded());
        let handler = SendReportHandler::new(store.clone(), layout(), None);

        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::MailerUnavailable)
        ));
        assert!(store.calls().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_relay_is_offline(command: SendReport) {
        let mut mailer = InMemoryMailer::new();
        mailer.toggle_offline();
        let handler =
            SendReportHandler::new(Arc::new(seeded()), layout(), Some(Arc::new(mailer)));

        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::Mail(_))
        ));
    }
}
