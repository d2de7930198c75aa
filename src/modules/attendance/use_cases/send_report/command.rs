use crate::modules::attendance::core::errors::ApplicationError;
use chrono::{Datelike, NaiveDate};

/// Which month to report on and who receives it.
/// Year and month stay strings: the cleaned table is matched on exact cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    pub year: String,
    pub month: String,
    pub to: String,
}

fn present(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl SendReport {
    pub fn parse(
        year: Option<String>,
        month: Option<String>,
        to: Option<String>,
        today: NaiveDate,
    ) -> Result<Self, ApplicationError> {
        let to = present(to).ok_or_else(|| ApplicationError::invalid("Recipient is required"))?;
        Ok(Self {
            year: present(year).unwrap_or_else(|| today.year().to_string()),
            month: present(month).unwrap_or_else(|| today.month().to_string()),
            to,
        })
    }

    pub fn title(&self) -> String {
        format!("Attendance report {}/{}", self.month, self.year)
    }

    pub fn attachment_name(&self) -> String {
        format!("attendance-{}-{}.pdf", self.year, self.month)
    }
}

#[cfg(test)]
mod send_report_command_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[rstest]
    fn it_should_default_to_the_current_month(today: NaiveDate) {
        let command = SendReport::parse(None, Some(" ".into()), Some("boss@example.com".into()), today)
            .unwrap();
        assert_eq!(command.year, "2025");
        assert_eq!(command.month, "3");
        assert_eq!(command.title(), "Attendance report 3/2025");
        assert_eq!(command.attachment_name(), "attendance-2025-3.pdf");
    }

    #[rstest]
    fn it_should_keep_the_requested_period_verbatim(today: NaiveDate) {
        let command = SendReport::parse(
            Some("2024".into()),
            Some(" 12 ".into()),
            Some(" boss@example.com ".into()),
            today,
        )
        .unwrap();
        assert_eq!(
            command,
            SendReport {
                year: "2024".into(),
                month: "12".into(),
                to: "boss@example.com".into(),
            }
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_string()))]
    fn it_should_require_a_recipient(today: NaiveDate, #[case] to: Option<String>) {
        assert!(matches!(
            SendReport::parse(None, None, to, today),
            Err(ApplicationError::InvalidInput(_))
        ));
    }
}
