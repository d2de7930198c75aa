// In memory Mailer that keeps every message instead of relaying it.

use crate::shared::infrastructure::mailer::{Mailer, MailerError, OutgoingMail};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    is_offline: bool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailerError> {
        if self.is_offline {
            return Err(MailerError::Relay("Mail relay offline".into()));
        }
        self.sent.lock().await.push(mail);
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_mailer_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn mail() -> OutgoingMail {
        OutgoingMail {
            to: "boss@example.com".into(),
            subject: "Attendance report 1/2025".into(),
            body: "See attachment.".into(),
            attachment: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_sent_mail(mail: OutgoingMail) {
        let mailer = InMemoryMailer::new();
        mailer.send(mail.clone()).await.expect("send failed");
        assert_eq!(mailer.sent().await, vec![mail]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_offline(mail: OutgoingMail) {
        let mut mailer = InMemoryMailer::new();
        mailer.toggle_offline();
        assert!(matches!(
            mailer.send(mail).await,
            Err(MailerError::Relay(_))
        ));
        assert!(mailer.sent().await.is_empty());
    }
}
