// SMTP implementation of the Mailer port (lettre, tokio transport).

use crate::shared::infrastructure::mailer::{Mailer, MailerError, OutgoingMail};
use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Port 465 speaks implicit TLS, every other port is upgraded with STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, MailerError> {
    raw.parse()
        .map_err(|e: AddressError| MailerError::Address(format!("{raw}: {e}")))
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailerError> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| MailerError::Relay(e.to_string()))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: parse_mailbox(&settings.from)?,
        })
    }

    fn build_message(&self, mail: OutgoingMail) -> Result<Message, MailerError> {
        let builder = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&mail.to)?)
            .subject(mail.subject);
        let text = SinglePart::plain(mail.body);

        let message = match mail.attachment {
            Some(attachment) => {
                let content_type = ContentType::parse(&attachment.content_type)
                    .map_err(|e| MailerError::Message(e.to_string()))?;
                builder.multipart(
                    MultiPart::mixed().singlepart(text).singlepart(
                        Attachment::new(attachment.filename).body(attachment.bytes, content_type),
                    ),
                )
            }
            None => builder.singlepart(text),
        };
        message.map_err(|e| MailerError::Message(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailerError> {
        let message = self.build_message(mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::Relay(e.to_string()))?;
        Ok(())
    }
}
