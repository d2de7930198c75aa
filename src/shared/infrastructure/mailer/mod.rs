// Port to the outgoing mail relay.

pub mod in_memory;
pub mod smtp;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("cannot build message: {0}")]
    Message(String),

    #[error("relay error: {0}")]
    Relay(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<MailAttachment>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailerError>;
}
