use async_trait::async_trait;
use derive_more::Display;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Invalid email address: {_0}")]
    InvalidAddress(String),

    #[display("Could not build email: {_0}")]
    Build(String),

    #[display("Could not send email: {_0}")]
    Transport(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}
