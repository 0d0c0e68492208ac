//! Outgoing mail port
//!
//! Services only see [`Mailer`]. [`LogMailer`] writes the message to the log
//! instead of delivering it; [`RecordingMailer`] keeps messages for tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

#[derive(Debug, thiserror::Error)]
#[error("Mail delivery failed: {0}")]
pub struct MailError(pub String);

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;

    async fn send_confirmation_code(&self, to: &str, code: &str) -> Result<(), MailError> {
        let body = format!(
            "Thank you for your registration. To finish it, follow the link: \
             /confirm-email?code={code}"
        );
        self.send(to, "Confirm your registration", &body).await
    }

    async fn send_password_recovery_code(&self, to: &str, code: &str) -> Result<(), MailError> {
        let body = format!(
            "To finish password recovery, follow the link: /password-recovery?recoveryCode={code}"
        );
        self.send(to, "Password recovery", &body).await
    }
}

/// Logs messages through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        info!(to, subject, body, "Outgoing mail");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl SentMail {
    /// Value of the `code=`/`recoveryCode=` query parameter in the body
    pub fn code(&self) -> Option<&str> {
        let (_, rest) = self.body.split_once("ode=")?;
        rest.split_whitespace().next()
    }
}

/// Keeps every message in memory; clones share the outbox
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    outbox: Arc<Mutex<Vec<SentMail>>>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.outbox.lock().clone()
    }

    /// Most recent message addressed to `to`
    pub fn last_to(&self, to: &str) -> Option<SentMail> {
        self.outbox.lock().iter().rev().find(|m| m.to == to).cloned()
    }

    /// Make every following send fail
    pub fn fail_deliveries(&self, failing: bool) {
        *self.failing.lock() = failing;
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if *self.failing.lock() {
            return Err(MailError(format!("refused delivery to {to}")));
        }
        self.outbox.lock().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
