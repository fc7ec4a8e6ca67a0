//! Log-backed senders
//!
//! Record outbound emails and notifications as structured log events. Every
//! send is also counted so callers can observe delivery.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use charisma_domain::error::Result;
use charisma_domain::ports::{EmailSender, NotificationSender};
use tracing::info;

/// [`EmailSender`] that writes each email to the log
#[derive(Debug, Default)]
pub struct LogEmailSender {
    sent: AtomicU64,
}

impl LogEmailSender {
    /// Create a sender
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emails sent so far
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_welcome_email(&self, to: &str, first_name: &str) -> Result<()> {
        info!(to = %to, first_name = %first_name, template = "welcome", "Email sent");
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// [`NotificationSender`] that writes each notification to the log
#[derive(Debug, Default)]
pub struct LogNotificationSender {
    sent: AtomicU64,
}

impl LogNotificationSender {
    /// Create a sender
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications sent so far
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    fn record(&self, user_id: &str, kind: &str) {
        info!(user_id = %user_id, kind = %kind, "Notification sent");
        self.sent.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send_welcome_notification(&self, user_id: &str) -> Result<()> {
        self.record(user_id, "welcome");
        Ok(())
    }

    async fn send_account_disabled_notification(&self, user_id: &str) -> Result<()> {
        self.record(user_id, "account_disabled");
        Ok(())
    }
}
