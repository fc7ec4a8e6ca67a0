//! Outbound Side-Effect Ports

use async_trait::async_trait;

use crate::error::Result;

/// Sends transactional emails
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send the welcome email to a new user
    async fn send_welcome_email(&self, to: &str, first_name: &str) -> Result<()>;
}

/// Sends in-app notifications
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Notify a new user that their account was created
    async fn send_welcome_notification(&self, user_id: &str) -> Result<()>;

    /// Notify a user that their account was disabled
    async fn send_account_disabled_notification(&self, user_id: &str) -> Result<()>;
}
