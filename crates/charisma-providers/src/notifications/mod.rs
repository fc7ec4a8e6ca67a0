//! Email and notification senders

pub mod log;

pub use self::log::{LogEmailSender, LogNotificationSender};
