//! Background Task Queue Port

use futures::future::BoxFuture;

use crate::error::Result;

/// A unit of background work
pub type BackgroundTask = BoxFuture<'static, Result<()>>;

/// Queue for work that runs after the response is sent
///
/// Submission never blocks the caller. Task failures are reported by the
/// queue's worker, never to the submitter.
pub trait TaskQueue: Send + Sync {
    /// Enqueue a named task
    ///
    /// Returns false if the task was dropped because the queue is full or
    /// closed.
    fn submit(&self, name: &'static str, task: BackgroundTask) -> bool;

    /// Whether the queue stopped accepting work
    fn is_closed(&self) -> bool;
}
