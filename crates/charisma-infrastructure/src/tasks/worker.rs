//! Bounded background task queue
//!
//! Tasks are queued on a bounded channel and run one at a time by a single
//! worker on the tokio runtime. Submission never waits: a full or closed
//! queue drops the task and logs a warning. Failed and panicking tasks are
//! logged and counted; the worker keeps going.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{BackgroundTask, TaskQueue};
use charisma_domain::value_objects::TaskSettings;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

struct Job {
    name: &'static str,
    task: BackgroundTask,
}

#[derive(Debug, Default)]
struct Counters {
    completed: AtomicU64,
    failed: AtomicU64,
}

/// [`TaskQueue`] backed by a tokio worker
pub struct WorkerTaskQueue {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
    shutdown_timeout: Duration,
    counters: Arc<Counters>,
}

impl WorkerTaskQueue {
    /// Start the worker on the given runtime
    pub fn spawn(settings: &TaskSettings, runtime: &Handle) -> Result<Self> {
        if settings.capacity == 0 {
            return Err(Error::configuration("Task queue capacity cannot be 0"));
        }
        let (sender, receiver) = mpsc::channel(settings.capacity);
        let counters = Arc::new(Counters::default());
        let worker = runtime.spawn(run_worker(receiver, Arc::clone(&counters)));
        debug!(capacity = settings.capacity, "Background task worker started");
        Ok(Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            closed: AtomicBool::new(false),
            shutdown_timeout: settings.shutdown_timeout,
            counters,
        })
    }

    /// Start the worker on the current tokio runtime
    ///
    /// Fails outside a runtime.
    pub fn spawn_current(settings: &TaskSettings) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            Error::infrastructure_with_source("Task queue requires a tokio runtime", e)
        })?;
        Self::spawn(settings, &runtime)
    }

    /// Tasks that finished successfully
    pub fn completed(&self) -> u64 {
        self.counters.completed.load(Ordering::Relaxed)
    }

    /// Tasks that failed or panicked
    pub fn failed(&self) -> u64 {
        self.counters.failed.load(Ordering::Relaxed)
    }

    /// Stop accepting work and wait for queued tasks to finish
    ///
    /// Fails if the queue does not drain within the shutdown timeout; the
    /// worker is aborted in that case.
    pub async fn shutdown(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        // Dropping the sender ends the worker loop once the queue is empty
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(mut worker) = worker else {
            return Ok(());
        };
        match tokio::time::timeout(self.shutdown_timeout, &mut worker).await {
            Ok(_) => {
                info!(
                    completed = self.completed(),
                    failed = self.failed(),
                    "Background task queue drained"
                );
                Ok(())
            }
            Err(_) => {
                worker.abort();
                Err(Error::infrastructure(format!(
                    "Background task queue did not drain within {:?}",
                    self.shutdown_timeout
                )))
            }
        }
    }
}

async fn run_worker(mut receiver: mpsc::Receiver<Job>, counters: Arc<Counters>) {
    while let Some(job) = receiver.recv().await {
        match AssertUnwindSafe(job.task).catch_unwind().await {
            Ok(Ok(())) => {
                counters.completed.fetch_add(1, Ordering::Relaxed);
                debug!(task = job.name, "Background task completed");
            }
            Ok(Err(e)) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(task = job.name, error = %e, "Background task failed");
            }
            Err(_) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(task = job.name, "Background task panicked");
            }
        }
    }
}

impl TaskQueue for WorkerTaskQueue {
    fn submit(&self, name: &'static str, task: BackgroundTask) -> bool {
        if self.is_closed() {
            warn!(task = name, "Task queue closed; dropping task");
            return false;
        }
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = sender.as_ref() else {
            warn!(task = name, "Task queue closed; dropping task");
            return false;
        };
        match sender.try_send(Job { name, task }) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(task = name, "Task queue full; dropping task");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(task = name, "Task queue closed; dropping task");
                false
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for WorkerTaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerTaskQueue")
            .field("closed", &self.is_closed())
            .field("completed", &self.completed())
            .field("failed", &self.failed())
            .finish_non_exhaustive()
    }
}
