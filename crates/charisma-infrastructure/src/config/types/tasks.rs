//! Background task queue configuration types

use charisma_domain::error::Result;
use charisma_domain::value_objects::TaskSettings;
use serde::{Deserialize, Serialize};

use super::parse_duration;
use crate::constants::{DEFAULT_TASK_QUEUE_CAPACITY, DEFAULT_TASK_SHUTDOWN_TIMEOUT};

/// Background task queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Maximum number of queued tasks
    pub capacity: usize,
    /// How long teardown waits for the queue to drain
    pub shutdown_timeout: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_TASK_QUEUE_CAPACITY,
            shutdown_timeout: DEFAULT_TASK_SHUTDOWN_TIMEOUT.to_string(),
        }
    }
}

impl TasksConfig {
    /// Settings registered as `taskSettings`
    pub fn to_settings(&self) -> Result<TaskSettings> {
        Ok(TaskSettings {
            capacity: self.capacity,
            shutdown_timeout: parse_duration("tasks.shutdown_timeout", &self.shutdown_timeout)?,
        })
    }
}
