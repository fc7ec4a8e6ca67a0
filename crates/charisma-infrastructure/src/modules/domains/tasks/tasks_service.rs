//! `tasksService` module
//!
//! Bounded background queue sized from `taskSettings`. Must be resolved on
//! a tokio runtime. Teardown closes the queue and waits for it to drain.

use std::sync::Arc;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::constants::TASK_SETTINGS_KEY;
use charisma_domain::error::Result;
use charisma_domain::ports::TaskQueue;
use charisma_domain::value_objects::TaskSettings;

use crate::tasks::WorkerTaskQueue;

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|deps| {
        let settings = deps.get::<TaskSettings>(TASK_SETTINGS_KEY)?;
        let queue = Arc::new(WorkerTaskQueue::spawn_current(&settings)?);
        let released = Arc::clone(&queue);
        Ok(Instance::of::<dyn TaskQueue>(queue).with_release(move || {
            let queue = Arc::clone(&released);
            async move { queue.shutdown().await }
        }))
    })
    .depends_on(&[TASK_SETTINGS_KEY]))
}

charisma_application::register_module!(load);
