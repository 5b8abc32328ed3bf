use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::control::ControlHandle;

/// Identifies a deferred cosmetic task. At most one task per key is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Highlight(ControlHandle),
    Notice,
}

/// Deferred tasks with cancel-on-superseded semantics.
///
/// Scheduling a key that already has a pending task aborts that task first.
/// Dropping the scheduler detaches whatever is still pending, so those
/// tasks still run to completion on the runtime.
#[derive(Default)]
pub struct Scheduler {
    tasks: Mutex<HashMap<TaskKey, JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` unless superseded or cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, key: TaskKey, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.lock();
        if let Some(previous) = tasks.remove(&key) {
            previous.abort();
        }
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        tasks.insert(key, handle);
        tasks.retain(|_, h| !h.is_finished());
    }

    pub fn cancel(&self, key: TaskKey) -> bool {
        match self.lock().remove(&key) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Number of tasks that have not yet completed.
    pub fn pending(&self) -> usize {
        let mut tasks = self.lock();
        tasks.retain(|_, h| !h.is_finished());
        tasks.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TaskKey, JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}
