//! Keyed trailing-edge debouncer.
//!
//! A [`Debouncer`] delays an action until its key has been quiet for the given
//! delay. Triggering a key again before the delay elapses replaces the pending
//! action and restarts the timer; only the last action of a burst runs.
//!
//! Pending actions run on the tokio runtime, so [`Debouncer::trigger`] must be
//! called from within one.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tunegrid::infrastructure::Debouncer;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let debouncer = Debouncer::new();
//! debouncer.trigger("search-input", Duration::from_millis(200), || async {
//!     // runs once the input has been quiet for 200ms
//! });
//! assert!(debouncer.is_pending(&"search-input"));
//! # }
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug)]
struct Scheduled {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug)]
struct Schedule<K> {
    next_generation: u64,
    pending: HashMap<K, Scheduled>,
}

/// Per-key trailing-edge debouncer.
#[derive(Debug)]
pub struct Debouncer<K> {
    schedule: Arc<Mutex<Schedule<K>>>,
}

impl<K> Default for Debouncer<K> {
    fn default() -> Self {
        Self {
            schedule: Arc::new(Mutex::new(Schedule {
                next_generation: 0,
                pending: HashMap::new(),
            })),
        }
    }
}

fn lock<K>(schedule: &Mutex<Schedule<K>>) -> MutexGuard<'_, Schedule<K>> {
    schedule.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to run after `delay`, replacing any pending action
    /// for `key`.
    ///
    /// Once the delay has elapsed the action runs to completion; a later
    /// trigger for the same key only replaces actions that have not started.
    pub fn trigger<F, Fut>(&self, key: K, delay: Duration, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut schedule = lock(&self.schedule);
        schedule.next_generation += 1;
        let generation = schedule.next_generation;

        if let Some(previous) = schedule.pending.remove(&key) {
            tracing::trace!(key = ?key, superseded = previous.generation, "debounce restarted");
            previous.handle.abort();
        }

        let shared = Arc::clone(&self.schedule);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut schedule = lock(&shared);
                let current = schedule
                    .pending
                    .get(&task_key)
                    .is_some_and(|entry| entry.generation == generation);
                if !current {
                    return;
                }
                schedule.pending.remove(&task_key);
            }
            tracing::debug!(key = ?task_key, "debounced action fired");
            action().await;
        });

        // The task cannot observe its entry before this insert: it needs the lock.
        schedule.pending.insert(key, Scheduled { generation, handle });
    }

    /// Drops the pending action for `key` without running it.
    ///
    /// Returns whether an action was pending.
    pub fn cancel(&self, key: &K) -> bool {
        let removed = lock(&self.schedule).pending.remove(key);
        removed.map_or(false, |scheduled| {
            scheduled.handle.abort();
            true
        })
    }

    /// Whether an action for `key` is waiting for its delay to elapse.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        lock(&self.schedule).pending.contains_key(key)
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, scheduled) in lock(&self.schedule).pending.drain() {
            scheduled.handle.abort();
        }
    }
}
