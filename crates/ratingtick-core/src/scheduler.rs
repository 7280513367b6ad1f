//! Bounded-concurrency task scheduler with post-completion spacing.
//!
//! Tasks start in submission order while fewer than `max_concurrent` are
//! running. Whenever a task finishes, its slot is released and the queue is
//! checked again only after `min_spacing` has elapsed, which paces the
//! outbound request rate even when slots are free.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{ready, Context, Poll};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinError;
use tracing::trace;

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Concurrency ceiling and pacing for [`RateLimitedScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub max_concurrent: usize,
    pub min_spacing: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            min_spacing: Duration::from_millis(200),
        }
    }
}

impl SchedulerConfig {
    pub fn new(max_concurrent: usize, min_spacing: Duration) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
            min_spacing,
        }
    }
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<Job>,
    running: usize,
}

struct Shared {
    config: SchedulerConfig,
    state: Mutex<QueueState>,
}

/// FIFO scheduler that limits how many submitted futures run at once.
///
/// Cloning yields another handle to the same queue. Must be used from within a
/// Tokio runtime.
#[derive(Clone)]
pub struct RateLimitedScheduler {
    shared: Arc<Shared>,
}

impl Default for RateLimitedScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl RateLimitedScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config: SchedulerConfig::new(config.max_concurrent, config.min_spacing),
                state: Mutex::new(QueueState::default()),
            }),
        }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.shared.config
    }

    /// Enqueue `task` and return a handle resolving to its output.
    ///
    /// The task does not start until the scheduler grants it a slot. Its output,
    /// success or failure, is delivered only through the returned handle.
    pub fn submit<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let outcome = tokio::spawn(task).await;
            let _ = sender.send(outcome);
        });

        {
            let mut state = self.lock_state();
            state.pending.push_back(job);
            trace!(pending = state.pending.len(), running = state.running, "task queued");
        }

        self.process_queue();
        TaskHandle { receiver }
    }

    /// Number of tasks currently holding a slot.
    pub fn running(&self) -> usize {
        self.lock_state().running
    }

    /// Number of tasks waiting for a slot.
    pub fn pending(&self) -> usize {
        self.lock_state().pending.len()
    }

    fn process_queue(&self) {
        let job = {
            let mut state = self.lock_state();
            if state.running >= self.shared.config.max_concurrent {
                return;
            }
            let Some(job) = state.pending.pop_front() else {
                return;
            };
            state.running += 1;
            job
        };

        let scheduler = self.clone();
        tokio::spawn(async move {
            job.await;
            scheduler.release_slot();
            tokio::time::sleep(scheduler.shared.config.min_spacing).await;
            scheduler.process_queue();
        });
    }

    fn release_slot(&self) {
        let mut state = self.lock_state();
        state.running = state.running.saturating_sub(1);
        trace!(pending = state.pending.len(), running = state.running, "task finished");
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.shared
            .state
            .lock()
            .expect("scheduler queue lock should not be poisoned")
    }
}

/// Completion handle for a task submitted to [`RateLimitedScheduler`].
///
/// Resolves to the task's own output. A panic inside the task is resumed in the
/// awaiting caller.
#[must_use = "the task's outcome is only observable through its handle"]
pub struct TaskHandle<T> {
    receiver: oneshot::Receiver<Result<T, JoinError>>,
}

impl<T> Future for TaskHandle<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match ready!(Pin::new(&mut self.receiver).poll(cx)) {
            Ok(Ok(value)) => Poll::Ready(value),
            Ok(Err(join_error)) => match join_error.try_into_panic() {
                Ok(payload) => std::panic::resume_unwind(payload),
                Err(join_error) => panic!("scheduled task did not complete: {join_error}"),
            },
            Err(_) => panic!("scheduler runtime shut down before the task completed"),
        }
    }
}
