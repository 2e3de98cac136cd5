//! Deferred work: run after the current call stack, before the next event
//!
//! Registering a knob usually happens while an example renders. The change
//! notification for it goes through a [`Scheduler`] so the render that
//! registered the knob is not re-triggered from inside itself.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;

pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

pub trait Scheduler: Send + Sync {
    /// Queue `task` for the next scheduling turn. Must not run it inline.
    fn defer(&self, task: DeferredTask);
}

/// Explicit task queue drained by the host loop between events.
#[derive(Clone, Default)]
pub struct TurnQueue {
    tasks: Arc<Mutex<VecDeque<DeferredTask>>>,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks().len()
    }

    /// Run queued tasks, including ones queued while draining.
    /// Returns how many ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the lock before running, tasks may defer more work.
            let next = self.tasks().pop_front();
            let Some(task) = next else {
                return ran;
            };
            task();
            ran += 1;
        }
    }

    fn tasks(&self) -> MutexGuard<'_, VecDeque<DeferredTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for TurnQueue {
    fn defer(&self, task: DeferredTask) {
        self.tasks().push_back(task);
    }
}

/// Runs deferred tasks as tokio tasks, i.e. on the runtime's next turn.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler for the runtime this is called from, if any.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn defer(&self, task: DeferredTask) {
        self.handle.spawn(async move { task() });
    }
}
