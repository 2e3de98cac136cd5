//! Which catalog example is on screen

use knobs_common::ExampleId;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::debug;

/// Emitted when the active example changes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExampleChanged;

/// Source of the active example, owned by the catalog shell.
pub trait ActiveExample: Send + Sync {
    fn current(&self) -> Option<ExampleId>;

    fn is_active(&self) -> bool {
        self.current().is_some()
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<ExampleChanged>;
}

/// In-memory active example, switched by the shell's navigation.
pub struct ExampleSelection {
    current: Mutex<Option<ExampleId>>,
    event_tx: broadcast::Sender<ExampleChanged>,
}

impl ExampleSelection {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(16);
        Self {
            current: Mutex::new(None),
            event_tx,
        }
    }

    pub fn with_example(id: impl Into<ExampleId>) -> Self {
        let selection = Self::new();
        *selection.current_mut() = Some(id.into());
        selection
    }

    /// Show `id`. Subscribers hear about it only if the selection changed.
    pub fn select(&self, id: impl Into<ExampleId>) {
        self.replace(Some(id.into()));
    }

    pub fn deselect(&self) {
        self.replace(None);
    }

    fn replace(&self, next: Option<ExampleId>) {
        {
            let mut current = self.current_mut();
            if *current == next {
                return;
            }
            debug!("Active example: {:?} -> {:?}", *current, next);
            *current = next;
        }
        let _ = self.event_tx.send(ExampleChanged);
    }

    fn current_mut(&self) -> MutexGuard<'_, Option<ExampleId>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ExampleSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveExample for ExampleSelection {
    fn current(&self) -> Option<ExampleId> {
        self.current_mut().clone()
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<ExampleChanged> {
        self.event_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn starts_inactive() {
        let selection = ExampleSelection::new();
        assert!(!selection.is_active());
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn select_notifies_once_per_change() {
        let selection = ExampleSelection::new();
        let mut rx = selection.subscribe_changes();

        selection.select("button");
        selection.select("button");
        assert_eq!(rx.try_recv(), Ok(ExampleChanged));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        selection.deselect();
        assert_eq!(rx.try_recv(), Ok(ExampleChanged));
        assert!(!selection.is_active());
    }

    #[test]
    fn with_example_is_active_without_event() {
        let selection = ExampleSelection::with_example("pill");
        let mut rx = selection.subscribe_changes();
        assert_eq!(selection.current(), Some(ExampleId::from("pill")));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }
}
