//! Single-value selection slots with toggle semantics

use tokio::sync::watch;

/// Holds at most one selected id.
///
/// Subscribers are only woken when the value actually changes, so
/// consecutive identical values are never re-emitted.
#[derive(Debug)]
pub struct SelectionSlot<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> SelectionSlot<T>
where
    T: Copy + PartialEq + Send + Sync + std::fmt::Debug + 'static,
{
    pub fn new(initial: Option<T>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Select `id`, or clear the slot if `id` is already selected.
    pub fn toggle(&self, id: T) {
        self.tx.send_modify(|current| {
            *current = if *current == Some(id) { None } else { Some(id) };
        });
        tracing::debug!(selected = ?self.current(), "Selection toggled");
    }

    /// Set the slot outright. Returns whether the value changed.
    pub fn set(&self, value: Option<T>) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    pub fn current(&self) -> Option<T> {
        *self.tx.borrow()
    }

    pub fn is_selected(&self, id: T) -> bool {
        self.current() == Some(id)
    }

    /// Watch the slot. The receiver starts with the current value marked seen.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }
}
