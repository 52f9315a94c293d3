//! External log listeners

use super::log_level::LogLevel;
use std::sync::Arc;

/// Receives a copy of every `(level, message)` pair the facade emits.
///
/// Listeners run synchronously, in registration order, while the logging lock
/// is held. They never see tags or caller metadata. A panicking listener
/// aborts the log call that reached it; listeners registered after it are not
/// notified for that record.
pub trait LogListener: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

impl<F> LogListener for F
where
    F: Fn(LogLevel, &str) + Send + Sync,
{
    fn log(&self, level: LogLevel, message: &str) {
        self(level, message)
    }
}

/// Insertion-ordered listener handles; duplicates allowed, removal by identity
///
/// Copy-on-write: a snapshot taken for one log call stays valid while the set
/// is modified, and taking it costs one reference count.
#[derive(Default, Clone)]
pub(crate) struct ListenerSet {
    listeners: Arc<Vec<Arc<dyn LogListener>>>,
}

impl ListenerSet {
    pub(crate) fn add(&mut self, listener: Arc<dyn LogListener>) {
        Arc::make_mut(&mut self.listeners).push(listener);
    }

    /// Remove the first entry that is the same allocation as `listener`
    pub(crate) fn remove(&mut self, listener: &Arc<dyn LogListener>) -> bool {
        match self.listeners.iter().position(|l| same_listener(l, listener)) {
            Some(index) => {
                Arc::make_mut(&mut self.listeners).remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<dyn LogListener>>> {
        Arc::clone(&self.listeners)
    }
}

/// Identity comparison on the data pointer only; vtable pointers for the same
/// type may differ between codegen units.
fn same_listener(a: &Arc<dyn LogListener>, b: &Arc<dyn LogListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
