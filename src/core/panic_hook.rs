//! Process-wide panic reporting

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use parking_lot::Mutex;
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};
use std::thread;

/// Everything the panic hook knows about one panic
#[derive(Debug, Clone)]
pub struct PanicReport {
    pub message: String,
    /// `file:line:column` of the panic site
    pub location: Option<String>,
    pub thread: Option<String>,
    /// Present only when backtrace capture is enabled (`RUST_BACKTRACE`)
    pub backtrace: Option<String>,
}

impl PanicReport {
    pub(crate) fn from_hook(info: &PanicHookInfo<'_>) -> Self {
        let payload = info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        let backtrace = Backtrace::capture();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            message,
            location: info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column())),
            thread: thread::current().name().map(String::from),
            backtrace,
        }
    }
}

impl fmt::Display for PanicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread '{}' panicked", self.thread.as_deref().unwrap_or("<unnamed>"))?;
        if let Some(location) = &self.location {
            write!(f, " at {}", location)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for PanicReport {}

/// Observer of unhandled panics: receives the reporting type's name and the report
pub type PanicObserver = Arc<dyn Fn(&'static str, &PanicReport) + Send + Sync>;

/// Handle returned when registering a [`PanicObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

type Handler = Arc<dyn Fn(&PanicReport) + Send + Sync>;

static HANDLERS: Mutex<Vec<(HookId, Handler)>> = parking_lot::const_mutex(Vec::new());
static NEXT_HOOK_ID: AtomicU64 = AtomicU64::new(0);
static INSTALL: Once = Once::new();

/// Registration of one handler with the process panic hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct HookId(u64);

/// Add `handler` to the process panic hook.
///
/// The first registration chains a single dispatcher in front of the hook
/// that was installed at that time. Later registrations only extend the
/// handler list, so the hook chain does not grow with the number of
/// registrations. The previous hook still runs after the handlers; the
/// default message and the unwind/abort behaviour are unchanged.
pub(crate) fn register<F>(handler: F) -> HookId
where
    F: Fn(&PanicReport) + Send + Sync + 'static,
{
    INSTALL.call_once(install_dispatcher);
    let id = HookId(NEXT_HOOK_ID.fetch_add(1, Ordering::Relaxed));
    HANDLERS.lock().push((id, Arc::new(handler)));
    id
}

/// Remove a handler; `false` if it was not registered
pub(crate) fn unregister(id: HookId) -> bool {
    let mut handlers = HANDLERS.lock();
    let before = handlers.len();
    handlers.retain(|(existing, _)| *existing != id);
    handlers.len() != before
}

#[cfg(test)]
pub(crate) fn is_registered(id: HookId) -> bool {
    HANDLERS.lock().iter().any(|(existing, _)| *existing == id)
}

fn install_dispatcher() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // Released before the handlers run: they may register or unregister.
        let handlers: Vec<Handler> = HANDLERS.lock().iter().map(|(_, h)| Arc::clone(h)).collect();
        if !handlers.is_empty() {
            let report = PanicReport::from_hook(info);
            for handler in handlers {
                handler(&report);
            }
        }
        previous(info);
    }));
}
