//! Process-wide registry for the single installed status handler.
//!
//! The vendor DLL supports exactly one status callback per process, so the
//! registry is a single slot: `install` swaps the slot, `invoke` delivers an
//! event to whatever is installed at that instant. The slot mutex guards only
//! the swap and the reference clone, never the handler call itself, so
//! installing a new handler never blocks on handler execution time and an
//! in-flight delivery keeps its own strong reference until it returns.

use std::sync::{Arc, Mutex};

/// A runtime-level status handler.
///
/// Implementations receive the `(callback_id, status)` pair the vendor DLL
/// delivered and must be callable from arbitrary foreign threads. An
/// implementation that calls into a managed runtime is responsible for
/// entering that runtime's execution context for the duration of the call
/// (see `PyStatusHandler` in the `mrc3-python` crate).
pub trait StatusHandler: Send + Sync {
    fn on_status(&self, callback_id: i32, status: i32);
}

/// Single-slot handler registry.
///
/// Constructed once as the process-wide [`global`] instance; separate
/// instances exist only in tests.
pub struct CallbackRegistry {
    slot: Mutex<Option<Arc<dyn StatusHandler>>>,
}

impl CallbackRegistry {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Atomically replace the installed handler. `None` clears the slot.
    ///
    /// The displaced reference is dropped after the lock is released, so an
    /// arbitrary `Drop` impl never runs inside the critical section. If a
    /// delivery is in flight it holds its own clone and the handler is freed
    /// only when that delivery returns.
    pub fn install(&self, handler: Option<Arc<dyn StatusHandler>>) {
        let previous = {
            let mut slot = self.slot.lock().unwrap();
            std::mem::replace(&mut *slot, handler)
        };
        drop(previous);
    }

    /// Deliver a status event to the installed handler, if any.
    ///
    /// The handler reference is cloned under the slot lock and the call is
    /// made outside it, so a concurrent [`install`](Self::install) can
    /// neither free the handler mid-call nor block on it. With no handler
    /// installed the event is dropped silently.
    pub fn invoke(&self, callback_id: i32, status: i32) {
        let handler = {
            let slot = self.slot.lock().unwrap();
            slot.as_ref().map(Arc::clone)
        };

        let Some(handler) = handler else {
            tracing::trace!(callback_id, status, "status event dropped: no handler installed");
            return;
        };

        handler.on_status(callback_id, status);
    }

    /// Whether a handler is currently installed.
    pub fn is_installed(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry consulted by the vendor trampoline.
pub fn global() -> &'static CallbackRegistry {
    static REGISTRY: CallbackRegistry = CallbackRegistry::new();
    &REGISTRY
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<(i32, i32)>>,
    }

    impl RecordingHandler {
        fn calls(&self) -> Vec<(i32, i32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StatusHandler for RecordingHandler {
        fn on_status(&self, callback_id: i32, status: i32) {
            self.calls.lock().unwrap().push((callback_id, status));
        }
    }

    /// Handler that bumps a shared counter when dropped, so release-once
    /// semantics can be asserted from outside.
    struct CountingHandler {
        drops: Arc<AtomicUsize>,
    }

    impl CountingHandler {
        fn new(drops: Arc<AtomicUsize>) -> Self {
            Self { drops }
        }
    }

    impl StatusHandler for CountingHandler {
        fn on_status(&self, _callback_id: i32, _status: i32) {}
    }

    impl Drop for CountingHandler {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn invoke_without_handler_is_a_noop() {
        let registry = CallbackRegistry::new();
        registry.invoke(7, 2);
        assert!(!registry.is_installed());
    }

    #[test]
    fn delivers_the_event_arguments_exactly_once() {
        let registry = CallbackRegistry::new();
        let handler = Arc::new(RecordingHandler::default());
        registry.install(Some(handler.clone()));

        registry.invoke(3, 5);

        assert_eq!(handler.calls(), vec![(3, 5)]);
    }

    #[test]
    fn clearing_stops_delivery() {
        let registry = CallbackRegistry::new();
        let handler = Arc::new(RecordingHandler::default());
        registry.install(Some(handler.clone()));
        registry.invoke(7, 2);

        registry.install(None);
        registry.invoke(8, 3);

        assert_eq!(handler.calls(), vec![(7, 2)]);
        assert!(!registry.is_installed());
    }

    #[test]
    fn replacement_releases_the_previous_handler_exactly_once() {
        let registry = CallbackRegistry::new();
        let first_drops = Arc::new(AtomicUsize::new(0));
        let second_drops = Arc::new(AtomicUsize::new(0));

        registry.install(Some(Arc::new(CountingHandler::new(first_drops.clone()))));
        registry.install(Some(Arc::new(CountingHandler::new(second_drops.clone()))));
        assert_eq!(first_drops.load(Ordering::SeqCst), 1);
        assert_eq!(second_drops.load(Ordering::SeqCst), 0);

        registry.install(None);
        assert_eq!(first_drops.load(Ordering::SeqCst), 1);
        assert_eq!(second_drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_installs_and_invokes_never_double_release() {
        const INVOKERS: usize = 8;
        const INVOKES_PER_THREAD: usize = 125;
        const INSTALLERS: usize = 4;
        const INSTALLS_PER_THREAD: usize = 25;

        let registry = CallbackRegistry::new();
        let drop_counters: Mutex<Vec<Arc<AtomicUsize>>> = Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for _ in 0..INVOKERS {
                scope.spawn(|| {
                    for i in 0..INVOKES_PER_THREAD {
                        registry.invoke(i as i32, 1);
                    }
                });
            }
            for _ in 0..INSTALLERS {
                scope.spawn(|| {
                    for _ in 0..INSTALLS_PER_THREAD {
                        let drops = Arc::new(AtomicUsize::new(0));
                        drop_counters.lock().unwrap().push(drops.clone());
                        registry.install(Some(Arc::new(CountingHandler::new(drops))));
                    }
                });
            }
        });

        registry.install(None);

        let counters = drop_counters.into_inner().unwrap();
        assert_eq!(counters.len(), INSTALLERS * INSTALLS_PER_THREAD);
        for drops in counters {
            assert_eq!(drops.load(Ordering::SeqCst), 1);
        }
    }
}
