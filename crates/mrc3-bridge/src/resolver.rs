//! Resolution and invocation of the vendor's callback-registration entry
//! point.
//!
//! The MRC3 client DLL exports `mrc3_set_status_callback_function`, which
//! accepts an interface handle and a status callback. The DLL is loaded by
//! the caller (e.g. `ctypes.WinDLL` on the Python side); this module only
//! borrows the already-loaded module handle to resolve the export, then calls
//! it with [`status_trampoline`], the one fixed native function the vendor
//! ever sees. The trampoline forwards every `(callback_id, status)` pair to
//! the [`registry`](crate::registry) and contains panics, since the vendor's
//! stack frame cannot unwind.

use std::os::raw::c_int;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::registry;

/// Exported name of the vendor's callback-registration function.
pub const SET_STATUS_CALLBACK_SYMBOL: &str = "mrc3_set_status_callback_function";

/// The native callback shape the vendor requires: `(callback_id, status)`,
/// no return value.
///
/// `extern "system"` is `__stdcall` on 32-bit Windows, the convention the
/// MRC headers declare (`WINFUNCTYPE` on the ctypes side), and the platform
/// C convention elsewhere. A mismatched convention here would corrupt the
/// stack on every delivery, so the alias is the single source of truth for
/// the callback shape.
pub type StatusCallback = extern "system" fn(c_int, c_int);

/// `mrc3_set_status_callback_function(handle, callback) -> error code`.
type SetStatusCallbackFn = unsafe extern "system" fn(c_int, StatusCallback) -> c_int;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors detected before any call into the vendor module is attempted.
///
/// A non-zero result code from the vendor itself is not an error at this
/// layer — it is returned verbatim and belongs to the vendor's taxonomy
/// ([`protocol`](crate::protocol)).
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("invalid module handle: {handle}")]
    InvalidHandle { handle: isize },

    #[error("symbol '{symbol}' not found in module {handle:#x}")]
    SymbolNotFound { handle: isize, symbol: &'static str },
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Validate a caller-supplied module handle.
///
/// Null can never be resolved against and negative values are the vendor's
/// own invalid-handle convention, so both are rejected before the handle is
/// ever treated as a loaded module.
pub fn validate_module_handle(handle: isize) -> Result<(), RegisterError> {
    if handle <= 0 {
        return Err(RegisterError::InvalidHandle { handle });
    }
    Ok(())
}

/// Register [`status_trampoline`] as the vendor's status callback.
///
/// Resolves [`SET_STATUS_CALLBACK_SYMBOL`] from `module_handle` (an
/// already-loaded module owned by the caller) and calls it with
/// `session_handle` and the trampoline. On success the vendor begins
/// invoking the trampoline from its own threads; events are forwarded to
/// whatever handler the registry holds at delivery time.
///
/// Returns the vendor's result code verbatim: `0` is
/// [`protocol::ERR_NONE`](crate::protocol::ERR_NONE), anything else is a
/// vendor-defined failure the bridge does not interpret.
pub fn register_status_callback(
    module_handle: isize,
    session_handle: i32,
) -> Result<i32, RegisterError> {
    validate_module_handle(module_handle)?;
    let set_status_callback = resolve_entry(module_handle)?;

    // SAFETY: the pointer was resolved from a live module under the vendor's
    // documented name and signature; the trampoline matches the declared
    // callback shape exactly.
    let code = unsafe { set_status_callback(session_handle, status_trampoline) };
    tracing::debug!(
        module_handle,
        session_handle,
        code,
        "vendor callback registration returned"
    );
    Ok(code)
}

/// Resolve the registration entry point from a borrowed module handle.
///
/// The handle is wrapped just long enough to look up the symbol and then
/// handed back via `into_raw()` on every path — the caller owns the module's
/// lifecycle and the bridge must never unload it.
#[cfg(windows)]
fn resolve_entry(module_handle: isize) -> Result<SetStatusCallbackFn, RegisterError> {
    use libloading::os::windows::Library;

    let library = unsafe { Library::from_raw(module_handle as _) };
    let resolved = unsafe {
        library
            .get::<SetStatusCallbackFn>(SET_STATUS_CALLBACK_SYMBOL.as_bytes())
            .map(|sym| *sym)
    };
    let _ = library.into_raw();

    resolved.map_err(|_| RegisterError::SymbolNotFound {
        handle: module_handle,
        symbol: SET_STATUS_CALLBACK_SYMBOL,
    })
}

#[cfg(unix)]
fn resolve_entry(module_handle: isize) -> Result<SetStatusCallbackFn, RegisterError> {
    use libloading::os::unix::Library;

    let library = unsafe { Library::from_raw(module_handle as _) };
    let resolved = unsafe {
        library
            .get::<SetStatusCallbackFn>(SET_STATUS_CALLBACK_SYMBOL.as_bytes())
            .map(|sym| *sym)
    };
    let _ = library.into_raw();

    resolved.map_err(|_| RegisterError::SymbolNotFound {
        handle: module_handle,
        symbol: SET_STATUS_CALLBACK_SYMBOL,
    })
}

// ---------------------------------------------------------------------------
// Trampoline (vendor thread → registry)
// ---------------------------------------------------------------------------

/// The fixed native callback handed to the vendor DLL.
///
/// Invoked by the vendor on threads it owns, at any time after a successful
/// registration. Forwards to the global registry; a panicking handler is
/// contained here because unwinding into the vendor's frame is undefined
/// behavior.
pub extern "system" fn status_trampoline(callback_id: c_int, status: c_int) {
    let result = catch_unwind(AssertUnwindSafe(|| {
        registry::global().invoke(callback_id, status);
    }));
    if result.is_err() {
        tracing::error!(callback_id, status, "status handler panicked; event dropped");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StatusHandler;
    use std::sync::{Arc, Mutex};

    // Tests below mutate the process-wide registry slot; serialize them.
    static GLOBAL_SLOT: Mutex<()> = Mutex::new(());

    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<(i32, i32)>>,
    }

    impl StatusHandler for RecordingHandler {
        fn on_status(&self, callback_id: i32, status: i32) {
            self.calls.lock().unwrap().push((callback_id, status));
        }
    }

    struct PanickingHandler;

    impl StatusHandler for PanickingHandler {
        fn on_status(&self, _callback_id: i32, _status: i32) {
            panic!("handler failure");
        }
    }

    #[test]
    fn rejects_null_and_negative_module_handles() {
        for handle in [0isize, -1, isize::MIN] {
            let err = register_status_callback(handle, 1).unwrap_err();
            assert!(matches!(err, RegisterError::InvalidHandle { handle: h } if h == handle));
        }
    }

    #[test]
    fn handle_validation_matches_registration() {
        assert!(validate_module_handle(1).is_ok());
        assert!(validate_module_handle(0).is_err());
        assert!(validate_module_handle(-1).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn missing_symbol_in_a_real_module_is_reported() {
        // The current process is a genuinely loaded module that does not
        // export the vendor entry point.
        let handle = libloading::os::unix::Library::this().into_raw() as isize;
        assert!(handle > 0, "process handle unexpectedly non-positive");

        let err = register_status_callback(handle, 1).unwrap_err();
        assert!(matches!(
            err,
            RegisterError::SymbolNotFound {
                symbol: SET_STATUS_CALLBACK_SYMBOL,
                ..
            }
        ));
    }

    #[test]
    fn trampoline_matches_the_vendor_callback_shape() {
        let _callback: StatusCallback = status_trampoline;
    }

    #[test]
    fn trampoline_round_trips_through_the_global_registry() {
        let _guard = GLOBAL_SLOT.lock().unwrap();

        // No handler installed: delivery is dropped.
        status_trampoline(9, 9);

        let handler = Arc::new(RecordingHandler::default());
        registry::global().install(Some(handler.clone()));
        status_trampoline(7, 2);

        registry::global().install(None);
        status_trampoline(1, 1);

        assert_eq!(*handler.calls.lock().unwrap(), vec![(7, 2)]);
    }

    #[test]
    fn trampoline_contains_a_panicking_handler() {
        let _guard = GLOBAL_SLOT.lock().unwrap();

        registry::global().install(Some(Arc::new(PanickingHandler)));
        // Must return normally; unwinding here would cross the native frame.
        status_trampoline(3, 4);

        registry::global().install(None);
    }
}
