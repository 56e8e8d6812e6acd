//! Bridge between a Python callable and the Rust `StatusHandler` trait.

use mrc3_bridge::StatusHandler;
use pyo3::prelude::*;

/// Rust-side handler holding the registered Python callable.
///
/// `on_status` runs on vendor-owned threads: it must hold the GIL for the
/// duration of the call into Python and must never let an exception escape
/// toward the native caller.
pub struct PyStatusHandler {
    callback: Py<PyAny>,
}

impl PyStatusHandler {
    pub fn new(callback: Py<PyAny>) -> Self {
        Self { callback }
    }
}

impl StatusHandler for PyStatusHandler {
    fn on_status(&self, callback_id: i32, status: i32) {
        // A final event can arrive while the interpreter is shutting down;
        // acquiring the GIL then would abort the process.
        if unsafe { pyo3::ffi::Py_IsInitialized() } == 0 {
            tracing::trace!(callback_id, status, "interpreter finalized; event dropped");
            return;
        }

        Python::with_gil(|py| {
            // The callback's return value is discarded. There is no error
            // channel toward the vendor, so a raised exception goes to
            // sys.unraisablehook instead of propagating.
            if let Err(err) = self.callback.call1(py, (callback_id, status)) {
                err.write_unraisable(py, Some(self.callback.bind(py)));
            }
        });
    }
}
