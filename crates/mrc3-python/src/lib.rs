//! MRC3 status-callback Python bindings via PyO3.
//!
//! Drop-in replacement for the legacy `_mrc3_callbacks` C extension: a
//! client loads the vendor DLL with `ctypes`, then hands the module handle,
//! its interface handle, and a Python callable to [`set_callback`]. The
//! vendor protocol constants are exported alongside so callers need no
//! hand-maintained constants module.

use std::sync::Arc;

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;

use mrc3_bridge::{protocol, registry, resolver, StatusHandler};

mod handler;

use handler::PyStatusHandler;

/// Set the Python status callback.
///
/// `dll_handle` is the handle of the already-loaded MRC3 client DLL (e.g.
/// `ctypes.WinDLL(...)._handle`), `session_handle` the interface handle
/// obtained from `mrc3_new_interface`, and `callback` a callable taking
/// `(callback_id, status)` — or `None` to stop deliveries. Returns the
/// vendor's result code (`0` on success). Raises `TypeError` for an invalid
/// DLL handle, a non-callable argument, or a missing vendor entry point.
#[pyfunction]
fn set_callback(
    py: Python<'_>,
    dll_handle: isize,
    session_handle: i32,
    callback: Bound<'_, PyAny>,
) -> PyResult<i32> {
    resolver::validate_module_handle(dll_handle)
        .map_err(|_| PyTypeError::new_err("Invalid DLL handle"))?;

    let installed: Option<Arc<dyn StatusHandler>> = if callback.is_none() {
        None
    } else if callback.is_callable() {
        Some(Arc::new(PyStatusHandler::new(callback.unbind())))
    } else {
        return Err(PyTypeError::new_err("Parameter must be callable"));
    };

    registry::global().install(installed);

    // The vendor call runs off the GIL: the DLL may deliver a first event
    // from its own thread before this returns, and that delivery needs to
    // acquire the GIL.
    py.allow_threads(|| resolver::register_status_callback(dll_handle, session_handle))
        .map_err(|err| PyTypeError::new_err(err.to_string()))
}

/// The native Rust module exposed to Python as `_mrc3_callbacks`.
#[pymodule]
fn _mrc3_callbacks(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(set_callback, m)?)?;

    // Server states.
    m.add("MRC_SERVER_STATE_UNKNOWN", protocol::SERVER_STATE_UNKNOWN)?;
    m.add("MRC_SERVER_STATE_STOPPED", protocol::SERVER_STATE_STOPPED)?;
    m.add("MRC_SERVER_STATE_IDLE", protocol::SERVER_STATE_IDLE)?;
    m.add("MRC_SERVER_STATE_ACTIVE", protocol::SERVER_STATE_ACTIVE)?;
    m.add("MRC_INVALID_HANDLE", protocol::INVALID_HANDLE)?;
    m.add("MRC_SCRIPT_OUTPUT_BUFSIZ", protocol::SCRIPT_OUTPUT_BUFSIZ)?;

    // Script contexts.
    m.add("MRC_SCRIPT_CONTEXT_DESKTOP", protocol::SCRIPT_CONTEXT_DESKTOP)?;
    m.add(
        "MRC_SCRIPT_CONTEXT_FRONTMOST_APP",
        protocol::SCRIPT_CONTEXT_FRONTMOST_APP,
    )?;

    // Error codes.
    m.add("MRC_ERR_NONE", protocol::ERR_NONE)?;
    m.add("MRC_ERR_BASE", protocol::ERR_BASE)?;
    m.add("MRC_ERR_RUN_SCRIPT_FAILED", protocol::ERR_RUN_SCRIPT_FAILED)?;
    m.add("MRC_ERR_SERVER_BUSY", protocol::ERR_SERVER_BUSY)?;
    m.add("MRC_ERR_COMMAND_TIMEOUT", protocol::ERR_COMMAND_TIMEOUT)?;
    m.add(
        "MRC_ERR_REQUEST_CONTROL_FAILED",
        protocol::ERR_REQUEST_CONTROL_FAILED,
    )?;
    m.add(
        "MRC_ERR_RELEASE_CONTROL_FAILED",
        protocol::ERR_RELEASE_CONTROL_FAILED,
    )?;
    m.add(
        "MRC_ERR_SCRIPT_CONTEXT_NO_APP",
        protocol::ERR_SCRIPT_CONTEXT_NO_APP,
    )?;
    m.add("MRC_ERR_INVALID_PARAM", protocol::ERR_INVALID_PARAM)?;
    m.add(
        "MRC_ERR_CANT_WRITE_TEMP_FILE",
        protocol::ERR_CANT_WRITE_TEMP_FILE,
    )?;
    m.add("MRC_ERR_INVALID_HANDLE", protocol::ERR_INVALID_HANDLE)?;
    m.add("MRC_ERR_RPC_BINDING_CREATE", protocol::ERR_RPC_BINDING_CREATE)?;
    m.add("MRC_ERR_RPC_BINDING_FREE", protocol::ERR_RPC_BINDING_FREE)?;
    m.add("MRC_ERR_NO_MEM", protocol::ERR_NO_MEM)?;
    m.add(
        "MRC_ERR_CLIENT_INTERFACE_BUSY",
        protocol::ERR_CLIENT_INTERFACE_BUSY,
    )?;
    m.add(
        "MRC_ERR_CLIENT_INTERFACE_OPEN",
        protocol::ERR_CLIENT_INTERFACE_OPEN,
    )?;
    m.add(
        "MRC_ERR_CLIENT_INTERFACE_NOT_OPEN",
        protocol::ERR_CLIENT_INTERFACE_NOT_OPEN,
    )?;
    m.add(
        "MRC_ERR_NO_SCRIPT_FILENAME_OR_TEXT",
        protocol::ERR_NO_SCRIPT_FILENAME_OR_TEXT,
    )?;
    m.add(
        "MRC_ERR_CANT_CREATE_LOG_FILE",
        protocol::ERR_CANT_CREATE_LOG_FILE,
    )?;
    m.add(
        "MRC_ERR_TIMEOUT_WAITING_FOR_IDLE",
        protocol::ERR_TIMEOUT_WAITING_FOR_IDLE,
    )?;
    m.add(
        "MRC_ERR_TIMEOUT_WAITING_FOR_SCRIPT",
        protocol::ERR_TIMEOUT_WAITING_FOR_SCRIPT,
    )?;

    // Status-callback enable bitmasks.
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_BEGIN_ACQUIRE",
        protocol::ENABLE_STATUS_CALLBACK_BEGIN_ACQUIRE,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_END_ACQUIRE",
        protocol::ENABLE_STATUS_CALLBACK_END_ACQUIRE,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_BEGIN_FDA",
        protocol::ENABLE_STATUS_CALLBACK_BEGIN_FDA,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_END_FDA",
        protocol::ENABLE_STATUS_CALLBACK_END_FDA,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_SCRIPT",
        protocol::ENABLE_STATUS_CALLBACK_SCRIPT,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_END_SCRIPT",
        protocol::ENABLE_STATUS_CALLBACK_END_SCRIPT,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_SCAN_OFFSET",
        protocol::ENABLE_STATUS_CALLBACK_SCAN_OFFSET,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_ALL",
        protocol::ENABLE_STATUS_CALLBACK_ALL,
    )?;
    m.add(
        "MRC_ENABLE_STATUS_CALLBACK_NONE",
        protocol::ENABLE_STATUS_CALLBACK_NONE,
    )?;

    // Callback status codes.
    m.add(
        "MRC_CALLBACK_STATUS_BEGIN_ACQUIRE",
        protocol::CALLBACK_STATUS_BEGIN_ACQUIRE,
    )?;
    m.add(
        "MRC_CALLBACK_STATUS_END_ACQUIRE",
        protocol::CALLBACK_STATUS_END_ACQUIRE,
    )?;
    m.add(
        "MRC_CALLBACK_STATUS_BEGIN_FDA",
        protocol::CALLBACK_STATUS_BEGIN_FDA,
    )?;
    m.add(
        "MRC_CALLBACK_STATUS_END_FDA",
        protocol::CALLBACK_STATUS_END_FDA,
    )?;
    m.add(
        "MRC_CALLBACK_STATUS_END_SCRIPT",
        protocol::CALLBACK_STATUS_END_SCRIPT,
    )?;

    Ok(())
}
