//! Status-callback bridge for the MRC3 remote-control client DLL.
//!
//! MetroPro-style instrument servers deliver script and acquisition progress
//! through a status callback registered with the `mrc3_client` DLL. The DLL
//! invokes that callback on threads it owns, so a host runtime (in practice
//! the Python interpreter, via the `mrc3-python` crate) cannot hand its own
//! functions to the DLL directly. This crate provides the native side of the
//! bridge:
//!
//! - [`registry`] — the process-wide slot holding the single installed
//!   handler, with swap/clone discipline safe against concurrent delivery.
//! - [`resolver`] — resolution of the vendor's registration entry point from
//!   a caller-supplied module handle, plus the fixed trampoline the vendor
//!   invokes.
//! - [`protocol`] — the vendor's wire constants (server states, error codes,
//!   callback masks), reproduced bit-exact from the MRC client headers.
//!
//! The bridge forwards events; it never interprets status codes and owns no
//! vendor state.

pub mod protocol;
pub mod registry;
pub mod resolver;

// Re-export public types at the crate level.

// registry
pub use registry::{CallbackRegistry, StatusHandler};

// resolver
pub use resolver::{
    register_status_callback, status_trampoline, validate_module_handle, RegisterError,
    StatusCallback, SET_STATUS_CALLBACK_SYMBOL,
};
