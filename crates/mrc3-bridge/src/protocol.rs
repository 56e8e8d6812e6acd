//! Constants shared by MRC clients and the MetroPro-style server.
//!
//! Reproduced bit-exact from the vendor's MRC client headers. The bridge
//! itself never inspects these values — they exist for callers that need to
//! interpret result codes from the registration call or the `status`
//! argument delivered to their handler, and they are re-exported to Python
//! by the `mrc3-python` crate.

// ---------------------------------------------------------------------------
// Server states
// ---------------------------------------------------------------------------

/// Server state could not be determined.
pub const SERVER_STATE_UNKNOWN: i32 = -1;

/// Normal initial state: the GUI responds to the operator and the server is
/// not listening for remote commands. A client issuing a command gets an
/// error.
pub const SERVER_STATE_STOPPED: i32 = 0;

/// The server accepts and executes remote commands when no operator-initiated
/// processing is pending; certain commands (and the F11 hot key) transition
/// to ACTIVE.
pub const SERVER_STATE_IDLE: i32 = 1;

/// Nominally remote-controlled: commands are accepted and the GUI ignores
/// operator input apart from the abort/quit keys.
pub const SERVER_STATE_ACTIVE: i32 = 2;

/// Invalid interface handle value.
pub const INVALID_HANDLE: i32 = -1;

/// Size of the character buffers that receive script output.
pub const SCRIPT_OUTPUT_BUFSIZ: i32 = 512;

// ---------------------------------------------------------------------------
// Script contexts
// ---------------------------------------------------------------------------

/// Run a script in the context of the server desktop (outside any app).
pub const SCRIPT_CONTEXT_DESKTOP: i32 = 0;

/// Run a script in the context of the front-most open app.
pub const SCRIPT_CONTEXT_FRONTMOST_APP: i32 = 1;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------
// Zero is success. Values >= ERR_BASE are defined by the MRC client DLL;
// lower non-zero values are system-defined (winerror.h) and stay opaque.

/// No error occurred.
pub const ERR_NONE: i32 = 0;

/// Base value for error codes defined by the MRC client DLL.
pub const ERR_BASE: i32 = 0x2000_0000;

/// A script could not be run, or ran and exited with an error.
pub const ERR_RUN_SCRIPT_FAILED: i32 = 0x2000_0000;

/// The server is busy executing another command.
pub const ERR_SERVER_BUSY: i32 = 0x2000_0001;

/// A remote command timed out.
pub const ERR_COMMAND_TIMEOUT: i32 = 0x2000_0002;

/// The request-control command failed.
pub const ERR_REQUEST_CONTROL_FAILED: i32 = 0x2000_0003;

/// The release-control command failed.
pub const ERR_RELEASE_CONTROL_FAILED: i32 = 0x2000_0004;

/// A script required an open app but no app was open.
pub const ERR_SCRIPT_CONTEXT_NO_APP: i32 = 0x2000_0005;

/// A function was passed an invalid parameter.
pub const ERR_INVALID_PARAM: i32 = 0x2000_0006;

/// A temporary file could not be written.
pub const ERR_CANT_WRITE_TEMP_FILE: i32 = 0x2000_0007;

/// A function was passed an invalid interface handle.
pub const ERR_INVALID_HANDLE: i32 = 0x2000_0008;

/// The RPC binding could not be created.
pub const ERR_RPC_BINDING_CREATE: i32 = 0x2000_0009;

/// The RPC binding could not be freed.
pub const ERR_RPC_BINDING_FREE: i32 = 0x2000_000A;

/// Memory allocation failed.
pub const ERR_NO_MEM: i32 = 0x2000_000B;

/// The client interface is busy.
pub const ERR_CLIENT_INTERFACE_BUSY: i32 = 0x2000_000C;

/// The client interface is already open.
pub const ERR_CLIENT_INTERFACE_OPEN: i32 = 0x2000_000D;

/// The client interface is not open.
pub const ERR_CLIENT_INTERFACE_NOT_OPEN: i32 = 0x2000_000E;

/// Neither a script filename nor script text was supplied.
pub const ERR_NO_SCRIPT_FILENAME_OR_TEXT: i32 = 0x2000_000F;

/// The log file could not be created.
pub const ERR_CANT_CREATE_LOG_FILE: i32 = 0x2000_0010;

/// Timed out waiting for the server to reach the IDLE state.
pub const ERR_TIMEOUT_WAITING_FOR_IDLE: i32 = 0x2000_0011;

/// Timed out waiting for a script to finish.
pub const ERR_TIMEOUT_WAITING_FOR_SCRIPT: i32 = 0x2000_0012;

// ---------------------------------------------------------------------------
// Status-callback enable bitmasks
// ---------------------------------------------------------------------------
// Combined with bitwise OR and passed to mrc3_set_status_callback_mask() to
// select which events the server delivers.

/// Callback when acquisition begins.
pub const ENABLE_STATUS_CALLBACK_BEGIN_ACQUIRE: i32 = 0x0001;

/// Callback when acquisition ends.
pub const ENABLE_STATUS_CALLBACK_END_ACQUIRE: i32 = 0x0002;

/// Callback when FDA begins.
pub const ENABLE_STATUS_CALLBACK_BEGIN_FDA: i32 = 0x0004;

/// Callback when FDA ends.
pub const ENABLE_STATUS_CALLBACK_END_FDA: i32 = 0x0008;

/// Callback raised by the MetroScript `mrcstatus` statement.
pub const ENABLE_STATUS_CALLBACK_SCRIPT: i32 = 0x0010;

/// Callback when the script finishes executing.
pub const ENABLE_STATUS_CALLBACK_END_SCRIPT: i32 = 0x0020;

/// Callback carrying the scan offset.
pub const ENABLE_STATUS_CALLBACK_SCAN_OFFSET: i32 = 0x0040;

/// Enable all callbacks.
pub const ENABLE_STATUS_CALLBACK_ALL: i32 = 0xFFFF;

/// Disable all callbacks.
pub const ENABLE_STATUS_CALLBACK_NONE: i32 = 0x0000;

// ---------------------------------------------------------------------------
// Callback status codes
// ---------------------------------------------------------------------------
// The `status` argument delivered to the registered callback.

/// Beginning of acquisition.
pub const CALLBACK_STATUS_BEGIN_ACQUIRE: i32 = 1;

/// End of acquisition.
pub const CALLBACK_STATUS_END_ACQUIRE: i32 = 2;

/// Beginning of FDA.
pub const CALLBACK_STATUS_BEGIN_FDA: i32 = 3;

/// End of FDA.
pub const CALLBACK_STATUS_END_FDA: i32 = 4;

/// End of script execution.
pub const CALLBACK_STATUS_END_SCRIPT: i32 = 5;

/// Description of a named MRC error code, for diagnostics.
///
/// Returns `None` for [`ERR_NONE`] and for system-defined codes below
/// [`ERR_BASE`] — those belong to the platform, not the MRC DLL.
pub fn error_message(code: i32) -> Option<&'static str> {
    match code {
        ERR_RUN_SCRIPT_FAILED => Some("a run-script command failed"),
        ERR_SERVER_BUSY => Some("the server is busy"),
        ERR_COMMAND_TIMEOUT => Some("a remote command timed out"),
        ERR_REQUEST_CONTROL_FAILED => Some("the request-control command failed"),
        ERR_RELEASE_CONTROL_FAILED => Some("the release-control command failed"),
        ERR_SCRIPT_CONTEXT_NO_APP => Some("no app is open for the script context"),
        ERR_INVALID_PARAM => Some("invalid parameter"),
        ERR_CANT_WRITE_TEMP_FILE => Some("a temporary file could not be written"),
        ERR_INVALID_HANDLE => Some("invalid interface handle"),
        ERR_RPC_BINDING_CREATE => Some("the RPC binding could not be created"),
        ERR_RPC_BINDING_FREE => Some("the RPC binding could not be freed"),
        ERR_NO_MEM => Some("memory allocation failed"),
        ERR_CLIENT_INTERFACE_BUSY => Some("the client interface is busy"),
        ERR_CLIENT_INTERFACE_OPEN => Some("the client interface is already open"),
        ERR_CLIENT_INTERFACE_NOT_OPEN => Some("the client interface is not open"),
        ERR_NO_SCRIPT_FILENAME_OR_TEXT => Some("no script filename or text supplied"),
        ERR_CANT_CREATE_LOG_FILE => Some("the log file could not be created"),
        ERR_TIMEOUT_WAITING_FOR_IDLE => Some("timed out waiting for the IDLE state"),
        ERR_TIMEOUT_WAITING_FOR_SCRIPT => Some("timed out waiting for the script to finish"),
        _ => None,
    }
}
