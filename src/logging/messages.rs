//! Message templates for interception advice records.
//!
//! Kept in one place so the wording of the emitted records can change
//! without touching the advice itself.

/// Outcome marker for a call that returned normally.
pub const PASS: &str = "pass";
/// Outcome marker for a call that raised.
pub const FAIL: &str = "fail";

/// Trace record emitted before the underlying call runs.
pub fn method_start(target_type: &str, method: &str) -> String {
    format!("{target_type}.{method}: start")
}

/// Trace record emitted after a successful call.
pub fn method_stop(target_type: &str, method: &str) -> String {
    format!("{target_type}.{method}: stop")
}

/// Debug record listing the rendered argument list.
pub fn method_arguments(method: &str, arguments: &str) -> String {
    format!("{method} arguments: {arguments}")
}

/// Info record reporting the call outcome.
pub fn method_info(method: &str, outcome: &str) -> String {
    format!("{method} completed: {outcome}")
}

/// Error record carrying the full diagnostic text of the raised error.
pub fn method_error(method: &str, diagnostic: &str) -> String {
    format!("{method} raised: {diagnostic}")
}

/// Debug record carrying the rendered return value.
pub fn method_return(method: &str, value: &str) -> String {
    format!("{method} returned: {value}")
}
