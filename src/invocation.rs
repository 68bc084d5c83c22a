//! Invocation model.
//!
//! An [`Invocation`] describes one intercepted call: the declaring type,
//! the method identifier, the ordered argument values, and (once the
//! underlying call has completed) the return value.

use serde_json::Value;

/// Description of one intercepted call.
///
/// Created by the interception driver for the duration of a single call
/// and discarded afterwards. Read-only to interceptors; only the driver
/// populates the return value after execution.
#[derive(Debug, Clone)]
pub struct Invocation {
    target_type: &'static str,
    method: String,
    arguments: Vec<Value>,
    return_value: Option<Value>,
}

impl Invocation {
    /// Create an invocation for an explicit declaring type name.
    pub fn new(target_type: &'static str, method: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            target_type,
            method: method.into(),
            arguments,
            return_value: None,
        }
    }

    /// Create an invocation whose declaring type is taken from `T`.
    pub fn of<T>(method: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self::new(std::any::type_name::<T>(), method, arguments)
    }

    /// Name of the declaring type.
    pub fn target_type(&self) -> &'static str {
        self.target_type
    }

    /// Method identifier.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Ordered argument values.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Return value, present only after a successful underlying call
    /// that produced one.
    pub fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    /// Store the outcome of the underlying call.
    ///
    /// Applied by the interception driver; interceptors only ever see
    /// `&Invocation` and cannot alter the value.
    pub fn set_return_value(&mut self, value: Option<Value>) {
        self.return_value = value;
    }
}
