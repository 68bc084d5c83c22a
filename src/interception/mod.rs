//! Call interception.
//!
//! This module contains:
//! - `Interceptor` trait: lifecycle hooks around a call
//! - `intercept`: the driver that runs a call through an interceptor
//! - `Intercepted<T>`: decorator wrapping a service with an interceptor
//! - `DelegateInterceptor`: an interceptor assembled from closures
//!
//! Interception is explicit and compile-time: a wrapped service exposes
//! the same surface as the inner one, and each forwarded call is driven
//! through the hooks by [`intercept`]. No runtime proxying is involved.

use std::sync::Arc;

use serde_json::Value;

use crate::invocation::Invocation;

/// Any error raised by an intercepted call.
pub type CallError = Box<dyn std::error::Error + Send + Sync>;

/// Result of error handling: the original error plus the trap decision.
///
/// Produced once per failed invocation by [`Interceptor::on_error`] and
/// consumed immediately by the driver. When `traps` is set the error is
/// swallowed and the call is reported as completed without a value;
/// otherwise the original error is re-thrown unchanged.
pub struct ErrorDisposition {
    error: CallError,
    trap: bool,
}

impl ErrorDisposition {
    pub fn new(error: CallError, trap: bool) -> Self {
        Self { error, trap }
    }

    /// Whether the error should be swallowed at the interception boundary.
    pub fn traps(&self) -> bool {
        self.trap
    }

    /// The original error.
    pub fn error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.error.as_ref()
    }

    /// Give the original error back to the driver for re-throw.
    pub fn into_error(self) -> CallError {
        self.error
    }
}

impl std::fmt::Debug for ErrorDisposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorDisposition")
            .field("error", &self.error)
            .field("trap", &self.trap)
            .finish()
    }
}

/// Lifecycle hooks around an intercepted call.
///
/// Implementations hold no per-call state; one instance may be shared
/// across threads and invocations. All hooks are observational: `before`,
/// `after`, and `finally` must not fail, and `on_error` only decides the
/// trap/re-throw disposition.
pub trait Interceptor: Send + Sync {
    /// Select which invocations to intercept. When this returns `false`
    /// the underlying call runs and no other hook fires.
    fn applies_to(&self, _invocation: &Invocation) -> bool {
        true
    }

    /// Called immediately before the underlying call executes.
    fn before(&self, _invocation: &Invocation) {}

    /// Called only when the underlying call returned without error.
    fn after(&self, _invocation: &Invocation) {}

    /// Called when the underlying call raised. Returns the disposition
    /// deciding whether the error is re-thrown or swallowed.
    fn on_error(&self, _invocation: &Invocation, error: CallError) -> ErrorDisposition {
        ErrorDisposition::new(error, false)
    }

    /// Called exactly once after either success or error handling,
    /// before control returns to the caller.
    fn finally(&self, _invocation: &Invocation) {}
}

/// Drive one call through an interceptor.
///
/// Exactly one of the success/error paths executes, and `finally` always
/// runs before control returns. On success the return value is stored on
/// the invocation before `after` fires. On error, the disposition from
/// `on_error` decides the outcome: trapped errors are swallowed and the
/// call completes with no value; otherwise the original error propagates
/// unchanged.
pub fn intercept<F>(
    interceptor: &dyn Interceptor,
    invocation: &mut Invocation,
    proceed: F,
) -> Result<Option<Value>, CallError>
where
    F: FnOnce(&Invocation) -> Result<Option<Value>, CallError>,
{
    if !interceptor.applies_to(invocation) {
        let value = proceed(invocation)?;
        invocation.set_return_value(value.clone());
        return Ok(value);
    }

    interceptor.before(invocation);

    match proceed(invocation) {
        Ok(value) => {
            invocation.set_return_value(value);
            interceptor.after(invocation);
            interceptor.finally(invocation);
            Ok(invocation.return_value().cloned())
        }
        Err(error) => {
            let disposition = interceptor.on_error(invocation, error);
            interceptor.finally(invocation);
            if disposition.traps() {
                Ok(None)
            } else {
                Err(disposition.into_error())
            }
        }
    }
}

/// Decorator wrapping a service with an interceptor.
///
/// The wrapper owns the inner service; each forwarded call goes through
/// [`intercept`] with the declaring type taken from `T`.
///
/// # Example
///
/// ```ignore
/// let service = Intercepted::new(OrderService::new(), advice);
///
/// let total = service.invoke("place_order", vec![json!(42)], |inner| {
///     inner.place_order(42).map(|v| Some(json!(v)))
/// })?;
/// ```
pub struct Intercepted<T> {
    inner: T,
    interceptor: Arc<dyn Interceptor>,
    target_type: &'static str,
}

impl<T> Intercepted<T> {
    /// Wrap a service with an interceptor.
    pub fn new(inner: T, interceptor: Arc<dyn Interceptor>) -> Self {
        Self {
            inner,
            interceptor,
            target_type: std::any::type_name::<T>(),
        }
    }

    /// Get a reference to the inner service.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume the wrapper and return the inner service.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Forward one call through the interceptor.
    ///
    /// Builds the [`Invocation`] from the method name and arguments and
    /// runs `call` against the inner service as the underlying call.
    pub fn invoke<F>(
        &self,
        method: &str,
        arguments: Vec<Value>,
        call: F,
    ) -> Result<Option<Value>, CallError>
    where
        F: FnOnce(&T) -> Result<Option<Value>, CallError>,
    {
        let mut invocation = Invocation::new(self.target_type, method, arguments);
        intercept(self.interceptor.as_ref(), &mut invocation, |_| {
            call(&self.inner)
        })
    }
}

type ConditionFn = Box<dyn Fn(&Invocation) -> bool + Send + Sync>;
type HookFn = Box<dyn Fn(&Invocation) + Send + Sync>;
type ErrorHookFn =
    Box<dyn Fn(&Invocation, &(dyn std::error::Error + Send + Sync)) -> bool + Send + Sync>;

/// Interceptor assembled from optional closures.
///
/// Useful when a full [`Interceptor`] implementation is more ceremony
/// than the cross-cutting concern warrants. Unset hooks are no-ops; an
/// unset error hook re-throws.
#[derive(Default)]
pub struct DelegateInterceptor {
    condition: Option<ConditionFn>,
    before: Option<HookFn>,
    after: Option<HookFn>,
    on_error: Option<ErrorHookFn>,
    finally: Option<HookFn>,
}

impl DelegateInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict which invocations are intercepted.
    pub fn with_condition(mut self, condition: impl Fn(&Invocation) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    pub fn with_before(mut self, hook: impl Fn(&Invocation) + Send + Sync + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    pub fn with_after(mut self, hook: impl Fn(&Invocation) + Send + Sync + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    /// Set the error hook. The closure returns the trap decision.
    pub fn with_on_error(
        mut self,
        hook: impl Fn(&Invocation, &(dyn std::error::Error + Send + Sync)) -> bool
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub fn with_finally(mut self, hook: impl Fn(&Invocation) + Send + Sync + 'static) -> Self {
        self.finally = Some(Box::new(hook));
        self
    }
}

impl Interceptor for DelegateInterceptor {
    fn applies_to(&self, invocation: &Invocation) -> bool {
        self.condition.as_ref().map_or(true, |c| c(invocation))
    }

    fn before(&self, invocation: &Invocation) {
        if let Some(hook) = &self.before {
            hook(invocation);
        }
    }

    fn after(&self, invocation: &Invocation) {
        if let Some(hook) = &self.after {
            hook(invocation);
        }
    }

    fn on_error(&self, invocation: &Invocation, error: CallError) -> ErrorDisposition {
        let trap = self
            .on_error
            .as_ref()
            .map_or(false, |hook| hook(invocation, error.as_ref()));
        ErrorDisposition::new(error, trap)
    }

    fn finally(&self, invocation: &Invocation) {
        if let Some(hook) = &self.finally {
            hook(invocation);
        }
    }
}

#[cfg(test)]
mod tests;
