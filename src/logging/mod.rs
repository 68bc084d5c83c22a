//! Leveled logging facade with deferred formatting.
//!
//! This module contains:
//! - `Log` trait: minimal leveled sink
//! - `LogExt`: deferred-formatting convenience methods
//! - `TracingLog`: production sink over the `tracing` crate
//! - `mock::CaptureLog`: in-memory sink for tests
//!
//! Interceptors obtain a logger through a [`LogFactory`], a function from
//! a declaring type name to a logger scoped to that type. Message thunks
//! passed through [`LogExt`] are evaluated only when the sink reports the
//! level as enabled, so disabled levels cost no formatting.

use std::sync::Arc;

pub mod messages;
pub mod mock;

/// Log levels used by interception advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Error,
}

/// Minimal leveled logging sink.
///
/// Object-safe on purpose: factories hand out `Arc<dyn Log>`. Deferred
/// formatting lives in [`LogExt`] rather than here.
pub trait Log: Send + Sync {
    /// Whether records at `level` are currently emitted.
    fn enabled(&self, level: Level) -> bool;

    /// Emit an already-formatted record.
    fn write(&self, level: Level, message: String);
}

/// Deferred-formatting convenience methods for any [`Log`].
///
/// The message thunk runs only if the level is enabled.
pub trait LogExt {
    fn log_with(&self, level: Level, message: impl FnOnce() -> String);

    fn trace(&self, message: impl FnOnce() -> String) {
        self.log_with(Level::Trace, message);
    }

    fn debug(&self, message: impl FnOnce() -> String) {
        self.log_with(Level::Debug, message);
    }

    fn info(&self, message: impl FnOnce() -> String) {
        self.log_with(Level::Info, message);
    }

    fn error(&self, message: impl FnOnce() -> String) {
        self.log_with(Level::Error, message);
    }
}

impl<L: Log + ?Sized> LogExt for L {
    fn log_with(&self, level: Level, message: impl FnOnce() -> String) {
        if self.enabled(level) {
            self.write(level, message());
        }
    }
}

/// Maps a declaring type name to a logger scoped to that type.
pub type LogFactory = Arc<dyn Fn(&str) -> Arc<dyn Log> + Send + Sync>;

/// Logging sink backed by the `tracing` crate.
///
/// The declaring type travels as the `scope` field on every event.
pub struct TracingLog {
    scope: String,
}

impl TracingLog {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Log for TracingLog {
    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Trace => tracing::enabled!(target: "entwine", tracing::Level::TRACE),
            Level::Debug => tracing::enabled!(target: "entwine", tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: "entwine", tracing::Level::INFO),
            Level::Error => tracing::enabled!(target: "entwine", tracing::Level::ERROR),
        }
    }

    fn write(&self, level: Level, message: String) {
        match level {
            Level::Trace => tracing::trace!(target: "entwine", scope = %self.scope, "{}", message),
            Level::Debug => tracing::debug!(target: "entwine", scope = %self.scope, "{}", message),
            Level::Info => tracing::info!(target: "entwine", scope = %self.scope, "{}", message),
            Level::Error => tracing::error!(target: "entwine", scope = %self.scope, "{}", message),
        }
    }
}

/// Default factory producing [`TracingLog`] sinks.
pub fn tracing_factory() -> LogFactory {
    Arc::new(|scope: &str| -> Arc<dyn Log> { Arc::new(TracingLog::new(scope)) })
}

/// Render an error and its `source()` chain as one diagnostic string.
pub fn full_error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
