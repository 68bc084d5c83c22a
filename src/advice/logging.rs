//! Logging advice.
//!
//! Emits Trace, Debug, Info, and Error records throughout the execution
//! of intercepted invocations.

use crate::config::LoggingConfig;
use crate::display::DisplayStrategies;
use crate::interception::{CallError, ErrorDisposition, Interceptor};
use crate::invocation::Invocation;
use crate::logging::{full_error_chain, messages, LogExt, LogFactory};

type ConditionFn = Box<dyn Fn(&Invocation) -> bool + Send + Sync>;

/// Interceptor that logs the lifecycle of every intercepted call.
///
/// Four records accompany each call: a trace start record and a debug
/// argument record before the call, an info pass/fail record and either
/// a trace stop or an error record after it, and a debug return-value
/// record once the call has settled. Errors are re-thrown unless the
/// configured trap policy swallows them.
///
/// Holds no per-call state; one instance may be shared across threads,
/// provided the injected log factory and sink are thread-safe.
pub struct LoggingAdvice {
    config: LoggingConfig,
    log_factory: LogFactory,
    condition: Option<ConditionFn>,
    display: DisplayStrategies,
}

impl LoggingAdvice {
    /// Create advice that intercepts every invocation it is attached to.
    pub fn new(config: LoggingConfig, log_factory: LogFactory) -> Self {
        Self {
            config,
            log_factory,
            condition: None,
            display: DisplayStrategies::default(),
        }
    }

    /// Restrict interception to invocations the predicate accepts.
    pub fn with_condition(
        mut self,
        condition: impl Fn(&Invocation) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Replace the default display registry.
    pub fn with_display(mut self, display: DisplayStrategies) -> Self {
        self.display = display;
        self
    }
}

impl Interceptor for LoggingAdvice {
    fn applies_to(&self, invocation: &Invocation) -> bool {
        self.condition.as_ref().map_or(true, |c| c(invocation))
    }

    fn before(&self, invocation: &Invocation) {
        let log = (self.log_factory)(invocation.target_type());
        log.trace(|| messages::method_start(invocation.target_type(), invocation.method()));
        log.debug(|| {
            messages::method_arguments(
                invocation.method(),
                &self.display.render_arguments(invocation.arguments()),
            )
        });
    }

    fn after(&self, invocation: &Invocation) {
        let log = (self.log_factory)(invocation.target_type());
        log.info(|| messages::method_info(invocation.method(), messages::PASS));
        log.trace(|| messages::method_stop(invocation.target_type(), invocation.method()));
    }

    fn on_error(&self, invocation: &Invocation, error: CallError) -> ErrorDisposition {
        let log = (self.log_factory)(invocation.target_type());
        log.info(|| messages::method_info(invocation.method(), messages::FAIL));
        log.error(|| {
            messages::method_error(invocation.method(), &full_error_chain(error.as_ref()))
        });
        ErrorDisposition::new(error, self.config.trap_exceptions)
    }

    fn finally(&self, invocation: &Invocation) {
        // An absent and an explicitly null return value both mean "nothing
        // to report"; only the arguments use the null sentinel.
        let value = match invocation.return_value() {
            Some(value) if !value.is_null() => value,
            _ => return,
        };
        let log = (self.log_factory)(invocation.target_type());
        log.debug(|| messages::method_return(invocation.method(), &self.display.render(value)));
    }
}
