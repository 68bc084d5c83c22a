use std::sync::Mutex;

use serde_json::json;

use super::*;

/// Records the order in which hooks fire.
#[derive(Default)]
struct Recording {
    calls: Mutex<Vec<&'static str>>,
    trap: bool,
    rejects: bool,
}

impl Recording {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Interceptor for Recording {
    fn applies_to(&self, _invocation: &Invocation) -> bool {
        !self.rejects
    }

    fn before(&self, _invocation: &Invocation) {
        self.push("before");
    }

    fn after(&self, _invocation: &Invocation) {
        self.push("after");
    }

    fn on_error(&self, _invocation: &Invocation, error: CallError) -> ErrorDisposition {
        self.push("on_error");
        ErrorDisposition::new(error, self.trap)
    }

    fn finally(&self, _invocation: &Invocation) {
        self.push("finally");
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct CallFailed {
    message: String,
    #[source]
    cause: Option<std::io::Error>,
}

fn failure(message: &str) -> CallError {
    Box::new(CallFailed {
        message: message.to_string(),
        cause: None,
    })
}

#[test]
fn test_success_runs_before_after_finally() {
    let interceptor = Recording::default();
    let mut invocation = Invocation::new("Calculator", "add", vec![json!(1), json!(2)]);

    let result = intercept(&interceptor, &mut invocation, |_| Ok(Some(json!(3))));

    assert_eq!(result.unwrap(), Some(json!(3)));
    assert_eq!(interceptor.calls(), vec!["before", "after", "finally"]);
}

#[test]
fn test_return_value_visible_to_hooks() {
    let interceptor = DelegateInterceptor::new().with_after(|invocation| {
        assert_eq!(invocation.return_value(), Some(&json!("done")));
    });
    let mut invocation = Invocation::new("Calculator", "run", vec![]);

    intercept(&interceptor, &mut invocation, |_| Ok(Some(json!("done")))).unwrap();

    assert_eq!(invocation.return_value(), Some(&json!("done")));
}

#[test]
fn test_error_runs_before_on_error_finally() {
    let interceptor = Recording::default();
    let mut invocation = Invocation::new("Calculator", "add", vec![]);

    let result = intercept(&interceptor, &mut invocation, |_| Err(failure("boom")));

    assert_eq!(result.unwrap_err().to_string(), "boom");
    assert_eq!(interceptor.calls(), vec!["before", "on_error", "finally"]);
}

#[test]
fn test_trap_swallows_error() {
    let interceptor = Recording {
        trap: true,
        ..Recording::default()
    };
    let mut invocation = Invocation::new("Calculator", "add", vec![]);

    let result = intercept(&interceptor, &mut invocation, |_| Err(failure("boom")));

    assert_eq!(result.unwrap(), None);
    assert_eq!(interceptor.calls(), vec!["before", "on_error", "finally"]);
}

#[test]
fn test_rejected_invocation_skips_all_hooks() {
    let interceptor = Recording {
        rejects: true,
        ..Recording::default()
    };
    let mut invocation = Invocation::new("Calculator", "add", vec![]);

    let result = intercept(&interceptor, &mut invocation, |_| Ok(Some(json!(7))));

    assert_eq!(result.unwrap(), Some(json!(7)));
    assert!(interceptor.calls().is_empty());
}

#[test]
fn test_rejected_invocation_passes_error_through() {
    let interceptor = Recording {
        rejects: true,
        trap: true,
        ..Recording::default()
    };
    let mut invocation = Invocation::new("Calculator", "add", vec![]);

    let result = intercept(&interceptor, &mut invocation, |_| Err(failure("boom")));

    // The trap policy never engages for invocations the predicate rejects.
    assert_eq!(result.unwrap_err().to_string(), "boom");
    assert!(interceptor.calls().is_empty());
}

#[test]
fn test_disposition_exposes_original_error() {
    let disposition = ErrorDisposition::new(failure("boom"), true);

    assert!(disposition.traps());
    assert_eq!(disposition.error().to_string(), "boom");
    assert_eq!(disposition.into_error().to_string(), "boom");
}

#[test]
fn test_delegate_interceptor_hooks() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let before_fired = Arc::new(AtomicBool::new(false));
    let finally_fired = Arc::new(AtomicBool::new(false));

    let before_flag = Arc::clone(&before_fired);
    let finally_flag = Arc::clone(&finally_fired);
    let interceptor = DelegateInterceptor::new()
        .with_before(move |_| before_flag.store(true, Ordering::SeqCst))
        .with_finally(move |_| finally_flag.store(true, Ordering::SeqCst))
        .with_on_error(|_, _| true);

    let mut invocation = Invocation::new("Calculator", "add", vec![]);
    let result = intercept(&interceptor, &mut invocation, |_| Err(failure("boom")));

    assert_eq!(result.unwrap(), None);
    assert!(before_fired.load(Ordering::SeqCst));
    assert!(finally_fired.load(Ordering::SeqCst));
}

#[test]
fn test_delegate_interceptor_defaults_to_rethrow() {
    let interceptor = DelegateInterceptor::new();
    let mut invocation = Invocation::new("Calculator", "add", vec![]);

    let result = intercept(&interceptor, &mut invocation, |_| Err(failure("boom")));

    assert_eq!(result.unwrap_err().to_string(), "boom");
}

#[test]
fn test_intercepted_wrapper_forwards_to_inner() {
    struct Doubler;
    impl Doubler {
        fn double(&self, n: i64) -> i64 {
            n * 2
        }
    }

    let interceptor = std::sync::Arc::new(Recording::default());
    let service = Intercepted::new(Doubler, interceptor.clone());

    let result = service.invoke("double", vec![json!(21)], |inner| {
        Ok(Some(json!(inner.double(21))))
    });

    assert_eq!(result.unwrap(), Some(json!(42)));
    assert_eq!(interceptor.calls(), vec!["before", "after", "finally"]);
    assert_eq!(service.inner().double(1), 2);
}
