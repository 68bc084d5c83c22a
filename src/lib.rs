//! Entwine - interception and logging advice.
//!
//! A small AOP layer for wrapping service calls with cross-cutting
//! behavior. Interception happens at compile time: a service is wrapped
//! in an explicit decorator ([`interception::Intercepted`]) that drives
//! lifecycle hooks around each call instead of relying on runtime
//! proxying.

pub mod advice;
pub mod bootstrap;
pub mod config;
pub mod display;
pub mod interception;
pub mod invocation;
pub mod logging;

pub use advice::LoggingAdvice;
pub use config::LoggingConfig;
pub use interception::{
    intercept, CallError, DelegateInterceptor, ErrorDisposition, Intercepted, Interceptor,
};
pub use invocation::Invocation;
