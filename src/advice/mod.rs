//! Advice for cross-cutting concerns.
//!
//! This module provides interceptors that add orthogonal behavior
//! around intercepted calls without polluting the services themselves.
//!
//! # Architecture
//!
//! Advice is applied at composition time, not in implementations:
//!
//! ```ignore
//! // Core implementation - pure business logic
//! let service = OrderService::new(store);
//!
//! // Apply advice
//! let advice = Arc::new(LoggingAdvice::new(config, tracing_factory()));
//! let service = Intercepted::new(service, advice);
//!
//! // Use as normal - the log records are transparent
//! service.invoke("place_order", args, |inner| ...)?;
//! ```
//!
//! # Available Advice
//!
//! - [`LoggingAdvice`] - Logs start/arguments/outcome/return value around
//!   every intercepted call

mod logging;

pub use logging::LoggingAdvice;
