//! Structured logging and image-load metrics for the FERJO storefront.
//!
//! This crate provides:
//! - `SessionId` - Identifier correlating one catalog session's logs
//! - `StructuredLogger` - Session-scoped structured logging over `tracing`
//! - `init_tracing` - Subscriber setup for binaries
//! - `ImageLoadMetrics` - Per-variant success counters

mod logging;
mod metrics;
mod session;

pub use logging::*;
pub use metrics::*;
pub use session::*;
