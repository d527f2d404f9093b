//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline stages produce:
//!     → logger.rs (key=value lines tagged with request id and module)
//!     → metrics.rs (response counters and latency histograms)
//!
//! Sinks:
//!     → logging.rs (tracing subscriber: console and rolling file appenders)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request id flows through every line a request produces
//! - The logger is built once and passed explicitly; nothing is looked up globally
//! - Metrics are cheap and disabled unless configured

pub mod logger;
pub mod logging;
pub mod metrics;

pub use logger::Logger;
