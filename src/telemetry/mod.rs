//! Telemetry module for snk-core.
//!
//! Provides structured logging, spans for key operations, and security
//! event logging. All output goes to stderr or a log file.

mod logging;
pub mod security_log;
mod spans;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
pub use security_log::{log_security_event, SecurityEvent, SecuritySeverity};
pub use spans::{KeySpan, SpanExt};
