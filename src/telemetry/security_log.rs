//! Security audit logging for key handling.
//!
//! SECURITY: key files and public-key strings come from project files and
//! command lines that may be attacker-controlled. Every rejection is logged
//! as a structured event so corrupted or hostile key material is visible.

use std::time::{SystemTime, UNIX_EPOCH};

/// Security event types for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEvent {
    /// Key pair loaded with private material.
    KeyPairLoaded,
    /// Public key accepted.
    PublicKeyAccepted,
    /// Bytes offered as a key were rejected.
    KeyMaterialRejected,
    /// Key file refused because of its size.
    KeyFileTooLarge,
}

impl SecurityEvent {
    /// Get the severity level for this event.
    pub fn severity(&self) -> SecuritySeverity {
        match self {
            Self::KeyPairLoaded => SecuritySeverity::Info,
            Self::PublicKeyAccepted => SecuritySeverity::Debug,
            Self::KeyMaterialRejected => SecuritySeverity::Warning,
            Self::KeyFileTooLarge => SecuritySeverity::Warning,
        }
    }

    /// Get a string representation of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyPairLoaded => "key_pair_loaded",
            Self::PublicKeyAccepted => "public_key_accepted",
            Self::KeyMaterialRejected => "key_material_rejected",
            Self::KeyFileTooLarge => "key_file_too_large",
        }
    }
}

/// Severity levels for security events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecuritySeverity {
    Debug,
    Info,
    Warning,
}

impl SecuritySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

/// Format a security event as a single structured line.
pub fn format_security_event(
    timestamp: u64,
    event: SecurityEvent,
    message: &str,
    details: &[(&str, &str)],
) -> String {
    let details_str = details
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");

    if details_str.is_empty() {
        format!(
            "[{}] SECURITY {} {}: {}",
            timestamp,
            event.severity().as_str(),
            event.as_str(),
            message
        )
    } else {
        format!(
            "[{}] SECURITY {} {}: {} | {}",
            timestamp,
            event.severity().as_str(),
            event.as_str(),
            message,
            details_str
        )
    }
}

/// Log a security event with structured data.
///
/// # Arguments
/// * `event` - The type of security event
/// * `message` - Human-readable description
/// * `details` - Additional structured details as key-value pairs
///
/// # Example
/// ```
/// use snk_core::telemetry::{log_security_event, SecurityEvent};
///
/// log_security_event(
///     SecurityEvent::KeyMaterialRejected,
///     "Key file does not contain a usable key",
///     &[("path", "MyKey.snk"), ("reason", "Key blob is empty")]
/// );
/// ```
pub fn log_security_event(event: SecurityEvent, message: &str, details: &[(&str, &str)]) {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let log_line = format_security_event(timestamp, event, message, details);

    match event.severity() {
        SecuritySeverity::Debug => tracing::debug!(event = event.as_str(), "{}", log_line),
        SecuritySeverity::Info => tracing::info!(event = event.as_str(), "{}", log_line),
        SecuritySeverity::Warning => tracing::warn!(event = event.as_str(), "{}", log_line),
    }
}

/// Convenience macro for logging security events.
#[macro_export]
macro_rules! security_log {
    ($event:expr, $message:expr) => {
        $crate::telemetry::log_security_event($event, $message, &[])
    };
    ($event:expr, $message:expr, $($key:expr => $value:expr),+) => {
        $crate::telemetry::log_security_event(
            $event,
            $message,
            &[$(($key, $value)),+]
        )
    };
}
