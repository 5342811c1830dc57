//! Spans for key operations.

use tracing::{info_span, Span};

/// Extension trait for filling in key operation spans.
pub trait SpanExt {
    /// Record `status` and, on failure, `error.message`.
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display;

    /// Record what kind of key was loaded and its token.
    fn record_key(&self, kind: &str, token: &str);
}

impl SpanExt for Span {
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(_) => {
                self.record("status", "ok");
            }
            Err(e) => {
                self.record("status", "error");
                self.record("error.message", e.to_string().as_str());
            }
        }
    }

    fn record_key(&self, kind: &str, token: &str) {
        self.record("key.kind", kind);
        self.record("key.token", token);
    }
}

/// Factory for key operation spans.
pub struct KeySpan;

impl KeySpan {
    /// Create a span for one key operation.
    ///
    /// `operation` is the CLI command; `source` is the key file path, or `-`
    /// for keys given inline. `status`, `error.message`, `key.kind` and
    /// `key.token` start empty and are filled in through [`SpanExt`].
    pub fn new(operation: &str, source: &str) -> Span {
        info_span!(
            "key_operation",
            operation = %operation,
            source = %source,
            status = tracing::field::Empty,
            error.message = tracing::field::Empty,
            key.kind = tracing::field::Empty,
            key.token = tracing::field::Empty,
        )
    }
}
