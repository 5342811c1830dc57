// Copyright 2024-2026 snk-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Key CLI subcommands: extract, token, inspect, check.
//!
//! These commands read key files from disk (or a hex string from the command
//! line) and never write private key material anywhere.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::blob::RsaKeyParameters;
use crate::cli::{exit_code_for, EXIT_INVALID_KEY, EXIT_IO, EXIT_OK};
use crate::keys::{KeyConfig, KeyError, StrongNameKeys};
use crate::telemetry::{KeySpan, SpanExt};

/// Summary of a key, as printed by `inspect`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeyReport {
    pub source: String,
    pub kind: String,
    pub bit_length: Option<u32>,
    pub exponent: Option<String>,
    pub public_key_token: String,
    pub public_key_size: usize,
    pub has_private_key: bool,
}

impl KeyReport {
    pub fn from_keys(source: &str, keys: &StrongNameKeys) -> Self {
        let params = match RsaKeyParameters::from_public_key(keys.public_key()) {
            Ok(params) => Some(params),
            Err(e) => {
                debug!(source, reason = %e, "no RSA parameters for key");
                None
            }
        };
        Self {
            source: source.to_string(),
            kind: keys.kind().as_str().to_string(),
            bit_length: params.as_ref().map(|p| p.bit_len()),
            exponent: params.as_ref().map(|p| hex::encode(p.exponent())),
            public_key_token: keys.public_key_token_hex(),
            public_key_size: keys.public_key().len(),
            has_private_key: keys.has_private_key(),
        }
    }
}

fn load(operation: &str, path: &Path, config: &KeyConfig) -> Result<StrongNameKeys, KeyError> {
    let source = path.display().to_string();
    let span = KeySpan::new(operation, &source);
    let _enter = span.enter();
    let result = StrongNameKeys::from_key_file(path, config);
    span.record_result(&result);
    if let Ok(keys) = &result {
        span.record_key(keys.kind().as_str(), &keys.public_key_token_hex());
    }
    result
}

fn report_error(error: &KeyError) -> i32 {
    eprintln!("Error: {}", error);
    exit_code_for(error)
}

/// Run `extract`: write the public key of `path` to `out`, or print it as hex.
///
/// Returns exit code: 0 on success, 1 on unusable key, 3 on I/O failure.
pub fn run_extract(path: &Path, out: Option<&Path>, config: &KeyConfig) -> i32 {
    let keys = match load("extract", path, config) {
        Ok(keys) => keys,
        Err(e) => return report_error(&e),
    };

    match out {
        Some(out) => match std::fs::write(out, keys.public_key()) {
            Ok(()) => {
                println!("Public key written to {}", out.display());
                EXIT_OK
            }
            Err(e) => {
                eprintln!("Error writing {}: {}", out.display(), e);
                EXIT_IO
            }
        },
        None => {
            println!("{}", hex::encode(keys.public_key()));
            EXIT_OK
        }
    }
}

/// Run `token`: print the public-key token of the key in `path`.
pub fn run_token(path: &Path, config: &KeyConfig) -> i32 {
    match load("token", path, config) {
        Ok(keys) => {
            println!("{}", keys.public_key_token_hex());
            EXIT_OK
        }
        Err(e) => report_error(&e),
    }
}

/// Run `inspect`: print a summary of the key in `path`.
pub fn run_inspect(path: &Path, json_output: bool, config: &KeyConfig) -> i32 {
    let keys = match load("inspect", path, config) {
        Ok(keys) => keys,
        Err(e) => return report_error(&e),
    };
    let report = KeyReport::from_keys(&path.display().to_string(), &keys);

    if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error formatting report: {}", e);
                return EXIT_INVALID_KEY;
            }
        }
    } else {
        print_report(&report);
    }
    EXIT_OK
}

/// Run `check`: validate a hex public-key string.
pub fn run_check(text: &str) -> i32 {
    let span = KeySpan::new("check", "-");
    let _enter = span.enter();
    let result = StrongNameKeys::from_public_key_string(text);
    span.record_result(&result);
    if let Ok(keys) = &result {
        span.record_key(keys.kind().as_str(), &keys.public_key_token_hex());
    }

    match result {
        Ok(keys) => {
            println!("Valid public key (token {})", keys.public_key_token_hex());
            EXIT_OK
        }
        Err(e) => report_error(&e),
    }
}

/// Format a report as aligned key-value lines.
pub fn format_report(report: &KeyReport) -> String {
    let mut lines = vec![
        format!("{:<18} {}", "Source:", report.source),
        format!("{:<18} {}", "Kind:", report.kind),
    ];
    if let Some(bits) = report.bit_length {
        lines.push(format!("{:<18} {}", "Bit length:", bits));
    }
    if let Some(exp) = &report.exponent {
        lines.push(format!("{:<18} 0x{}", "Exponent:", exp));
    }
    lines.push(format!("{:<18} {}", "Public key token:", report.public_key_token));
    lines.push(format!("{:<18} {} bytes", "Public key size:", report.public_key_size));
    lines.push(format!(
        "{:<18} {}",
        "Private key:",
        if report.has_private_key { "yes" } else { "no" }
    ));
    lines.join("\n")
}

fn print_report(report: &KeyReport) {
    println!("{}", format_report(report));
}
