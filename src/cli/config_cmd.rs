// Copyright 2024-2026 snk-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults, validate.
//!
//! These commands read configuration directly from environment variables.

use tracing_subscriber::EnvFilter;

use crate::cli::{EXIT_OK, EXIT_USAGE};
use crate::config::{self, EffectiveConfig, MAX_KEY_FILE_SIZE, MIN_KEY_FILE_SIZE};
use crate::keys::DEFAULT_MAX_KEY_FILE_SIZE;
use crate::telemetry::LogFormat;

/// Print effective config as key-value pairs to stdout.
pub fn run_show() {
    let cfg = config::load().effective_config();
    println!("{}", format_config(&cfg));
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    println!("SNK_CORE_MAX_KEY_FILE_SIZE={}", DEFAULT_MAX_KEY_FILE_SIZE);
    println!("SNK_CORE_KEY_SEARCH_PATHS=");
    println!("SNK_CORE_LOG_LEVEL=warn");
    println!("SNK_CORE_LOG_FORMAT=pretty");
    println!("SNK_CORE_LOG_FILE=");
}

/// Validate configuration for obvious misconfigurations.
///
/// Returns 0 if valid, 2 if any warnings are found.
pub fn run_validate() -> i32 {
    let warnings = collect_warnings();
    for warning in &warnings {
        eprintln!("WARNING: {}", warning);
    }

    if warnings.is_empty() {
        println!("Configuration is valid.");
        EXIT_OK
    } else {
        EXIT_USAGE
    }
}

/// Check raw environment values and the effective configuration.
///
/// Values that `config::load` silently replaces with defaults are reported
/// here so that typos do not go unnoticed.
pub fn collect_warnings() -> Vec<String> {
    let mut warnings = Vec::new();

    if let Ok(raw) = std::env::var("SNK_CORE_MAX_KEY_FILE_SIZE") {
        match raw.trim().parse::<usize>() {
            Ok(n) if n < MIN_KEY_FILE_SIZE => warnings.push(format!(
                "SNK_CORE_MAX_KEY_FILE_SIZE ({}) is below the minimum of {}",
                n, MIN_KEY_FILE_SIZE
            )),
            Ok(n) if n > MAX_KEY_FILE_SIZE => warnings.push(format!(
                "SNK_CORE_MAX_KEY_FILE_SIZE ({}) is above the maximum of {}",
                n, MAX_KEY_FILE_SIZE
            )),
            Ok(_) => {}
            Err(_) => warnings.push(format!(
                "SNK_CORE_MAX_KEY_FILE_SIZE ({:?}) is not a number",
                raw
            )),
        }
    }

    if let Ok(raw) = std::env::var("SNK_CORE_LOG_FORMAT") {
        if raw.parse::<LogFormat>().is_err() {
            warnings.push(format!(
                "SNK_CORE_LOG_FORMAT ({:?}) must be 'json' or 'pretty'",
                raw
            ));
        }
    }

    let env = config::load();
    if EnvFilter::try_new(&env.log.level).is_err() {
        warnings.push(format!(
            "SNK_CORE_LOG_LEVEL ({:?}) is not a valid filter",
            env.log.level
        ));
    }

    for dir in &env.keys.search_paths {
        if !dir.is_dir() {
            warnings.push(format!(
                "SNK_CORE_KEY_SEARCH_PATHS entry {} is not a directory",
                dir.display()
            ));
        }
    }

    if let Some(parent) = env.log.output_path.as_ref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            warnings.push(format!(
                "SNK_CORE_LOG_FILE directory {} does not exist",
                parent.display()
            ));
        }
    }

    warnings
}

fn format_config(cfg: &EffectiveConfig) -> String {
    [
        format!("SNK_CORE_MAX_KEY_FILE_SIZE={}", cfg.max_key_file_size),
        format!("SNK_CORE_KEY_SEARCH_PATHS={}", cfg.key_search_paths.join(",")),
        format!("SNK_CORE_LOG_LEVEL={}", cfg.log_level),
        format!("SNK_CORE_LOG_FORMAT={}", cfg.log_format),
        format!("SNK_CORE_LOG_FILE={}", cfg.log_file.as_deref().unwrap_or("")),
    ]
    .join("\n")
}
