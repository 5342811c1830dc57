// Copyright 2024-2026 snk-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for snk-core commands.
//!
//! Every command works on local files or arguments only and reports its
//! outcome through the process exit code.
//!
//! ## Usage
//!
//! ```bash
//! snk-core-cli extract KeyPair.snk --out PublicKey.snk
//! snk-core-cli token KeyPair.snk
//! snk-core-cli inspect KeyPair.snk --json
//! snk-core-cli check 0024000004800000...
//! ```

pub mod config_cmd;
pub mod key_cmd;

pub use key_cmd::{run_check, run_extract, run_inspect, run_token, KeyReport};

use crate::keys::KeyError;

/// Exit code: success.
pub const EXIT_OK: i32 = 0;
/// Exit code: key material is not usable.
pub const EXIT_INVALID_KEY: i32 = 1;
/// Exit code: bad usage or configuration.
pub const EXIT_USAGE: i32 = 2;
/// Exit code: the key file could not be found or read.
pub const EXIT_IO: i32 = 3;

/// Map a key error to the process exit code reported for it.
pub fn exit_code_for(error: &KeyError) -> i32 {
    match error {
        KeyError::NotFound(_) | KeyError::Io(_) => EXIT_IO,
        KeyError::TooLarge { .. }
        | KeyError::InvalidKeyFile { .. }
        | KeyError::InvalidPublicKey(_)
        | KeyError::InvalidPublicKeyString(_) => EXIT_INVALID_KEY,
    }
}

/// Return the value following `flag` in `args`, if present.
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

/// Return `true` if `flag` appears in `args`.
pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
