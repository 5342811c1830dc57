//! Fuzz target for public key extraction.
//!
//! Any blob either yields nothing or a public key that is itself valid and
//! maps to itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use snk_core::blob::{is_valid_public_key, try_get_public_key};

fuzz_target!(|data: &[u8]| {
    if let Some(public_key) = try_get_public_key(data) {
        assert!(is_valid_public_key(&public_key));
        assert_eq!(try_get_public_key(&public_key).as_deref(), Some(public_key.as_slice()));
    }
});
