//! Fuzz target for hex public-key strings.

#![no_main]

use libfuzzer_sys::fuzz_target;
use snk_core::keys::{is_valid_public_key_string, StrongNameKeys};

fuzz_target!(|text: &str| {
    let valid = is_valid_public_key_string(text);
    assert_eq!(valid, StrongNameKeys::from_public_key_string(text).is_ok());
});
