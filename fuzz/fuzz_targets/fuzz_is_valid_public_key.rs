//! Fuzz target for public key validation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use snk_core::blob::{is_valid_public_key, try_get_public_key};

fuzz_target!(|data: &[u8]| {
    // A valid public key is returned unchanged.
    if is_valid_public_key(data) {
        assert_eq!(try_get_public_key(data).as_deref(), Some(data));
    }
});
