//! Fuzz target for detailed key parsing with a structured CAPI header.
//!
//! Random bytes almost never get past the blob header, so the header fields
//! are generated separately and followed by arbitrary key data.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use snk_core::blob::{try_get_public_key, try_parse_key, RsaKeyParameters};

#[derive(Debug, Arbitrary)]
struct KeyBlobInput {
    private: bool,
    key_exchange: bool,
    bit_len: u16,
    pub_exp: u32,
    key_data: Vec<u8>,
}

fuzz_target!(|input: KeyBlobInput| {
    let mut blob = Vec::with_capacity(20 + input.key_data.len());
    blob.push(if input.private { 0x07 } else { 0x06 });
    blob.push(0x02);
    blob.extend_from_slice(&[0, 0]);
    let alg: u32 = if input.key_exchange { 0xA400 } else { 0x2400 };
    blob.extend_from_slice(&alg.to_le_bytes());
    blob.extend_from_slice(if input.private { b"RSA2" } else { b"RSA1" });
    blob.extend_from_slice(&u32::from(input.bit_len).to_le_bytes());
    blob.extend_from_slice(&input.pub_exp.to_le_bytes());
    blob.extend_from_slice(&input.key_data);

    let parsed = try_parse_key(&blob);
    assert_eq!(parsed.is_ok(), try_get_public_key(&blob).is_some());
    if let Ok(parsed) = parsed {
        assert_eq!(parsed.private_key.is_some(), input.private);
        let _ = RsaKeyParameters::from_public_key(&parsed.public_key);
    }
});
