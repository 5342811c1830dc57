//! Malformed Key Blob Tests
//!
//! Tests for corrupted headers, hostile length fields and mutation sweeps.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snk_core::blob::{
    check_public_key, is_valid_public_key, try_get_public_key, try_parse_key, BlobError,
    RsaKeyParameters,
};

const KEY_PAIR: &[u8] = include_bytes!("../../fixtures/keys/KeyPair.snk");
const PUBLIC_KEY: &[u8] = include_bytes!("../../fixtures/keys/PublicKey.snk");

fn with_u32(blob: &[u8], offset: usize, value: u32) -> Vec<u8> {
    let mut out = blob.to_vec();
    out[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    out
}

/// Huge bit length must not overflow size arithmetic.
#[test]
fn reject_huge_bit_length() {
    for bits in [u32::MAX, 0xFFFF_FFF8, 0x8000_0000] {
        let blob = with_u32(KEY_PAIR, 12, bits);
        assert!(try_get_public_key(&blob).is_none(), "bitlen {:#x}", bits);
        assert!(try_parse_key(&blob).is_err());
    }
}

/// Bit length of zero or not a multiple of eight.
#[test]
fn reject_odd_bit_length() {
    for bits in [0u32, 1, 7, 1023, 1025] {
        let blob = with_u32(KEY_PAIR, 12, bits);
        assert_eq!(try_parse_key(&blob).unwrap_err(), BlobError::InvalidBitLength(bits));
    }
}

/// Bit length that disagrees with the actual blob size.
#[test]
fn reject_bit_length_mismatch() {
    let blob = with_u32(KEY_PAIR, 12, 2048);
    assert!(matches!(
        try_parse_key(&blob),
        Err(BlobError::LengthMismatch { declared: 1172, actual: 596 })
    ));
}

/// Only version 2 blobs are accepted.
#[test]
fn reject_wrong_version() {
    let mut blob = KEY_PAIR.to_vec();
    blob[1] = 3;
    assert_eq!(try_parse_key(&blob).unwrap_err(), BlobError::UnsupportedVersion(3));
}

/// aiKeyAlg must name an RSA algorithm.
#[test]
fn reject_non_rsa_algorithm() {
    let blob = with_u32(KEY_PAIR, 4, 0x8004);
    assert_eq!(try_parse_key(&blob).unwrap_err(), BlobError::UnsupportedAlgorithm(0x8004));
}

/// Key exchange keys are still RSA keys.
#[test]
fn accept_key_exchange_algorithm() {
    let blob = with_u32(KEY_PAIR, 4, 0xA400);
    let public_key = try_get_public_key(&blob).unwrap();
    assert_eq!(&public_key[16..20], &0xA400u32.to_le_bytes());
    assert!(is_valid_public_key(&public_key));
}

/// A private blob labelled RSA1 or a public blob labelled RSA2.
#[test]
fn reject_swapped_magic() {
    let pair = with_u32(KEY_PAIR, 8, 0x3141_5352);
    assert!(matches!(try_parse_key(&pair), Err(BlobError::BadMagic { .. })));

    let public_key = with_u32(PUBLIC_KEY, 20, 0x3241_5352);
    assert!(matches!(check_public_key(&public_key), Err(BlobError::BadMagic { .. })));
}

/// Public key header claiming a private blob.
#[test]
fn reject_private_type_in_public_key() {
    let mut key = PUBLIC_KEY.to_vec();
    key[12] = 0x07;
    assert_eq!(check_public_key(&key).unwrap_err(), BlobError::UnknownBlobType(0x07));
    assert!(try_get_public_key(&key).is_none());
}

/// CbPublicKey near u32::MAX must not overflow.
#[test]
fn reject_hostile_cb_public_key() {
    for cb in [u32::MAX, u32::MAX - 11, 0] {
        let key = with_u32(PUBLIC_KEY, 8, cb);
        assert!(!is_valid_public_key(&key), "cb {:#x}", cb);
    }
}

/// Signature algorithm of the wrong class.
#[test]
fn reject_wrong_signature_class() {
    let key = with_u32(PUBLIC_KEY, 0, 0x8004);
    assert!(matches!(check_public_key(&key), Err(BlobError::InvalidHeader(_))));
}

/// Zero algorithm ids in the strong-name header are tolerated.
#[test]
fn accept_zero_header_algorithms() {
    let key = with_u32(&with_u32(PUBLIC_KEY, 0, 0), 4, 0);
    assert!(is_valid_public_key(&key));
}

/// Flipping any single header byte never panics.
#[test]
fn header_byte_flip_sweep() {
    for blob in [KEY_PAIR, PUBLIC_KEY] {
        for index in 0..32 {
            for mask in [0x01u8, 0x80, 0xFF] {
                let mut mutated = blob.to_vec();
                mutated[index] ^= mask;
                let _ = is_valid_public_key(&mutated);
                let _ = try_get_public_key(&mutated);
                let _ = try_parse_key(&mutated);
                let _ = RsaKeyParameters::from_capi_blob(&mutated);
            }
        }
    }
}

/// Random blobs with a plausible header never panic.
#[test]
fn random_blobs_do_not_panic() {
    let mut rng = StdRng::seed_from_u64(0x5DEE_CE66D);
    for _ in 0..2000 {
        let len = rng.gen_range(0..700);
        let mut blob = vec![0u8; len];
        rng.fill(blob.as_mut_slice());
        if blob.len() >= 20 && rng.gen_bool(0.5) {
            blob[..20].copy_from_slice(&KEY_PAIR[..20]);
        }
        let _ = is_valid_public_key(&blob);
        let _ = try_get_public_key(&blob);
        let _ = try_parse_key(&blob);
    }
}

/// Every accepted public key, however its header bytes are mutated, yields
/// RSA parameters.
#[test]
fn accepted_public_keys_always_decode() {
    let mut rng = StdRng::seed_from_u64(0x0bad_5eed);
    let mut accepted = 0;
    for _ in 0..4000 {
        let mut key = PUBLIC_KEY.to_vec();
        for _ in 0..rng.gen_range(1..4) {
            let index = rng.gen_range(0..32);
            key[index] = rng.gen();
        }
        if !is_valid_public_key(&key) {
            continue;
        }
        accepted += 1;
        let params = RsaKeyParameters::from_public_key(&key)
            .unwrap_or_else(|e| panic!("accepted key {} has no parameters: {}", hex::encode(&key[..32]), e));
        assert_eq!(params.modulus().len() * 8, params.bit_len() as usize);
    }
    assert!(accepted > 0);
}

/// Header fields that validation ignores do not affect decoding.
#[test]
fn ignored_header_fields_still_decode() {
    // bVersion, reserved, aiKeyAlg
    for index in [13usize, 14, 15, 16, 17, 18, 19] {
        for value in [0x00u8, 0x01, 0x7F, 0xFF] {
            let mut key = PUBLIC_KEY.to_vec();
            key[index] = value;
            assert!(is_valid_public_key(&key), "byte {} = {:#x}", index, value);
            let params = RsaKeyParameters::from_public_key(&key).unwrap();
            assert_eq!(params.bit_len(), 1024);
        }
    }
}
