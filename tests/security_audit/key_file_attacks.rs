//! Key File Attack Tests
//!
//! Oversized, truncated and substituted key files.

use std::fs;
use std::path::Path;

use snk_core::keys::{KeyConfig, KeyError, StrongNameKeys};
use tempfile::TempDir;

const KEY_PAIR: &[u8] = include_bytes!("../../fixtures/keys/KeyPair.snk");

/// Oversized file refused before parsing.
#[test]
fn reject_oversized_key_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.snk");
    fs::write(&path, vec![0x07u8; 1024 * 1024]).unwrap();

    let result = StrongNameKeys::from_key_file(&path, &KeyConfig::default());
    assert!(matches!(result, Err(KeyError::TooLarge { .. })));
}

/// Truncated key pair is rejected, not padded.
#[test]
fn reject_truncated_key_pair() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.snk");
    fs::write(&path, &KEY_PAIR[..KEY_PAIR.len() - 1]).unwrap();

    let result = StrongNameKeys::from_key_file(&path, &KeyConfig::default());
    assert!(matches!(result, Err(KeyError::InvalidKeyFile { .. })));
}

/// A directory named like a key file is not a key file.
#[test]
fn reject_directory_as_key_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dir.snk");
    fs::create_dir(&path).unwrap();

    let result = StrongNameKeys::from_key_file(&path, &KeyConfig::default());
    assert!(matches!(result, Err(KeyError::NotFound(_))));
}

/// Parent-relative names resolve only to files that exist.
#[test]
fn traversal_name_without_target() {
    let dir = TempDir::new().unwrap();
    let config = KeyConfig {
        base_dir: Some(dir.path().to_path_buf()),
        ..KeyConfig::default()
    };
    let result = StrongNameKeys::from_key_file(Path::new("../../no-such-key.snk"), &config);
    assert!(matches!(result, Err(KeyError::NotFound(_))));
}

/// Error messages name the file but never include key bytes.
#[test]
fn error_does_not_echo_key_material() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.snk");
    let mut blob = KEY_PAIR.to_vec();
    blob[8..12].copy_from_slice(b"RSA1");
    fs::write(&path, &blob).unwrap();

    let err = StrongNameKeys::from_key_file(&path, &KeyConfig::default()).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("bad.snk"));
    assert!(!text.contains(&hex::encode(&KEY_PAIR[20..28])));
}

/// Private parameters never appear in debug output.
#[test]
fn debug_output_redacts_private_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("KeyPair.snk");
    fs::write(&path, KEY_PAIR).unwrap();

    let keys = StrongNameKeys::from_key_file(&path, &KeyConfig::default()).unwrap();
    let private = keys.private_key().unwrap().private().unwrap();
    let text = format!("{:?}", private);
    assert!(text.contains("modulus_bytes"));
    assert!(!text.contains(&format!("{:?}", &private.p[..4])));
}
