//! Strong-name keys as a compiler consumes them.
//!
//! Loads key files from disk, accepts public keys given as bytes or hex
//! strings, and derives the public-key token. Every failure is a
//! [`KeyError`] value for the caller to report; untrusted key material never
//! causes a panic.

mod resolve;
mod token;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::blob::{check_public_key, try_parse_key, BlobError, KeyBlobKind, RsaKeyParameters};
use crate::telemetry::{log_security_event, SecurityEvent};

pub use resolve::resolve_key_file;
pub use token::{
    decode_public_key_string, is_valid_public_key_string, public_key_token,
    PUBLIC_KEY_TOKEN_SIZE,
};

/// Default upper bound on key file size. A 16384-bit key pair is ~18 KiB.
pub const DEFAULT_MAX_KEY_FILE_SIZE: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Key file not found: {0}")]
    NotFound(PathBuf),

    #[error("Key file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: usize },

    #[error("Invalid key file {path}: {source}")]
    InvalidKeyFile {
        path: PathBuf,
        #[source]
        source: BlobError,
    },

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(#[from] BlobError),

    #[error("Invalid public key string: {0}")]
    InvalidPublicKeyString(#[from] hex::FromHexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key loading configuration.
#[derive(Debug, Clone)]
pub struct KeyConfig {
    /// Files larger than this are refused without being read.
    pub max_key_file_size: usize,
    /// Directory relative key paths are resolved against first.
    pub base_dir: Option<PathBuf>,
    /// Further directories tried, in order, for relative key paths.
    pub search_paths: Vec<PathBuf>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            max_key_file_size: DEFAULT_MAX_KEY_FILE_SIZE,
            base_dir: None,
            search_paths: Vec::new(),
        }
    }
}

/// A strong-name public key, its token, and the private key when known.
#[derive(Debug, Clone)]
pub struct StrongNameKeys {
    kind: KeyBlobKind,
    public_key: Vec<u8>,
    token: [u8; PUBLIC_KEY_TOKEN_SIZE],
    private_key: Option<RsaKeyParameters>,
    key_file_path: Option<PathBuf>,
}

impl StrongNameKeys {
    /// Loads a key pair or public key from a file.
    pub fn from_key_file(path: &Path, config: &KeyConfig) -> Result<Self, KeyError> {
        let resolved =
            resolve_key_file(path, config.base_dir.as_deref(), &config.search_paths)
                .ok_or_else(|| KeyError::NotFound(path.to_path_buf()))?;
        let display = resolved.display().to_string();

        let bytes = read_bounded(&resolved, config.max_key_file_size).map_err(|e| {
            if let KeyError::TooLarge { size, max } = &e {
                let (size, max) = (size.to_string(), max.to_string());
                log_security_event(
                    SecurityEvent::KeyFileTooLarge,
                    "Key file exceeds size limit",
                    &[("path", display.as_str()), ("size", size.as_str()), ("max", max.as_str())],
                );
            }
            e
        })?;

        let parsed = try_parse_key(&bytes).map_err(|source| {
            let reason = source.to_string();
            log_security_event(
                SecurityEvent::KeyMaterialRejected,
                "Key file does not contain a usable key",
                &[("path", display.as_str()), ("reason", reason.as_str())],
            );
            KeyError::InvalidKeyFile { path: resolved.clone(), source }
        })?;

        let event = if parsed.private_key.is_some() {
            SecurityEvent::KeyPairLoaded
        } else {
            SecurityEvent::PublicKeyAccepted
        };
        log_security_event(
            event,
            "Strong-name key loaded",
            &[("path", display.as_str()), ("kind", parsed.kind.as_str())],
        );

        let token = public_key_token(&parsed.public_key);
        Ok(Self {
            kind: parsed.kind,
            public_key: parsed.public_key,
            token,
            private_key: parsed.private_key,
            key_file_path: Some(resolved),
        })
    }

    /// Wraps an existing strong-name public key.
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, KeyError> {
        if let Err(e) = check_public_key(public_key) {
            let reason = e.to_string();
            crate::security_log!(
                SecurityEvent::KeyMaterialRejected,
                "Public key rejected",
                "reason" => reason.as_str()
            );
            return Err(e.into());
        }
        let parsed = try_parse_key(public_key)?;
        Ok(Self {
            kind: parsed.kind,
            token: public_key_token(&parsed.public_key),
            public_key: parsed.public_key,
            private_key: None,
            key_file_path: None,
        })
    }

    /// Wraps a public key given as a hex string.
    pub fn from_public_key_string(text: &str) -> Result<Self, KeyError> {
        let bytes = decode_public_key_string(text)?;
        Self::from_public_key(&bytes)
    }

    pub fn kind(&self) -> KeyBlobKind {
        self.kind
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn public_key_token(&self) -> [u8; PUBLIC_KEY_TOKEN_SIZE] {
        self.token
    }

    pub fn public_key_token_hex(&self) -> String {
        hex::encode(self.token)
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn private_key(&self) -> Option<&RsaKeyParameters> {
        self.private_key.as_ref()
    }

    /// Resolved path the key was loaded from, if it came from a file.
    pub fn key_file_path(&self) -> Option<&Path> {
        self.key_file_path.as_deref()
    }
}

/// Reads a file, refusing it if it is larger than `max` bytes.
fn read_bounded(path: &Path, max: usize) -> Result<Vec<u8>, KeyError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > max as u64 {
        return Err(KeyError::TooLarge { size, max });
    }

    // The file may grow between stat and read; never take more than max + 1.
    let mut bytes = Vec::with_capacity(size as usize);
    file.take((max as u64).saturating_add(1)).read_to_end(&mut bytes)?;
    if bytes.len() > max {
        return Err(KeyError::TooLarge { size: bytes.len() as u64, max });
    }
    Ok(bytes)
}
