//! snk-core: strong-name key blob codec
//!
//! Reads the binary key blobs used to strong-name .NET assemblies and derives
//! the public key a compiler embeds in an assembly manifest.
//!
//! # Accepted Inputs
//!
//! - **Strong-name public key**: 12-byte signature header followed by a CAPI
//!   `PUBLICKEYBLOB` (what `sn -p` writes)
//! - **Bare CAPI public blob**: the same blob without the header
//! - **Key pair**: CAPI `PRIVATEKEYBLOB` (what `sn -k` writes)
//! - **ECMA key**: the 16-byte placeholder standing for the framework key
//!
//! # Security Boundaries
//!
//! - All parsing is over borrowed byte slices with checked arithmetic
//! - Malformed input yields `false`, `None` or an error value, never a panic
//! - Private key material is zeroed on drop and never written out
//!
//! # Example
//!
//! ```
//! use snk_core::{is_valid_public_key, try_get_public_key, ECMA_KEY};
//!
//! assert!(is_valid_public_key(&ECMA_KEY));
//! assert!(try_get_public_key(&[]).is_none());
//! ```

pub mod blob;
pub mod cli;
pub mod config;
pub mod keys;
pub mod telemetry;

pub use blob::{
    is_valid_public_key, try_get_public_key, try_parse_key, BlobError, KeyBlobKind, ParsedKey,
    RsaKeyParameters, ECMA_KEY,
};
pub use keys::{public_key_token, KeyConfig, KeyError, StrongNameKeys};
