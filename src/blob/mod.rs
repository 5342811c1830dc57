//! Strong-name key blob codec.
//!
//! Parses legacy CAPI key blobs (`.snk` key pairs and public keys) and
//! extracts the strong-name public key they carry.
//!
//! # Security
//! - Input is untrusted: every read is bounds-checked, every size is checked
//!   arithmetic, and rejection is a return value, never a panic
//! - Input is borrowed and never mutated; outputs are freshly allocated
//! - Private key components are zeroized when dropped

mod error;
pub mod layout;
mod parser;
mod rsa;

pub use error::BlobError;
pub use layout::{ECMA_KEY, MIN_PUBLIC_KEY_SIZE, PUBLIC_KEY_HEADER_SIZE};
pub use parser::{
    check_public_key, is_valid_public_key, try_get_public_key, try_parse_key, KeyBlobKind,
    ParsedKey,
};
pub use rsa::{exponent_as_bytes, RsaKeyParameters, RsaPrivateParameters};
