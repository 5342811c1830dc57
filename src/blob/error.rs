//! Rejection reasons for key blobs.

use thiserror::Error;

/// Why a byte sequence was not accepted as key material.
///
/// These are values describing untrusted input, not failures of the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobError {
    #[error("Key blob is empty")]
    Empty,

    #[error("Key blob too short: {len} bytes (need at least {min})")]
    TooShort { len: usize, min: usize },

    #[error("Unknown key blob type: 0x{0:02x}")]
    UnknownBlobType(u8),

    #[error("Unsupported key blob version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unsupported key algorithm: 0x{0:08x}")]
    UnsupportedAlgorithm(u32),

    #[error("Bad RSA magic: 0x{found:08x} (expected 0x{expected:08x})")]
    BadMagic { found: u32, expected: u32 },

    #[error("Invalid key bit length: {0}")]
    InvalidBitLength(u32),

    #[error("Key blob length mismatch: {actual} bytes (header declares {declared})")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("Public key header rejected: {0}")]
    InvalidHeader(&'static str),
}
