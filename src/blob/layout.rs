//! Wire layout of CAPI key blobs and the strong-name public-key header.
//!
//! All multi-byte fields are little-endian. Structures are decoded with sized
//! reads through [`ByteReader`], never by reinterpreting memory, so a short
//! buffer surfaces as `None` instead of an out-of-bounds read.
//!
//! ```text
//! strong-name public key        CAPI PUBLICKEYBLOB / PRIVATEKEYBLOB
//! +----------------------+      +-------+---------+----------+--------+
//! | SigAlgId   u32       |      | bType | bVersion| reserved | aiKeyAlg|  BLOBHEADER (8)
//! | HashAlgId  u32       |      +-------+---------+----------+--------+
//! | CbPublicKey u32      |      | magic | bitlen  | pubexp            |  RSAPUBKEY (12)
//! +----------------------+      +-----------------------------------+
//! | CAPI PUBLICKEYBLOB   |      | modulus [+ private components]     |
//! +----------------------+      +-----------------------------------+
//! ```

/// Size of the strong-name header preceding a CAPI public-key blob.
pub const PUBLIC_KEY_HEADER_SIZE: usize = 12;

/// Size of the CAPI `BLOBHEADER` structure.
pub const BLOB_HEADER_SIZE: usize = 8;

/// Size of the CAPI `RSAPUBKEY` structure.
pub const RSA_PUB_KEY_SIZE: usize = 12;

/// Offset of the modulus within a CAPI blob.
pub const OFFSET_TO_KEY_DATA: usize = BLOB_HEADER_SIZE + RSA_PUB_KEY_SIZE;

/// Smallest strong-name public key: headers plus one byte of modulus.
pub const MIN_PUBLIC_KEY_SIZE: usize = PUBLIC_KEY_HEADER_SIZE + OFFSET_TO_KEY_DATA + 1;

/// `bType` of a CAPI public-key blob.
pub const PUBLIC_KEY_BLOB_ID: u8 = 0x06;

/// `bType` of a CAPI private-key (key pair) blob.
pub const PRIVATE_KEY_BLOB_ID: u8 = 0x07;

/// The only `bVersion` written by CAPI for RSA blobs.
pub const BLOB_VERSION: u8 = 0x02;

/// `RSA1`: RSAPUBKEY magic of a public key.
pub const RSA1_MAGIC: u32 = 0x3141_5352;

/// `RSA2`: RSAPUBKEY magic of a key pair.
pub const RSA2_MAGIC: u32 = 0x3241_5352;

/// The ECMA neutral public key. Does not follow the CAPI layout but is
/// accepted everywhere a public key is.
pub const ECMA_KEY: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0];

/// CAPI `ALG_ID` values used by strong-name keys.
pub mod alg_id {
    pub const CALG_RSA_SIGN: u32 = 0x0000_2400;
    pub const CALG_RSA_KEYX: u32 = 0x0000_A400;
    pub const CALG_SHA1: u32 = 0x0000_8004;
}

/// Algorithm class encoded in bits 13..16 of an `ALG_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmClass {
    Signature,
    Encrypt,
    Hash,
    KeyExchange,
    Other(u32),
}

impl AlgorithmClass {
    pub fn of(alg_id: u32) -> Self {
        match (alg_id >> 13) & 7 {
            1 => Self::Signature,
            3 => Self::Encrypt,
            4 => Self::Hash,
            5 => Self::KeyExchange,
            other => Self::Other(other),
        }
    }
}

/// Sub-identifier in the low byte of an `ALG_ID`.
pub fn algorithm_sub_id(alg_id: u32) -> u32 {
    alg_id & 0xFF
}

/// Sub-id of SHA-1 within the hash class. Weaker hashes sort below it.
pub const SHA1_HASH_SUB_ID: u32 = 4;

/// Bounds-checked little-endian reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    pub(crate) fn read_u8(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    pub(crate) fn read_u16_le(&mut self) -> Option<u16> {
        let b = self.read_bytes(2)?;
        Some(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_u32_le(&mut self) -> Option<u32> {
        let b = self.read_bytes(4)?;
        Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// The 12-byte header that turns a CAPI public key into a strong-name key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnPublicKeyHeader {
    pub sig_alg_id: u32,
    pub hash_alg_id: u32,
    /// Length of the CAPI blob that follows the header.
    pub cb_public_key: u32,
}

impl SnPublicKeyHeader {
    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Option<Self> {
        Some(Self {
            sig_alg_id: reader.read_u32_le()?,
            hash_alg_id: reader.read_u32_le()?,
            cb_public_key: reader.read_u32_le()?,
        })
    }

    pub(crate) fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.sig_alg_id.to_le_bytes());
        buf.extend_from_slice(&self.hash_alg_id.to_le_bytes());
        buf.extend_from_slice(&self.cb_public_key.to_le_bytes());
    }
}

/// CAPI `BLOBHEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobHeader {
    pub blob_type: u8,
    pub version: u8,
    pub reserved: u16,
    pub alg_id: u32,
}

impl BlobHeader {
    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Option<Self> {
        Some(Self {
            blob_type: reader.read_u8()?,
            version: reader.read_u8()?,
            reserved: reader.read_u16_le()?,
            alg_id: reader.read_u32_le()?,
        })
    }

    pub(crate) fn write(&self, buf: &mut Vec<u8>) {
        buf.push(self.blob_type);
        buf.push(self.version);
        buf.extend_from_slice(&self.reserved.to_le_bytes());
        buf.extend_from_slice(&self.alg_id.to_le_bytes());
    }
}

/// CAPI `RSAPUBKEY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPubKey {
    pub magic: u32,
    pub bit_len: u32,
    pub pub_exp: u32,
}

impl RsaPubKey {
    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Option<Self> {
        Some(Self {
            magic: reader.read_u32_le()?,
            bit_len: reader.read_u32_le()?,
            pub_exp: reader.read_u32_le()?,
        })
    }

    pub(crate) fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.magic.to_le_bytes());
        buf.extend_from_slice(&self.bit_len.to_le_bytes());
        buf.extend_from_slice(&self.pub_exp.to_le_bytes());
    }

    /// Modulus length in bytes, if the bit length is a non-zero multiple of 8.
    pub fn modulus_len(&self) -> Option<usize> {
        if self.bit_len == 0 || self.bit_len % 8 != 0 {
            return None;
        }
        usize::try_from(self.bit_len / 8).ok()
    }
}

/// Size of one CRT component (P, Q, DP, DQ, InverseQ) for a modulus length.
pub fn half_len(modulus_len: usize) -> usize {
    modulus_len / 2 + modulus_len % 2
}

/// Exact length of a CAPI private-key blob for a modulus length.
///
/// Layout: headers, modulus, five half-length CRT values, private exponent.
pub fn private_key_blob_len(modulus_len: usize) -> Option<usize> {
    let half = half_len(modulus_len);
    half.checked_mul(5)?
        .checked_add(modulus_len.checked_mul(2)?)?
        .checked_add(OFFSET_TO_KEY_DATA)
}

/// Exact length of a CAPI public-key blob for a modulus length.
pub fn public_key_blob_len(modulus_len: usize) -> Option<usize> {
    modulus_len.checked_add(OFFSET_TO_KEY_DATA)
}
