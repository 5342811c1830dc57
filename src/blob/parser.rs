//! Key blob recognition and public-key derivation.
//!
//! Every entry point here accepts arbitrary, attacker-controlled bytes. The
//! predicates return `bool`/`Option`; the detailed forms return a
//! [`BlobError`] value naming the first check that failed. Nothing panics.

use tracing::debug;

use super::error::BlobError;
use super::layout::{
    alg_id, algorithm_sub_id, private_key_blob_len, public_key_blob_len, AlgorithmClass,
    BlobHeader, ByteReader, RsaPubKey, SnPublicKeyHeader, BLOB_VERSION, ECMA_KEY,
    MIN_PUBLIC_KEY_SIZE, OFFSET_TO_KEY_DATA, PRIVATE_KEY_BLOB_ID, PUBLIC_KEY_BLOB_ID,
    PUBLIC_KEY_HEADER_SIZE, RSA1_MAGIC, RSA2_MAGIC, SHA1_HASH_SUB_ID,
};
use super::rsa::RsaKeyParameters;

/// What a recognized key blob turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBlobKind {
    /// Strong-name public key (12-byte header + CAPI public key).
    StrongNamePublicKey,
    /// The 16-byte ECMA neutral key.
    EcmaKey,
    /// Bare CAPI `PUBLICKEYBLOB` without the strong-name header.
    CapiPublicKey,
    /// CAPI `PRIVATEKEYBLOB` holding a full RSA key pair.
    KeyPair,
}

impl KeyBlobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongNamePublicKey => "public_key",
            Self::EcmaKey => "ecma_key",
            Self::CapiPublicKey => "capi_public_key",
            Self::KeyPair => "key_pair",
        }
    }
}

/// Result of parsing a key blob.
#[derive(Debug, Clone)]
pub struct ParsedKey {
    pub kind: KeyBlobKind,
    /// Strong-name public key derived from (or equal to) the input.
    pub public_key: Vec<u8>,
    /// RSA private parameters, present only for key pairs.
    pub private_key: Option<RsaKeyParameters>,
}

/// A CAPI blob whose headers and total length have been checked.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CapiBlob<'a> {
    pub kind: KeyBlobKind,
    pub header: BlobHeader,
    pub rsa: RsaPubKey,
    pub modulus_len: usize,
    /// Everything after `RSAPUBKEY`: the modulus, then private components.
    pub key_data: &'a [u8],
}

impl<'a> CapiBlob<'a> {
    pub(crate) fn modulus(&self) -> &'a [u8] {
        &self.key_data[..self.modulus_len]
    }
}

/// Returns `true` if `blob` is a well-formed strong-name public key.
pub fn is_valid_public_key(blob: &[u8]) -> bool {
    check_public_key(blob).is_ok()
}

/// Validates a strong-name public key, reporting the first failed check.
pub fn check_public_key(blob: &[u8]) -> Result<(), BlobError> {
    if blob == ECMA_KEY.as_slice() {
        return Ok(());
    }
    if blob.is_empty() {
        return Err(BlobError::Empty);
    }
    if blob.len() < MIN_PUBLIC_KEY_SIZE {
        return Err(BlobError::TooShort { len: blob.len(), min: MIN_PUBLIC_KEY_SIZE });
    }

    let mut reader = ByteReader::new(blob);
    let too_short = BlobError::TooShort { len: blob.len(), min: MIN_PUBLIC_KEY_SIZE };
    let sn = SnPublicKeyHeader::read(&mut reader).ok_or_else(|| too_short.clone())?;

    let declared = usize::try_from(sn.cb_public_key)
        .ok()
        .and_then(|cb| cb.checked_add(PUBLIC_KEY_HEADER_SIZE))
        .unwrap_or(usize::MAX);
    if declared != blob.len() {
        return Err(BlobError::LengthMismatch { declared, actual: blob.len() });
    }

    if sn.sig_alg_id != 0 && AlgorithmClass::of(sn.sig_alg_id) != AlgorithmClass::Signature {
        return Err(BlobError::InvalidHeader("signature algorithm id is not of the signature class"));
    }
    if sn.hash_alg_id != 0
        && (AlgorithmClass::of(sn.hash_alg_id) != AlgorithmClass::Hash
            || algorithm_sub_id(sn.hash_alg_id) < SHA1_HASH_SUB_ID)
    {
        return Err(BlobError::InvalidHeader("hash algorithm is not SHA-1 or stronger"));
    }

    let header = BlobHeader::read(&mut reader).ok_or_else(|| too_short.clone())?;
    if header.blob_type != PUBLIC_KEY_BLOB_ID {
        return Err(BlobError::UnknownBlobType(header.blob_type));
    }

    let rsa = RsaPubKey::read(&mut reader).ok_or(too_short)?;
    if rsa.magic != RSA1_MAGIC {
        return Err(BlobError::BadMagic { found: rsa.magic, expected: RSA1_MAGIC });
    }

    let modulus_len = rsa.modulus_len().ok_or(BlobError::InvalidBitLength(rsa.bit_len))?;
    let expected = public_key_blob_len(modulus_len)
        .and_then(|len| len.checked_add(PUBLIC_KEY_HEADER_SIZE))
        .unwrap_or(usize::MAX);
    if expected != blob.len() {
        return Err(BlobError::LengthMismatch { declared: expected, actual: blob.len() });
    }

    Ok(())
}

/// Extracts the strong-name public key from `blob`.
///
/// A valid strong-name public key is returned unchanged. Key pairs and bare
/// CAPI public keys are converted. Anything else yields `None`.
pub fn try_get_public_key(blob: &[u8]) -> Option<Vec<u8>> {
    match parse(blob, false) {
        Ok(parsed) => Some(parsed.public_key),
        Err(e) => {
            debug!(len = blob.len(), reason = %e, "key blob rejected");
            None
        }
    }
}

/// Parses `blob`, returning the public key plus private RSA parameters for
/// key pairs.
pub fn try_parse_key(blob: &[u8]) -> Result<ParsedKey, BlobError> {
    parse(blob, true)
}

fn parse(blob: &[u8], include_private: bool) -> Result<ParsedKey, BlobError> {
    if is_valid_public_key(blob) {
        let kind = if blob == ECMA_KEY.as_slice() {
            KeyBlobKind::EcmaKey
        } else {
            KeyBlobKind::StrongNamePublicKey
        };
        return Ok(ParsedKey { kind, public_key: blob.to_vec(), private_key: None });
    }

    let capi = read_capi_blob(blob)?;
    let public_key = create_sn_public_key(capi.header.alg_id, &capi.rsa, capi.modulus())?;

    // The derived key must satisfy the same checks as one read from disk.
    check_public_key(&public_key)?;

    let private_key = if include_private && capi.kind == KeyBlobKind::KeyPair {
        Some(RsaKeyParameters::from_capi(&capi))
    } else {
        None
    };

    Ok(ParsedKey { kind: capi.kind, public_key, private_key })
}

/// Reads and checks the CAPI headers of a key pair or bare public key.
///
/// The total length must equal exactly what the bit length implies.
pub(crate) fn read_capi_blob(blob: &[u8]) -> Result<CapiBlob<'_>, BlobError> {
    if blob.is_empty() {
        return Err(BlobError::Empty);
    }
    let too_short = || BlobError::TooShort { len: blob.len(), min: OFFSET_TO_KEY_DATA };

    let mut reader = ByteReader::new(blob);
    let header = BlobHeader::read(&mut reader).ok_or_else(too_short)?;
    let rsa = RsaPubKey::read(&mut reader).ok_or_else(too_short)?;

    let (kind, expected_magic) = match header.blob_type {
        PRIVATE_KEY_BLOB_ID => (KeyBlobKind::KeyPair, RSA2_MAGIC),
        PUBLIC_KEY_BLOB_ID => (KeyBlobKind::CapiPublicKey, RSA1_MAGIC),
        other => return Err(BlobError::UnknownBlobType(other)),
    };
    if header.version != BLOB_VERSION {
        return Err(BlobError::UnsupportedVersion(header.version));
    }
    if header.alg_id != alg_id::CALG_RSA_SIGN && header.alg_id != alg_id::CALG_RSA_KEYX {
        return Err(BlobError::UnsupportedAlgorithm(header.alg_id));
    }
    if rsa.magic != expected_magic {
        return Err(BlobError::BadMagic { found: rsa.magic, expected: expected_magic });
    }

    let modulus_len = rsa.modulus_len().ok_or(BlobError::InvalidBitLength(rsa.bit_len))?;
    let expected_len = match kind {
        KeyBlobKind::KeyPair => private_key_blob_len(modulus_len),
        _ => public_key_blob_len(modulus_len),
    }
    .ok_or(BlobError::InvalidBitLength(rsa.bit_len))?;
    if blob.len() != expected_len {
        return Err(BlobError::LengthMismatch { declared: expected_len, actual: blob.len() });
    }

    let key_data = reader
        .read_bytes(reader.remaining())
        .ok_or(BlobError::LengthMismatch { declared: expected_len, actual: blob.len() })?;

    Ok(CapiBlob { kind, header, rsa, modulus_len, key_data })
}

/// Reads the CAPI part of a strong-name public key.
///
/// Accepts exactly what [`check_public_key`] accepts, except the ECMA key,
/// which has no CAPI part. The CAPI version and `aiKeyAlg` are not checked.
pub(crate) fn read_sn_public_key(public_key: &[u8]) -> Result<CapiBlob<'_>, BlobError> {
    check_public_key(public_key)?;
    let too_short = || BlobError::TooShort { len: public_key.len(), min: MIN_PUBLIC_KEY_SIZE };

    let mut reader = ByteReader::new(public_key);
    SnPublicKeyHeader::read(&mut reader).ok_or_else(too_short)?;
    let header = BlobHeader::read(&mut reader).ok_or_else(too_short)?;
    let rsa = RsaPubKey::read(&mut reader).ok_or_else(too_short)?;
    let modulus_len = rsa.modulus_len().ok_or(BlobError::InvalidBitLength(rsa.bit_len))?;
    let key_data = reader.read_bytes(reader.remaining()).ok_or_else(too_short)?;
    if key_data.len() != modulus_len {
        return Err(BlobError::LengthMismatch { declared: modulus_len, actual: key_data.len() });
    }

    Ok(CapiBlob { kind: KeyBlobKind::StrongNamePublicKey, header, rsa, modulus_len, key_data })
}

/// Builds a strong-name public key around a CAPI public key.
///
/// The strong-name header always names RSA signing with SHA-1; the CAPI
/// `aiKeyAlg` is carried over from the source blob.
pub(crate) fn create_sn_public_key(
    capi_alg_id: u32,
    rsa: &RsaPubKey,
    modulus: &[u8],
) -> Result<Vec<u8>, BlobError> {
    let cb_public_key = modulus
        .len()
        .checked_add(OFFSET_TO_KEY_DATA)
        .and_then(|cb| u32::try_from(cb).ok())
        .ok_or(BlobError::InvalidBitLength(rsa.bit_len))?;

    let mut buf = Vec::with_capacity(PUBLIC_KEY_HEADER_SIZE + OFFSET_TO_KEY_DATA + modulus.len());
    SnPublicKeyHeader {
        sig_alg_id: alg_id::CALG_RSA_SIGN,
        hash_alg_id: alg_id::CALG_SHA1,
        cb_public_key,
    }
    .write(&mut buf);
    BlobHeader {
        blob_type: PUBLIC_KEY_BLOB_ID,
        version: BLOB_VERSION,
        reserved: 0,
        alg_id: capi_alg_id,
    }
    .write(&mut buf);
    RsaPubKey { magic: RSA1_MAGIC, bit_len: rsa.bit_len, pub_exp: rsa.pub_exp }.write(&mut buf);
    buf.extend_from_slice(modulus);
    Ok(buf)
}
