//! RSA parameters carried by CAPI key blobs.
//!
//! CAPI stores every big integer little-endian; the parameters exposed here
//! are big-endian, the order every RSA library expects.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::BlobError;
use super::layout::{half_len, RsaPubKey, ECMA_KEY, RSA1_MAGIC};
use super::parser::{create_sn_public_key, read_capi_blob, read_sn_public_key, CapiBlob, KeyBlobKind};

/// Private CRT components of an RSA key pair, big-endian.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RsaPrivateParameters {
    pub p: Vec<u8>,
    pub q: Vec<u8>,
    pub dp: Vec<u8>,
    pub dq: Vec<u8>,
    pub inverse_q: Vec<u8>,
    pub d: Vec<u8>,
}

impl fmt::Debug for RsaPrivateParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateParameters")
            .field("modulus_bytes", &self.d.len())
            .finish_non_exhaustive()
    }
}

/// RSA key material decoded from a CAPI blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyParameters {
    bit_len: u32,
    exponent: Vec<u8>,
    modulus: Vec<u8>,
    private: Option<RsaPrivateParameters>,
}

impl RsaKeyParameters {
    /// Decodes a CAPI `PUBLICKEYBLOB` or `PRIVATEKEYBLOB`.
    pub fn from_capi_blob(blob: &[u8]) -> Result<Self, BlobError> {
        let capi = read_capi_blob(blob)?;
        Ok(Self::from_capi(&capi))
    }

    /// Decodes the public part of a strong-name public key.
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, BlobError> {
        if public_key == ECMA_KEY.as_slice() {
            return Err(BlobError::InvalidHeader("ECMA key carries no RSA parameters"));
        }
        let capi = read_sn_public_key(public_key)?;
        Ok(Self::from_capi(&capi))
    }

    /// Builds parameters from a blob whose lengths were already checked.
    pub(crate) fn from_capi(capi: &CapiBlob<'_>) -> Self {
        let modulus_len = capi.modulus_len;
        let half = half_len(modulus_len);
        let data = capi.key_data;

        let private = if capi.kind == KeyBlobKind::KeyPair {
            let mut offset = modulus_len;
            let mut next = |len: usize| {
                let value = reversed(&data[offset..offset + len]);
                offset += len;
                value
            };
            Some(RsaPrivateParameters {
                p: next(half),
                q: next(half),
                dp: next(half),
                dq: next(half),
                inverse_q: next(half),
                d: next(modulus_len),
            })
        } else {
            None
        };

        Self {
            bit_len: capi.rsa.bit_len,
            exponent: exponent_as_bytes(capi.rsa.pub_exp),
            modulus: reversed(capi.modulus()),
            private,
        }
    }

    pub fn bit_len(&self) -> u32 {
        self.bit_len
    }

    /// Public exponent, big-endian, without leading zero bytes.
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    /// Modulus, big-endian.
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    pub fn private(&self) -> Option<&RsaPrivateParameters> {
        self.private.as_ref()
    }

    pub fn has_private_key(&self) -> bool {
        self.private.is_some()
    }

    /// Drops the private components, keeping only the public key.
    pub fn to_public(&self) -> Self {
        Self {
            bit_len: self.bit_len,
            exponent: self.exponent.clone(),
            modulus: self.modulus.clone(),
            private: None,
        }
    }

    /// Re-encodes the public part as a strong-name public key.
    pub fn to_sn_public_key(&self, capi_alg_id: u32) -> Result<Vec<u8>, BlobError> {
        if self.exponent.len() > 4 {
            return Err(BlobError::InvalidHeader("public exponent wider than 32 bits"));
        }
        let pub_exp = self.exponent.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
        let rsa = RsaPubKey { magic: RSA1_MAGIC, bit_len: self.bit_len, pub_exp };
        create_sn_public_key(capi_alg_id, &rsa, &reversed(&self.modulus))
    }
}

/// Encodes a CAPI public exponent in the fewest big-endian bytes.
pub fn exponent_as_bytes(exponent: u32) -> Vec<u8> {
    let bytes = exponent.to_be_bytes();
    let skip = bytes.iter().take(3).take_while(|b| **b == 0).count();
    bytes[skip..].to_vec()
}

fn reversed(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::layout::alg_id;
    use crate::blob::try_get_public_key;

    fn tiny_key_pair() -> Vec<u8> {
        let mut blob = vec![0x07, 0x02, 0x00, 0x00, 0x00, 0x24, 0x00, 0x00];
        blob.extend_from_slice(b"RSA2");
        blob.extend_from_slice(&32u32.to_le_bytes());
        blob.extend_from_slice(&65537u32.to_le_bytes());
        blob.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]); // modulus
        blob.extend_from_slice(&[0x10, 0x11]); // p
        blob.extend_from_slice(&[0x20, 0x21]); // q
        blob.extend_from_slice(&[0x30, 0x31]); // dp
        blob.extend_from_slice(&[0x40, 0x41]); // dq
        blob.extend_from_slice(&[0x50, 0x51]); // inverse q
        blob.extend_from_slice(&[0x60, 0x61, 0x62, 0x63]); // d
        blob
    }

    #[test]
    fn exponent_is_minimal_big_endian() {
        assert_eq!(exponent_as_bytes(0), vec![0]);
        assert_eq!(exponent_as_bytes(3), vec![3]);
        assert_eq!(exponent_as_bytes(0x100), vec![1, 0]);
        assert_eq!(exponent_as_bytes(65537), vec![1, 0, 1]);
        assert_eq!(exponent_as_bytes(0x0102_0304), vec![1, 2, 3, 4]);
    }

    #[test]
    fn key_pair_components_are_reversed() {
        let params = RsaKeyParameters::from_capi_blob(&tiny_key_pair()).unwrap();
        assert_eq!(params.bit_len(), 32);
        assert_eq!(params.exponent(), &[1, 0, 1]);
        assert_eq!(params.modulus(), &[0x04, 0x03, 0x02, 0x01]);

        let private = params.private().unwrap();
        assert_eq!(private.p, vec![0x11, 0x10]);
        assert_eq!(private.q, vec![0x21, 0x20]);
        assert_eq!(private.dp, vec![0x31, 0x30]);
        assert_eq!(private.dq, vec![0x41, 0x40]);
        assert_eq!(private.inverse_q, vec![0x51, 0x50]);
        assert_eq!(private.d, vec![0x63, 0x62, 0x61, 0x60]);
    }

    #[test]
    fn public_key_has_no_private_part() {
        let public = try_get_public_key(&tiny_key_pair()).unwrap();
        let params = RsaKeyParameters::from_public_key(&public).unwrap();
        assert!(!params.has_private_key());
        assert_eq!(params.modulus(), &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn re_encoding_matches_derived_public_key() {
        let pair = tiny_key_pair();
        let params = RsaKeyParameters::from_capi_blob(&pair).unwrap();
        let public = try_get_public_key(&pair).unwrap();
        assert_eq!(params.to_sn_public_key(alg_id::CALG_RSA_SIGN).unwrap(), public);
        assert_eq!(params.to_public().to_sn_public_key(alg_id::CALG_RSA_SIGN).unwrap(), public);
    }

    #[test]
    fn public_key_header_fields_are_not_rechecked() {
        let public = try_get_public_key(&tiny_key_pair()).unwrap();

        let mut other_version = public.clone();
        other_version[13] = 3;
        assert!(crate::blob::is_valid_public_key(&other_version));
        let params = RsaKeyParameters::from_public_key(&other_version).unwrap();
        assert_eq!(params.modulus(), &[0x04, 0x03, 0x02, 0x01]);

        let mut no_alg = public;
        no_alg[16..20].copy_from_slice(&0u32.to_le_bytes());
        assert!(crate::blob::is_valid_public_key(&no_alg));
        let params = RsaKeyParameters::from_public_key(&no_alg).unwrap();
        assert_eq!(params.exponent(), &[1, 0, 1]);
    }

    #[test]
    fn ecma_key_has_no_parameters() {
        let err = RsaKeyParameters::from_public_key(&crate::blob::ECMA_KEY).unwrap_err();
        assert!(matches!(err, BlobError::InvalidHeader(_)));
    }

    #[test]
    fn debug_output_redacts_private_material() {
        let params = RsaKeyParameters::from_capi_blob(&tiny_key_pair()).unwrap();
        let text = format!("{:?}", params.private().unwrap());
        assert!(!text.contains("99")); // 0x63 == 99
        assert!(text.contains("modulus_bytes"));
    }
}
