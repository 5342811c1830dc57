//! Public-key tokens and hex public-key strings.

use sha1::{Digest, Sha1};

use crate::blob::is_valid_public_key;

/// Length of a public-key token in bytes.
pub const PUBLIC_KEY_TOKEN_SIZE: usize = 8;

/// Computes the public-key token: the last eight bytes of the SHA-1 digest
/// of the public key, in reverse order.
pub fn public_key_token(public_key: &[u8]) -> [u8; PUBLIC_KEY_TOKEN_SIZE] {
    let digest = Sha1::digest(public_key);
    let mut token = [0u8; PUBLIC_KEY_TOKEN_SIZE];
    for (dst, src) in token.iter_mut().zip(digest.iter().rev()) {
        *dst = *src;
    }
    token
}

/// Decodes a hex public-key string as it appears in assembly attributes.
///
/// Surrounding whitespace is ignored; anything else that is not hex fails.
pub fn decode_public_key_string(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(text.trim())
}

/// Returns `true` if `text` is the hex form of a valid strong-name public key.
pub fn is_valid_public_key_string(text: &str) -> bool {
    decode_public_key_string(text)
        .map(|bytes| is_valid_public_key(&bytes))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::ECMA_KEY;

    #[test]
    fn ecma_key_token() {
        assert_eq!(hex::encode(public_key_token(&ECMA_KEY)), "b77a5c561934e089");
    }

    #[test]
    fn token_is_last_digest_bytes_reversed() {
        let digest = Sha1::digest(b"abc");
        let token = public_key_token(b"abc");
        let mut expected = digest[12..].to_vec();
        expected.reverse();
        assert_eq!(token.to_vec(), expected);
    }

    #[test]
    fn ecma_key_string_is_valid() {
        assert!(is_valid_public_key_string("00000000000000000400000000000000"));
        assert!(is_valid_public_key_string("  00000000000000000400000000000000\n"));
    }

    #[test]
    fn malformed_strings_are_invalid() {
        assert!(!is_valid_public_key_string(""));
        assert!(!is_valid_public_key_string("10000000000000000400000000000000"));
        assert!(!is_valid_public_key_string("0000000000000000040000000000000"));
        assert!(!is_valid_public_key_string("Something"));
    }
}
