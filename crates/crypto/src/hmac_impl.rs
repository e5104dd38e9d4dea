//! HMAC-SHA256 tag generation and verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{CryptoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Generate HMAC-SHA256 signature.
///
/// # Arguments
/// * `key` - Secret key bytes
/// * `message` - Message to sign
///
/// # Returns
/// Signature as lowercase hex string
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC can take key of any size");
    mac.update(message);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Verify a signature against an expected value.
///
/// # Arguments
/// * `signature` - The signature to verify (hex-encoded)
/// * `expected` - The expected signature (hex-encoded)
///
/// # Returns
/// Ok(()) if signatures match, Err otherwise
pub fn verify_signature(signature: &str, expected: &str) -> Result<()> {
    if crate::constant_time_compare(signature.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(CryptoError::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha256() {
        let key = b"secret";
        let message = b"hello world";
        let sig = hmac_sha256(key, message);

        // 64 lowercase hex chars for SHA256
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hmac_sha256_rfc4231_case_2() {
        let sig = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_sha256_empty_message() {
        let key = crate::derive_signing_key("XXXXXXXX:XXXXXXXXXXXXXXXXXXXXXXXX");
        assert_eq!(
            hmac_sha256(&key, b""),
            "54293db79e045c08bcde648996cb44537d45b7fd2036c3acf028b0552ff58a6b"
        );
    }

    #[test]
    fn test_verify_signature_match() {
        let sig = "abc123";
        assert!(verify_signature(sig, sig).is_ok());
    }

    #[test]
    fn test_verify_signature_mismatch() {
        assert_eq!(
            verify_signature("abc123", "def456"),
            Err(CryptoError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_signature_empty() {
        assert!(verify_signature("", "abc123").is_err());
    }
}
