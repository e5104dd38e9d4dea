//! SHA-256 digest and signing key derivation.

use sha2::{Digest, Sha256};

/// Length in bytes of a derived signing key.
pub const SIGNING_KEY_LEN: usize = 32;

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: impl AsRef<[u8]>) -> [u8; SIGNING_KEY_LEN] {
    Sha256::digest(data.as_ref()).into()
}

/// Derive the HMAC signing key from a bot token.
///
/// The key is the SHA-256 digest of the raw token bytes. Any input is
/// accepted, including an empty token.
pub fn derive_signing_key(token: impl AsRef<[u8]>) -> [u8; SIGNING_KEY_LEN] {
    sha256(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_derive_signing_key() {
        let key = derive_signing_key("XXXXXXXX:XXXXXXXXXXXXXXXXXXXXXXXX");
        assert_eq!(
            hex::encode(key),
            "4960ce68a920bd04ac29167cb47dee201fca91cb20021e0a9cd3e6949f74cae4"
        );
    }

    #[test]
    fn test_derive_signing_key_is_deterministic() {
        assert_eq!(derive_signing_key("token"), derive_signing_key(b"token"));
        assert_ne!(derive_signing_key("token"), derive_signing_key("token2"));
    }
}
