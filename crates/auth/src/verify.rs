//! Tag computation and the constant-time check.

use loginwidget_crypto::{derive_signing_key, hmac_sha256, verify_signature};

use crate::{IdentityClaim, Result};

impl IdentityClaim {
    /// Compute the lowercase hex HMAC-SHA256 tag of this claim's
    /// data-check string, keyed with `SHA-256(token)`.
    pub fn sum(&self, token: impl AsRef<[u8]>) -> String {
        let key = derive_signing_key(token);
        hmac_sha256(&key, self.canonical_string().as_bytes())
    }

    /// Check the supplied signature against the tag computed for `token`.
    ///
    /// The comparison is constant-time; an empty or wrongly sized signature
    /// fails the same way as a mismatching one.
    ///
    /// # Errors
    ///
    /// [`AuthError::SignatureInvalid`](crate::AuthError::SignatureInvalid)
    /// unless the tags are equal.
    pub fn check(&self, token: impl AsRef<[u8]>) -> Result<()> {
        let expected = self.sum(token);
        verify_signature(self.signature(), &expected)?;
        Ok(())
    }
}
