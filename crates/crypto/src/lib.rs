//! Cryptographic primitives for login widget verification.
//!
//! This crate provides:
//! - Signing key derivation from a bot token (SHA-256)
//! - HMAC-SHA256 tag generation
//! - Constant-time comparison for security

#![warn(missing_docs)]

mod digest;
mod error;
mod hmac_impl;
mod timing;

pub use digest::{derive_signing_key, sha256, SIGNING_KEY_LEN};
pub use error::{CryptoError, Result};
pub use hmac_impl::{hmac_sha256, verify_signature};
pub use timing::constant_time_compare;
