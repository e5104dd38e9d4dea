//! Verification of identity claims issued by a social login widget.
//!
//! The widget signs the user fields it hands to a website with a key derived
//! from the bot token. This crate rebuilds the data-check string from the
//! received fields, recomputes the HMAC-SHA256 tag and compares it with the
//! supplied `hash` in constant time.
//!
//! # Example
//!
//! ```rust
//! use loginwidget_auth::{AuthError, IdentityClaim};
//!
//! let uri = "https://example.com/login?id=1&first_name=Klim&hash=deadbeef";
//! let claim = IdentityClaim::from_uri(uri).expect("well-formed callback");
//!
//! assert_eq!(
//!     claim.check("XXXXXXXX:XXXXXXXXXXXXXXXXXXXXXXXX"),
//!     Err(AuthError::SignatureInvalid)
//! );
//! ```
//!
//! Freshness of `auth_date` is deliberately left to the caller.

#![warn(missing_docs)]

mod canonical;
mod claim;
mod decode;
mod error;
mod verify;

#[cfg(feature = "wasm")]
mod wasm;

pub use canonical::{Accessor, FieldValue, CANONICAL_FIELDS};
pub use claim::IdentityClaim;
pub use decode::keys;
pub use error::{AuthError, Result};
