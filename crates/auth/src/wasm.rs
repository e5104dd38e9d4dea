//! WASM bindings for login widget verification.

use wasm_bindgen::prelude::*;

use crate::IdentityClaim;

/// Verify a login callback query string (constant-time comparison).
///
/// # Arguments
/// * `query` - The query string received by the redirect URL
/// * `token` - The bot token
///
/// # Returns
/// true if the signature matches, false otherwise
#[wasm_bindgen]
pub fn verify_login_query(query: &str, token: &str) -> bool {
    IdentityClaim::from_query(query)
        .and_then(|claim| claim.check(token))
        .is_ok()
}

/// Verify a full login callback URI.
#[wasm_bindgen]
pub fn verify_login_uri(uri: &str, token: &str) -> bool {
    IdentityClaim::from_uri(uri)
        .and_then(|claim| claim.check(token))
        .is_ok()
}

/// Verify the JSON object handed to the widget's `data-onauth` callback.
#[wasm_bindgen]
pub fn verify_login_json(payload: &str, token: &str) -> bool {
    IdentityClaim::from_json(payload)
        .and_then(|claim| claim.check(token))
        .is_ok()
}

/// Data-check string for a query string, empty if it cannot be decoded.
#[wasm_bindgen]
pub fn login_data_check_string(query: &str) -> String {
    IdentityClaim::from_query(query)
        .map(|claim| claim.canonical_string())
        .unwrap_or_default()
}
