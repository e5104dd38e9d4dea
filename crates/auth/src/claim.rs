//! The identity claim asserted by the login widget.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// User identity fields signed by the login widget, plus the supplied tag.
///
/// Presence follows the widget's own convention: an integer of `0` or an
/// empty string is the same as an absent field. A claim is immutable once
/// built; verification only borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "is_zero")]
    id: i64,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "String::is_empty")]
    first_name: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "String::is_empty")]
    last_name: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "String::is_empty")]
    username: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "String::is_empty")]
    photo_url: String,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "is_zero")]
    auth_date: i64,
    #[serde(
        rename = "hash",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "String::is_empty"
    )]
    signature: String,
}

impl IdentityClaim {
    /// Create an empty claim (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user id.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Set the first name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    /// Set the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    /// Set the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set the avatar URL.
    #[must_use]
    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = photo_url.into();
        self
    }

    /// Set the authentication timestamp (unix seconds).
    #[must_use]
    pub fn with_auth_date(mut self, auth_date: i64) -> Self {
        self.auth_date = auth_date;
        self
    }

    /// Set the supplied hex signature (the `hash` parameter).
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// User id, `0` when absent.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// First name, empty when absent.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Last name, empty when absent.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Username, empty when absent.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Avatar URL, empty when absent.
    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }

    /// Authentication timestamp in unix seconds, `0` when absent.
    pub fn auth_date(&self) -> i64 {
        self.auth_date
    }

    /// Supplied hex signature, empty when absent.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Integers may arrive as JSON numbers or numeric strings; anything else is absent.
fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(value)) => value,
        Some(Raw::Text(text)) => crate::decode::parse_int(&text),
        Some(Raw::Other(_)) | None => 0,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claim_is_empty() {
        let claim = IdentityClaim::new();
        assert_eq!(claim.id(), 0);
        assert_eq!(claim.auth_date(), 0);
        assert!(claim.first_name().is_empty());
        assert!(claim.signature().is_empty());
    }

    #[test]
    fn test_builder_sets_fields() {
        let claim = IdentityClaim::new()
            .with_id(1)
            .with_first_name("Klim")
            .with_last_name("Sidorov")
            .with_username("klimsidorov")
            .with_photo_url("https://t.me/klimsidorov")
            .with_auth_date(976_255_200)
            .with_signature("abc");

        assert_eq!(claim.id(), 1);
        assert_eq!(claim.first_name(), "Klim");
        assert_eq!(claim.last_name(), "Sidorov");
        assert_eq!(claim.username(), "klimsidorov");
        assert_eq!(claim.photo_url(), "https://t.me/klimsidorov");
        assert_eq!(claim.auth_date(), 976_255_200);
        assert_eq!(claim.signature(), "abc");
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let claim = IdentityClaim::new()
            .with_first_name("Klim")
            .with_signature("abc");
        let json = serde_json::to_value(&claim).unwrap();

        assert_eq!(json, serde_json::json!({ "first_name": "Klim", "hash": "abc" }));
    }

    #[test]
    fn test_deserialize_lenient_numbers() {
        let claim: IdentityClaim = serde_json::from_str(
            r#"{"id": "42", "auth_date": 976255200, "first_name": null, "hash": "abc"}"#,
        )
        .unwrap();

        assert_eq!(claim.id(), 42);
        assert_eq!(claim.auth_date(), 976_255_200);
        assert!(claim.first_name().is_empty());
    }

    #[test]
    fn test_deserialize_unparsable_number_is_absent() {
        let claim: IdentityClaim =
            serde_json::from_str(r#"{"id": "abc", "auth_date": 1.5, "hash": "abc"}"#).unwrap();

        assert_eq!(claim.id(), 0);
        assert_eq!(claim.auth_date(), 0);
    }
}
