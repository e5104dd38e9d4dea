//! Decoding claims from query strings, request URIs and JSON payloads.
//!
//! Every decoder rejects a missing or empty `hash` with
//! [`AuthError::SignatureInvalid`] before any key derivation happens.

use url::Url;

use crate::{AuthError, IdentityClaim, Result};

/// Parameter names recognised by the decoders.
pub mod keys {
    /// User id.
    pub const ID: &str = "id";
    /// First name.
    pub const FIRST_NAME: &str = "first_name";
    /// Last name.
    pub const LAST_NAME: &str = "last_name";
    /// Username.
    pub const USERNAME: &str = "username";
    /// Avatar URL.
    pub const PHOTO_URL: &str = "photo_url";
    /// Authentication timestamp.
    pub const AUTH_DATE: &str = "auth_date";
    /// Supplied signature.
    pub const HASH: &str = "hash";
}

/// Base used to resolve request URIs given as an absolute path.
const REQUEST_URI_BASE: &str = "http://localhost/";

#[derive(Default)]
struct RawFields {
    id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    username: Option<String>,
    photo_url: Option<String>,
    auth_date: Option<String>,
    hash: Option<String>,
}

impl RawFields {
    fn slot(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            keys::ID => Some(&mut self.id),
            keys::FIRST_NAME => Some(&mut self.first_name),
            keys::LAST_NAME => Some(&mut self.last_name),
            keys::USERNAME => Some(&mut self.username),
            keys::PHOTO_URL => Some(&mut self.photo_url),
            keys::AUTH_DATE => Some(&mut self.auth_date),
            keys::HASH => Some(&mut self.hash),
            _ => None,
        }
    }
}

/// Parse a base-10 integer, treating anything unparsable as absent.
pub(crate) fn parse_int(text: &str) -> i64 {
    text.parse().unwrap_or(0)
}

impl IdentityClaim {
    /// Build a claim from key/value pairs.
    ///
    /// The first occurrence of a key wins and unknown keys are ignored.
    /// `id` and `auth_date` values that are not integers decode as `0`.
    ///
    /// # Errors
    ///
    /// [`AuthError::SignatureInvalid`] if `hash` is missing or empty.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = RawFields::default();
        for (key, value) in pairs {
            if let Some(slot) = raw.slot(key.as_ref()) {
                if slot.is_none() {
                    *slot = Some(value.as_ref().to_owned());
                }
            }
        }

        let hash = raw.hash.unwrap_or_default();
        if hash.is_empty() {
            return Err(AuthError::SignatureInvalid);
        }

        Ok(Self::new()
            .with_id(raw.id.as_deref().map_or(0, parse_int))
            .with_first_name(raw.first_name.unwrap_or_default())
            .with_last_name(raw.last_name.unwrap_or_default())
            .with_username(raw.username.unwrap_or_default())
            .with_photo_url(raw.photo_url.unwrap_or_default())
            .with_auth_date(raw.auth_date.as_deref().map_or(0, parse_int))
            .with_signature(hash))
    }

    /// Build a claim from an `application/x-www-form-urlencoded` query
    /// string. A leading `?` is ignored.
    ///
    /// # Errors
    ///
    /// [`AuthError::SignatureInvalid`] if `hash` is missing or empty.
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Build a claim from the query component of a request URI.
    ///
    /// Accepts an absolute URI (`https://example.com/cb?...`) or an absolute
    /// path (`/cb?...`).
    ///
    /// # Errors
    ///
    /// [`AuthError::MalformedInput`] if the URI cannot be parsed, otherwise
    /// [`AuthError::SignatureInvalid`] if `hash` is missing or empty.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let url = parse_request_uri(uri)?;
        Self::from_pairs(url.query_pairs())
    }

    /// Build a claim from the JSON object passed to the widget's
    /// `data-onauth` callback.
    ///
    /// # Errors
    ///
    /// [`AuthError::MalformedInput`] if the payload is not a JSON object,
    /// otherwise [`AuthError::SignatureInvalid`] if `hash` is missing or
    /// empty.
    pub fn from_json(payload: &str) -> Result<Self> {
        let claim: Self = serde_json::from_str(payload)?;
        if claim.signature().is_empty() {
            return Err(AuthError::SignatureInvalid);
        }
        Ok(claim)
    }
}

fn parse_request_uri(uri: &str) -> Result<Url> {
    if uri.starts_with('/') {
        Ok(Url::parse(REQUEST_URI_BASE)?.join(uri)?)
    } else {
        Ok(Url::parse(uri)?)
    }
}
