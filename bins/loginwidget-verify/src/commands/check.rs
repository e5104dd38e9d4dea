//! Verify a login widget payload

use crate::commands::OutputFormat;
use crate::output::Status;
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use loginwidget_auth::{AuthError, IdentityClaim};
use loginwidget_telemetry::{Event, VerificationOutcome};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Where the payload comes from
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Uri(&'a str),
    Query(&'a str),
    /// JSON file, `-` for stdin
    Json(&'a Path),
}

impl Source<'_> {
    fn name(&self) -> &'static str {
        match self {
            Source::Uri(_) => "uri",
            Source::Query(_) => "query",
            Source::Json(_) => "json",
        }
    }

    fn decode(&self) -> Result<std::result::Result<IdentityClaim, AuthError>> {
        Ok(match self {
            Source::Uri(uri) => IdentityClaim::from_uri(uri),
            Source::Query(query) => IdentityClaim::from_query(query),
            Source::Json(path) => IdentityClaim::from_json(&read_payload(path)?),
        })
    }
}

/// `auth_date` is absent or older than the freshness window
#[derive(Debug, Error)]
#[error("Login data expired: auth_date {auth_date} is older than {max_age}s")]
pub struct Expired {
    pub auth_date: i64,
    pub max_age: u64,
}

/// Run the check command
pub fn run(source: Source<'_>, token: &str, max_age: Option<u64>, format: OutputFormat) -> Result<()> {
    let claim = match source.decode()? {
        Ok(claim) => claim,
        Err(err) => {
            reject(&err, source, None);
            return Err(err.into());
        }
    };

    if let Err(err) = claim.check(token) {
        reject(&err, source, Some(&claim));
        return Err(err.into());
    }

    let now = Utc::now().timestamp();
    let age = match max_age {
        Some(max_age) => match check_freshness(claim.auth_date(), now, max_age) {
            Ok(age) => Some(age),
            Err(err) => {
                record(VerificationOutcome::Expired, source, Some(&claim));
                return Err(err.into());
            }
        },
        None => None,
    };

    record(VerificationOutcome::Verified, source, Some(&claim));

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "claim": claim,
                "age_secs": age,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_claim(&claim, age),
    }

    Ok(())
}

/// Age of `auth_date` at `now`, rejecting it when outside `max_age`
///
/// An absent `auth_date` cannot be shown fresh and is rejected.
pub fn check_freshness(auth_date: i64, now: i64, max_age: u64) -> std::result::Result<i64, Expired> {
    let age = now.saturating_sub(auth_date);
    let max = i64::try_from(max_age).unwrap_or(i64::MAX);
    if auth_date == 0 || age > max {
        return Err(Expired { auth_date, max_age });
    }
    Ok(age)
}

fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut payload = String::new();
        std::io::stdin()
            .read_to_string(&mut payload)
            .context("Failed to read JSON payload from stdin")?;
        Ok(payload)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON payload from {}", path.display()))
    }
}

fn reject(err: &AuthError, source: Source<'_>, claim: Option<&IdentityClaim>) {
    let outcome = match err {
        AuthError::SignatureInvalid => VerificationOutcome::SignatureInvalid,
        AuthError::MalformedInput(_) => VerificationOutcome::MalformedInput,
    };
    record(outcome, source, claim);
}

fn record(outcome: VerificationOutcome, source: Source<'_>, claim: Option<&IdentityClaim>) {
    Event::new(
        outcome,
        serde_json::json!({
            "source": source.name(),
            "user_id": claim.map(IdentityClaim::id),
            "auth_date": claim.map(IdentityClaim::auth_date),
        }),
    )
    .record();
}

fn print_claim(claim: &IdentityClaim, age: Option<i64>) {
    Status::success("Signature valid");
    if claim.id() != 0 {
        Status::field("id", claim.id());
    }
    for (label, value) in [
        ("first name", claim.first_name()),
        ("last name", claim.last_name()),
        ("username", claim.username()),
        ("photo", claim.photo_url()),
    ] {
        if !value.is_empty() {
            Status::field(label, value);
        }
    }
    if claim.auth_date() != 0 {
        if let Some(date) = Utc.timestamp_opt(claim.auth_date(), 0).single() {
            Status::field("auth date", date.to_rfc3339());
        }
    }
    if let Some(age) = age {
        Status::field("age", format!("{age}s"));
    }
}
