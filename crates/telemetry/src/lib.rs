//! Telemetry for login widget verification callers
//!
//! The verification crates never log. Callers use this crate to:
//! - Initialise structured logging with tracing
//! - Count verification outcomes
//! - Emit one structured event per verification

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global outcome counters
static OUTCOMES: Lazy<OutcomeCounters> = Lazy::new(OutcomeCounters::new);

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize the telemetry system
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(tracing_fmt::layer()
                .json()
                .with_target(config.show_target)
                .with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_fmt::layer()
                .with_target(config.show_target)
                .with_writer(std::io::stderr)
                .compact())
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

/// Result of verifying one login payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Signature matched
    Verified,
    /// Signature absent or mismatching
    SignatureInvalid,
    /// Payload could not be parsed
    MalformedInput,
    /// Signature matched but `auth_date` is outside the freshness window
    Expired,
}

impl VerificationOutcome {
    /// All outcomes, in reporting order
    pub const ALL: [VerificationOutcome; 4] = [
        Self::Verified,
        Self::SignatureInvalid,
        Self::MalformedInput,
        Self::Expired,
    ];

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::SignatureInvalid => "signature_invalid",
            Self::MalformedInput => "malformed_input",
            Self::Expired => "expired",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lock-free counters, one per outcome
pub struct OutcomeCounters {
    counts: [AtomicU64; 4],
}

impl OutcomeCounters {
    fn new() -> Self {
        Self {
            counts: Default::default(),
        }
    }

    /// Increment the counter for an outcome
    pub fn record(&self, outcome: VerificationOutcome) {
        self.counts[outcome.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Current count for an outcome
    pub fn count(&self, outcome: VerificationOutcome) -> u64 {
        self.counts[outcome.index()].load(Ordering::Relaxed)
    }

    /// Export counters as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let counts: HashMap<&str, u64> = VerificationOutcome::ALL
            .iter()
            .map(|outcome| (outcome.as_str(), self.count(*outcome)))
            .collect();

        serde_json::json!({
            "session_id": session_id(),
            "outcomes": counts,
        })
    }
}

/// Get the global outcome counters
pub fn outcomes() -> &'static OutcomeCounters {
    &OUTCOMES
}

/// Structured record of one verification
#[derive(Debug, Serialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub outcome: VerificationOutcome,
    pub data: serde_json::Value,
}

impl Event {
    pub fn new(outcome: VerificationOutcome, data: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: session_id().to_string(),
            outcome,
            data,
        }
    }

    /// Count the outcome and log the event
    pub fn record(&self) {
        outcomes().record(self.outcome);
        match self.outcome {
            VerificationOutcome::Verified => tracing::info!(
                outcome = %self.outcome,
                data = %self.data,
                "Login payload verified"
            ),
            _ => tracing::warn!(
                outcome = %self.outcome,
                data = %self.data,
                "Login payload rejected"
            ),
        }
    }
}
