//! Configuration file loading
//!
//! Precedence: command-line flag, then environment, then file, then defaults.
//! Flag and environment handling for the token and freshness window is done
//! by clap; this module supplies the file layer.

use loginwidget_telemetry::TelemetryConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the bot token
pub const TOKEN_ENV: &str = "LOGINWIDGET_BOT_TOKEN";

/// Environment variable holding the freshness window in seconds
pub const MAX_AGE_ENV: &str = "LOGINWIDGET_MAX_AGE_SECS";

/// Candidate config file locations, in lookup order
const CANDIDATES: [&str; 3] = [
    ".loginwidget.toml",
    "loginwidget.toml",
    ".config/loginwidget.toml",
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No bot token configured (use --token, LOGINWIDGET_BOT_TOKEN or bot_token in the config file)")]
    MissingToken,
}

/// On-disk configuration schema
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigSchema {
    /// Bot token used to derive the signing key
    pub bot_token: Option<String>,
    /// Maximum accepted age of `auth_date`, in seconds
    pub max_age_secs: Option<u64>,
    /// Logging settings
    pub telemetry: TelemetryConfig,
}

// Keeps the token out of debug output.
impl std::fmt::Debug for ConfigSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSchema")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("max_age_secs", &self.max_age_secs)
            .field("telemetry", &self.telemetry)
            .finish()
    }
}

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; without one the standard locations are
    /// searched and defaults are used when none is found.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Pick the bot token: the flag/env value if given, else the file value
    pub fn resolve_token(&self, flag: Option<String>) -> Result<String, ConfigError> {
        flag.or_else(|| self.schema.bot_token.clone())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    /// Pick the freshness window: the flag/env value if given, else the file value
    pub fn resolve_max_age(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.schema.max_age_secs)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
