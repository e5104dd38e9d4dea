//! loginwidget-verify: verify social login widget callbacks.
//!
//! Decodes a redirect URI, query string or JSON payload, checks its
//! signature against the bot token and optionally enforces a freshness
//! window on `auth_date`.

use clap::{ArgGroup, Args, Parser, Subcommand};
use loginwidget_auth::{AuthError, IdentityClaim};
use loginwidget_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod output;

use commands::{check, sum, OutputFormat};
use config::{Config, ConfigError, MAX_AGE_ENV, TOKEN_ENV};
use output::Status;

/// Exit codes for CLI commands
mod exit_codes {
    pub const FAILURE: u8 = 1;
    pub const VALIDATION_ERROR: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
    pub const SECURITY_ERROR: u8 = 5;
}

/// Verify social login widget callbacks
#[derive(Parser)]
#[command(name = "loginwidget-verify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Bot token used to derive the signing key
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a login payload
    Check(CheckArgs),

    /// Compute the signature for a set of fields
    Sum(SumArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true).args(["uri", "query", "json"])))]
struct CheckArgs {
    /// Full redirect URI (absolute, or an absolute path)
    #[arg(long)]
    uri: Option<String>,

    /// Raw query string
    #[arg(long)]
    query: Option<String>,

    /// JSON payload file, `-` for stdin
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Reject payloads whose auth_date is older than this many seconds
    #[arg(long, env = MAX_AGE_ENV)]
    max_age: Option<u64>,
}

#[derive(Args)]
struct SumArgs {
    /// User id
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    id: i64,

    /// First name
    #[arg(long, default_value = "")]
    first_name: String,

    /// Last name
    #[arg(long, default_value = "")]
    last_name: String,

    /// Username
    #[arg(long, default_value = "")]
    username: String,

    /// Avatar URL
    #[arg(long, default_value = "")]
    photo_url: String,

    /// Authentication timestamp (unix seconds)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    auth_date: i64,

    /// Also print the data-check string
    #[arg(long)]
    canonical: bool,
}

impl SumArgs {
    fn claim(&self) -> IdentityClaim {
        IdentityClaim::new()
            .with_id(self.id)
            .with_first_name(&self.first_name)
            .with_last_name(&self.last_name)
            .with_username(&self.username)
            .with_photo_url(&self.photo_url)
            .with_auth_date(self.auth_date)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&anyhow::Error::from(e), cli.format),
    };

    let mut telemetry = config.schema.telemetry.clone();
    if cli.verbose {
        telemetry = TelemetryConfig {
            log_level: "loginwidget_verify=debug,loginwidget_telemetry=debug,info".to_string(),
            ..telemetry
        };
    }
    if let Err(e) = loginwidget_telemetry::init_with_config(telemetry) {
        eprintln!("{e}");
    }
    tracing::debug!(config = ?config, "Configuration loaded");

    let result = run(&cli, &config);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, cli.format),
    }
}

fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let token = config.resolve_token(cli.token.clone())?;

    match &cli.command {
        Commands::Check(args) => {
            let source = match (&args.uri, &args.query, &args.json) {
                (Some(uri), _, _) => check::Source::Uri(uri),
                (_, Some(query), _) => check::Source::Query(query),
                (_, _, Some(path)) => check::Source::Json(path),
                (None, None, None) => anyhow::bail!("One of --uri, --query or --json is required"),
            };
            check::run(source, &token, config.resolve_max_age(args.max_age), cli.format)
        }
        Commands::Sum(args) => sum::run(&args.claim(), &token, args.canonical, cli.format),
    }
}

/// Print an error and map it to an exit code
fn report(err: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let (kind, code) = classify(err);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": false,
                "kind": kind,
                "error": format!("{err:#}"),
            });
            println!("{output}");
        }
        OutputFormat::Text => Status::error(&format!("{err:#}")),
    }

    ExitCode::from(code)
}

fn classify(err: &anyhow::Error) -> (&'static str, u8) {
    if let Some(auth) = err.downcast_ref::<AuthError>() {
        return match auth {
            AuthError::SignatureInvalid => ("signature_invalid", exit_codes::SECURITY_ERROR),
            AuthError::MalformedInput(_) => ("malformed_input", exit_codes::VALIDATION_ERROR),
        };
    }
    if err.downcast_ref::<check::Expired>().is_some() {
        return ("expired", exit_codes::SECURITY_ERROR);
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return ("config", exit_codes::CONFIG_ERROR);
    }
    ("error", exit_codes::FAILURE)
}
