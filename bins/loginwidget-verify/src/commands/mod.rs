//! Command implementations

pub mod check;
pub mod sum;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable status lines
    Text,
    /// One JSON document on stdout
    Json,
}
