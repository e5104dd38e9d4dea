//! Terminal output utilities

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a labelled value
    pub fn field(label: &str, value: impl std::fmt::Display) {
        println!("  {:<11} {}", format!("{label}:").dimmed(), value);
    }
}
