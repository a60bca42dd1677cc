//! Terminal styling helpers for CLI output

use owo_colors::OwoColorize;

/// Check mark for completed operations
pub const CHECK: &str = "✓";

/// Render the check mark in green
pub fn check() -> String {
    CHECK.green().to_string()
}

/// Arrow for step listings
pub fn arrow() -> String {
    "→".cyan().to_string()
}

/// Extension trait for styling display values
pub trait Stylize {
    /// De-emphasized secondary text
    fn muted(&self) -> String;
    /// Highlighted value (names, numbers)
    fn accent(&self) -> String;
    /// Section or action emphasis
    fn emphasis(&self) -> String;
    /// Successful result
    fn success(&self) -> String;
    /// Warning or degraded result
    fn warn(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }
}
