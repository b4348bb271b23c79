//! Error category classification.
//!
//! Adapters use the category to pick an HTTP status or a process exit code
//! without matching on every error variant.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad or missing input from the caller.
    /// Not retryable until the input is corrected.
    User,

    /// OS/filesystem errors (unreadable input file, unwritable output).
    System,

    /// Bugs or unexpected encoder failures.
    Internal,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Internal => "internal",
        }
    }

    /// HTTP status code used when this category reaches an HTTP client.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCategory::User => 400,
            ErrorCategory::System | ErrorCategory::Internal => 500,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::User => 2,
            ErrorCategory::System | ErrorCategory::Internal => 1,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
