//! Error type for the conversion adapters.
//!
//! The SSE core itself never fails; these errors come from the layers around
//! it: missing or malformed request input, CLI file I/O, and JSON encoding.

use std::path::PathBuf;

use thiserror::Error;

use super::category::ErrorCategory;

/// Placeholder left behind when a workflow tool forgets to render its
/// template before calling the HTTP service.
pub const UNRESOLVED_TEMPLATE_MARKER: &str = "{{ $json.sseData }}";

#[derive(Debug, Error)]
pub enum ConvertError {
    /// No input supplied for a required parameter
    #[error("Missing required parameter: {parameter}")]
    InputMissing { parameter: String },

    /// Input expected to be JSON failed to parse
    #[error("Invalid JSON object format: {message}")]
    InvalidJson { message: String },

    /// Input has the wrong shape
    #[error("{message}")]
    InvalidInput { message: String },

    /// Raw data still contains an unrendered template placeholder
    #[error(
        "Workflow template variable was not resolved. Send rawData as an expression, e.g. ={{\"rawData\": $json.sseData, \"format\": \"single\"}}"
    )]
    UnresolvedTemplate { raw: String },

    /// Failed to read the CLI input file
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the CLI output file
    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding of a result failed
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConvertError {
    pub fn input_missing(parameter: impl Into<String>) -> Self {
        ConvertError::InputMissing {
            parameter: parameter.into(),
        }
    }

    pub fn invalid_json(err: impl std::fmt::Display) -> Self {
        ConvertError::InvalidJson {
            message: err.to_string(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ConvertError::InvalidInput {
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::InputMissing { .. }
            | ConvertError::InvalidJson { .. }
            | ConvertError::InvalidInput { .. }
            | ConvertError::UnresolvedTemplate { .. } => ErrorCategory::User,
            ConvertError::FileRead { .. } | ConvertError::FileWrite { .. } => {
                ErrorCategory::System
            }
            ConvertError::Serialize(_) => ErrorCategory::Internal,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConvertError::InputMissing { .. } => "INPUT_MISSING",
            ConvertError::InvalidJson { .. } => "INVALID_JSON",
            ConvertError::InvalidInput { .. } => "INVALID_INPUT",
            ConvertError::UnresolvedTemplate { .. } => "UNRESOLVED_TEMPLATE",
            ConvertError::FileRead { .. } => "FILE_READ",
            ConvertError::FileWrite { .. } => "FILE_WRITE",
            ConvertError::Serialize(_) => "SERIALIZE",
        }
    }
}
