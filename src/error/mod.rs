//! Error handling for sseconv.
//!
//! - **Error Categories**: `ErrorCategory` drives HTTP status and exit codes
//! - **Conversion Errors**: `ConvertError` covers every adapter failure
//! - **Result Type Alias**: `ConvertResult<T>`
//!
//! | Category | Examples | HTTP | Exit |
//! |----------|----------|------|------|
//! | User | missing rawData, invalid JSON | 400 | 2 |
//! | System | unreadable input file | 500 | 1 |
//! | Internal | encoder failure | 500 | 1 |

mod category;
mod convert_error;

pub use category::ErrorCategory;
pub use convert_error::{ConvertError, UNRESOLVED_TEMPLATE_MARKER};

/// Type alias for Results using ConvertError.
pub type ConvertResult<T> = Result<T, ConvertError>;
