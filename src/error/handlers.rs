//! Error handlers
//!
//! Reporting helpers for the command line tool.

use crate::error::types::FilterError;
use log::error;

/// Log a top-level error
pub fn handle_error(err: &FilterError) {
    error!("filterfs: {}", err);
}

/// Convert error to process exit code
pub fn error_to_exit_code(err: &FilterError) -> i32 {
    match err {
        FilterError::Exclusion(_) => 2,
        FilterError::Config(_) => 2,
        FilterError::Usage(_) => 2,
        FilterError::Fs(_) => 1,
        FilterError::IoError(_) => 1,
    }
}
