//! Error handling
//!
//! Defines error types and handling for filesystems and exclusion wrappers.

pub mod handlers;
pub mod types;

pub use types::*;
