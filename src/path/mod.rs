//! Path module
//!
//! Handles normalisation of slash-separated relative paths and the
//! derivation of ancestor chains used by exclusion checks.

mod operations;

pub use operations::{
    Ancestors, ROOT, ancestors, base, clean, escapes_root, is_valid, join, parent, prefixes,
};
