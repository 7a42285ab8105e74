//! Exclusion filtering
//!
//! Wraps a `ReadOnlyFs` so that a set of paths, and everything nested below
//! them, appear not to exist.

pub mod dir;
pub mod exclude;

pub use dir::ExcludeDir;
pub use exclude::{ExcludeFs, HidePredicate, exclude_by_paths, exclude_by_predicate};
