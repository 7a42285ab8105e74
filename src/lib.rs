//! filterfs
//!
//! Read-only filesystem wrappers that hide a configurable set of paths, and
//! everything nested below hidden directories, from their consumers.

pub mod config;
pub mod error;
pub mod filter;
pub mod path;
pub mod storage;
pub mod utils;

pub use error::{ExclusionError, FsError, FsResult};
pub use filter::{ExcludeFs, exclude_by_paths, exclude_by_predicate};
pub use storage::{DirEntry, DirFs, File, MapFile, MapFs, Metadata, ReadOnlyFs};
