//! Storage result types
//!
//! Defines the values returned by `stat` and directory listings.

use std::time::SystemTime;

/// Metadata of an opened file or directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Base name of the entry, `"."` for the root
    pub name: String,
    pub len: u64,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
}

impl Metadata {
    pub fn file(name: impl Into<String>, len: u64) -> Self {
        Self {
            name: name.into(),
            len,
            is_dir: false,
            modified: None,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            len: 0,
            is_dir: true,
            modified: None,
        }
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}
