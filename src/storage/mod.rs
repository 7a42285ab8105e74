//! Read-only storage abstraction
//!
//! Defines the filesystem and handle traits every backend and wrapper
//! implements, plus an in-memory and an on-disk backend.

pub mod filesystem;
pub mod memory;
pub mod operations;
pub mod results;

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use crate::error::{FsError, FsResult};

pub use filesystem::DirFs;
pub use memory::{MapFile, MapFs};
pub use operations::{read_dir, read_file, stat, walk};
pub use results::{DirEntry, Metadata};

/// A hierarchical read-only filesystem addressed by slash-separated paths
pub trait ReadOnlyFs {
    /// Open the file or directory at `path`
    ///
    /// Absent paths fail with `FsError::NotFound`.
    fn open(&self, path: &str) -> FsResult<Box<dyn File>>;
}

/// An open file or directory
pub trait File: Read + Send {
    fn stat(&self) -> FsResult<Metadata>;

    /// Whether this handle supports `read_dir`
    fn can_read_dir(&self) -> bool {
        false
    }

    /// Read the next directory entries
    ///
    /// With `n > 0` at most `n` entries are returned, and
    /// `FsError::EndOfListing` once the listing is exhausted. With `n <= 0`
    /// all remaining entries are returned, possibly none.
    fn read_dir(&mut self, _n: isize) -> FsResult<Vec<DirEntry>> {
        Err(FsError::Unsupported("readdir"))
    }
}

impl fmt::Debug for dyn File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("metadata", &self.stat().ok())
            .field("can_read_dir", &self.can_read_dir())
            .finish()
    }
}

impl<T: ReadOnlyFs + ?Sized> ReadOnlyFs for &T {
    fn open(&self, path: &str) -> FsResult<Box<dyn File>> {
        (**self).open(path)
    }
}

impl<T: ReadOnlyFs + ?Sized> ReadOnlyFs for Box<T> {
    fn open(&self, path: &str) -> FsResult<Box<dyn File>> {
        (**self).open(path)
    }
}

impl<T: ReadOnlyFs + ?Sized> ReadOnlyFs for Arc<T> {
    fn open(&self, path: &str) -> FsResult<Box<dyn File>> {
        (**self).open(path)
    }
}
