//! Error types
//!
//! Defines the errors returned by filesystems, exclusion wrappers and the CLI.

use std::fmt;
use std::io;

/// Result alias used by every filesystem operation
pub type FsResult<T> = Result<T, FsError>;

/// Coarse classification of an `FsError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidPath,
    NotADirectory,
    PermissionDenied,
    Io,
    EndOfListing,
    Unsupported,
}

/// Filesystem errors
///
/// Path-carrying variants record the operation name and the path the caller
/// asked for.
#[derive(Debug)]
pub enum FsError {
    NotFound { op: &'static str, path: String },
    InvalidPath { op: &'static str, path: String },
    NotADirectory { op: &'static str, path: String },
    PermissionDenied { op: &'static str, path: String },
    Io {
        op: &'static str,
        path: String,
        source: io::Error,
    },
    /// A bounded directory read found nothing left to return
    EndOfListing,
    /// The handle does not support the operation
    Unsupported(&'static str),
}

impl FsError {
    pub fn not_found(op: &'static str, path: &str) -> Self {
        FsError::NotFound {
            op,
            path: path.to_string(),
        }
    }

    pub fn invalid_path(op: &'static str, path: &str) -> Self {
        FsError::InvalidPath {
            op,
            path: path.to_string(),
        }
    }

    /// Map an I/O error onto the matching variant
    pub fn from_io(op: &'static str, path: &str, source: io::Error) -> Self {
        let path = path.to_string();
        match source.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { op, path },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { op, path },
            io::ErrorKind::NotADirectory => FsError::NotADirectory { op, path },
            _ => FsError::Io { op, path, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound { .. } => ErrorKind::NotFound,
            FsError::InvalidPath { .. } => ErrorKind::InvalidPath,
            FsError::NotADirectory { .. } => ErrorKind::NotADirectory,
            FsError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            FsError::Io { .. } => ErrorKind::Io,
            FsError::EndOfListing => ErrorKind::EndOfListing,
            FsError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_end_of_listing(&self) -> bool {
        self.kind() == ErrorKind::EndOfListing
    }

    /// The path the failed operation was asked about, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            FsError::NotFound { path, .. }
            | FsError::InvalidPath { path, .. }
            | FsError::NotADirectory { path, .. }
            | FsError::PermissionDenied { path, .. }
            | FsError::Io { path, .. } => Some(path),
            FsError::EndOfListing | FsError::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound { op, path } => write!(f, "{} {}: file does not exist", op, path),
            FsError::InvalidPath { op, path } => write!(f, "{} {}: invalid path", op, path),
            FsError::NotADirectory { op, path } => write!(f, "{} {}: not a directory", op, path),
            FsError::PermissionDenied { op, path } => {
                write!(f, "{} {}: permission denied", op, path)
            }
            FsError::Io { op, path, source } => write!(f, "{} {}: {}", op, path, source),
            FsError::EndOfListing => write!(f, "end of directory listing"),
            FsError::Unsupported(op) => write!(f, "{}: operation not supported", op),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Construction-time errors of the exclusion wrappers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionError {
    /// The configuration would hide the root directory
    RootExcluded,
    /// A hidden path points outside the root
    InvalidPath(String),
}

impl fmt::Display for ExclusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionError::RootExcluded => write!(f, "cannot hide the root path \".\""),
            ExclusionError::InvalidPath(p) => write!(f, "invalid hidden path: {}", p),
        }
    }
}

impl std::error::Error for ExclusionError {}

/// Top-level error for the command line tool
#[derive(Debug)]
pub enum FilterError {
    Fs(FsError),
    Exclusion(ExclusionError),
    Config(config::ConfigError),
    IoError(io::Error),
    Usage(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::Fs(e) => write!(f, "Filesystem error: {}", e),
            FilterError::Exclusion(e) => write!(f, "Exclusion error: {}", e),
            FilterError::Config(e) => write!(f, "Configuration error: {}", e),
            FilterError::IoError(e) => write!(f, "I/O error: {}", e),
            FilterError::Usage(msg) => write!(f, "Usage: {}", msg),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FsError> for FilterError {
    fn from(error: FsError) -> Self {
        FilterError::Fs(error)
    }
}

impl From<ExclusionError> for FilterError {
    fn from(error: ExclusionError) -> Self {
        FilterError::Exclusion(error)
    }
}

impl From<config::ConfigError> for FilterError {
    fn from(error: config::ConfigError) -> Self {
        FilterError::Config(error)
    }
}

impl From<io::Error> for FilterError {
    fn from(error: io::Error) -> Self {
        FilterError::IoError(error)
    }
}
