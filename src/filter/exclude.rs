//! Exclusion wrapper
//!
//! Hides every path for which a predicate holds on the path or on one of its
//! ancestors. Hidden paths fail to open exactly like absent ones.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::error::{ExclusionError, FsError, FsResult};
use crate::filter::dir::ExcludeDir;
use crate::path;
use crate::storage::{File, ReadOnlyFs};

/// Decides whether a cleaned path is hidden
pub type HidePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A filesystem identical to the wrapped one minus the hidden paths
///
/// Hiding a directory hides everything below it.
#[derive(Clone)]
pub struct ExcludeFs<F> {
    fsys: F,
    hide: HidePredicate,
}

impl<F: ReadOnlyFs> ExcludeFs<F> {
    /// Wrap `fsys`, hiding every path matched by `hide`
    ///
    /// Fails with `ExclusionError::RootExcluded` if `hide` matches the root.
    pub fn new<P>(fsys: F, hide: P) -> Result<Self, ExclusionError>
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        if hide(path::ROOT) {
            return Err(ExclusionError::RootExcluded);
        }
        Ok(Self {
            fsys,
            hide: Arc::new(hide),
        })
    }

    /// Whether `name`, or any directory containing it, is hidden
    pub fn hides(&self, name: &str) -> bool {
        let cleaned = path::clean(name);
        path::ancestors(&cleaned).any(|p| (self.hide)(p))
    }

    /// The wrapped filesystem
    pub fn inner(&self) -> &F {
        &self.fsys
    }
}

impl<F: ReadOnlyFs> ReadOnlyFs for ExcludeFs<F> {
    fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
        let cleaned = path::clean(name);
        if path::escapes_root(&cleaned) {
            return Err(FsError::invalid_path("open", name));
        }

        if path::ancestors(&cleaned).any(|p| (self.hide)(p)) {
            debug!("Rejected open of hidden path {}", name);
            return Err(FsError::not_found("open", name));
        }

        // Absent paths report the path as requested, like hidden ones.
        let file = self.fsys.open(&cleaned).map_err(|e| match e {
            FsError::NotFound { op, .. } => FsError::not_found(op, name),
            other => other,
        })?;
        let metadata = file.stat()?;
        if metadata.is_dir && file.can_read_dir() {
            return Ok(Box::new(ExcludeDir::new(
                cleaned,
                Arc::clone(&self.hide),
                file,
            )));
        }
        Ok(file)
    }
}

impl<F: fmt::Debug> fmt::Debug for ExcludeFs<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludeFs")
            .field("fsys", &self.fsys)
            .finish_non_exhaustive()
    }
}

/// Hide every path matched by `hide`, along with everything below it
pub fn exclude_by_predicate<F, P>(fsys: F, hide: P) -> Result<ExcludeFs<F>, ExclusionError>
where
    F: ReadOnlyFs,
    P: Fn(&str) -> bool + Send + Sync + 'static,
{
    ExcludeFs::new(fsys, hide)
}

/// Hide the given paths, along with everything below them
///
/// Paths are cleaned before use. Fails if one of them is the root or points
/// outside it.
pub fn exclude_by_paths<F, I, S>(fsys: F, paths: I) -> Result<ExcludeFs<F>, ExclusionError>
where
    F: ReadOnlyFs,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hidden = HashSet::new();
    for p in paths {
        let cleaned = path::clean(p.as_ref());
        if cleaned == path::ROOT {
            return Err(ExclusionError::RootExcluded);
        }
        if path::escapes_root(&cleaned) {
            return Err(ExclusionError::InvalidPath(p.as_ref().to_string()));
        }
        hidden.insert(cleaned);
    }

    debug!("Hiding {} paths", hidden.len());
    ExcludeFs::new(fsys, move |p: &str| hidden.contains(p))
}
