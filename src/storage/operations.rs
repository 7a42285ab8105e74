//! Storage operations
//!
//! Convenience operations over any `ReadOnlyFs`. Everything goes through
//! `open`, so wrappers apply their rules to these as well.

use std::io::Read;

use crate::error::{FsError, FsResult};
use crate::path;
use crate::storage::{DirEntry, Metadata, ReadOnlyFs};

/// Metadata of the entry at `name`
pub fn stat<F: ReadOnlyFs + ?Sized>(fsys: &F, name: &str) -> FsResult<Metadata> {
    fsys.open(name)?.stat()
}

/// Whole content of the file at `name`
pub fn read_file<F: ReadOnlyFs + ?Sized>(fsys: &F, name: &str) -> FsResult<Vec<u8>> {
    let mut file = fsys.open(name)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| FsError::from_io("read", name, e))?;
    Ok(data)
}

/// Full listing of the directory at `name`, sorted by entry name
pub fn read_dir<F: ReadOnlyFs + ?Sized>(fsys: &F, name: &str) -> FsResult<Vec<DirEntry>> {
    let mut dir = fsys.open(name)?;
    if !dir.can_read_dir() {
        return Err(FsError::NotADirectory {
            op: "readdir",
            path: name.to_string(),
        });
    }

    let mut entries = dir.read_dir(-1)?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Every path reachable below `root`, depth first in lexical order
///
/// `root` itself is not part of the result.
pub fn walk<F: ReadOnlyFs + ?Sized>(fsys: &F, root: &str) -> FsResult<Vec<String>> {
    let mut found = Vec::new();
    walk_into(fsys, &path::clean(root), &mut found)?;
    Ok(found)
}

fn walk_into<F: ReadOnlyFs + ?Sized>(
    fsys: &F,
    dir: &str,
    found: &mut Vec<String>,
) -> FsResult<()> {
    for entry in read_dir(fsys, dir)? {
        let child = path::join(dir, &entry.name);
        found.push(child.clone());
        if entry.is_dir {
            walk_into(fsys, &child, found)?;
        }
    }
    Ok(())
}
