//! On-disk filesystem
//!
//! Exposes a directory of the host filesystem as a read-only tree. Paths are
//! validated before they are mapped onto the host, so `..` and absolute
//! paths never reach it.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{FsError, FsResult};
use crate::path;
use crate::storage::{DirEntry, File, Metadata, ReadOnlyFs};

/// Read-only view of a host directory
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a validated relative path onto the host
    fn real_path(&self, name: &str) -> PathBuf {
        if name == path::ROOT {
            self.root.clone()
        } else {
            self.root.join(name)
        }
    }
}

fn metadata_for(name: &str, metadata: &fs::Metadata) -> Metadata {
    Metadata {
        name: path::base(name).to_string(),
        len: if metadata.is_dir() { 0 } else { metadata.len() },
        is_dir: metadata.is_dir(),
        modified: metadata.modified().ok(),
    }
}

impl ReadOnlyFs for DirFs {
    fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
        if !path::is_valid(name) {
            return Err(FsError::invalid_path("open", name));
        }

        let real_path = self.real_path(name);
        let host_metadata =
            fs::metadata(&real_path).map_err(|e| FsError::from_io("open", name, e))?;
        let metadata = metadata_for(name, &host_metadata);

        if metadata.is_dir {
            let entries =
                fs::read_dir(&real_path).map_err(|e| FsError::from_io("open", name, e))?;
            debug!("Opened directory {} (real: {})", name, real_path.display());
            return Ok(Box::new(OsDir {
                path: name.to_string(),
                metadata,
                entries,
                pending: None,
            }));
        }

        let file = fs::File::open(&real_path).map_err(|e| FsError::from_io("open", name, e))?;
        Ok(Box::new(OsFile { metadata, file }))
    }
}

struct OsFile {
    metadata: Metadata,
    file: fs::File,
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl File for OsFile {
    fn stat(&self) -> FsResult<Metadata> {
        Ok(self.metadata.clone())
    }
}

struct OsDir {
    path: String,
    metadata: Metadata,
    entries: fs::ReadDir,
    /// Error held back so the entries read before it could be returned
    pending: Option<FsError>,
}

impl OsDir {
    fn next_entry(&mut self) -> Option<FsResult<DirEntry>> {
        let entry = self.entries.next()?;
        Some(
            entry
                .and_then(|entry| {
                    let is_dir = entry.file_type()?.is_dir();
                    Ok(DirEntry::new(
                        entry.file_name().to_string_lossy().into_owned(),
                        is_dir,
                    ))
                })
                .map_err(|e| FsError::from_io("readdir", &self.path, e)),
        )
    }
}

impl Read for OsDir {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("read {}: is a directory", self.path),
        ))
    }
}

impl File for OsDir {
    fn stat(&self) -> FsResult<Metadata> {
        Ok(self.metadata.clone())
    }

    fn can_read_dir(&self) -> bool {
        true
    }

    fn read_dir(&mut self, n: isize) -> FsResult<Vec<DirEntry>> {
        if let Some(e) = self.pending.take() {
            return Err(e);
        }

        let mut batch = Vec::new();
        while n <= 0 || batch.len() < n as usize {
            match self.next_entry() {
                Some(Ok(entry)) => batch.push(entry),
                Some(Err(e)) if batch.is_empty() => return Err(e),
                Some(Err(e)) => {
                    self.pending = Some(e);
                    break;
                }
                None => break,
            }
        }

        if n > 0 && batch.is_empty() {
            return Err(FsError::EndOfListing);
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), "a").unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b").join("c"), "").unwrap();
        dir
    }

    #[test]
    fn test_open_file() {
        let dir = sample();
        let fs = DirFs::new(dir.path());
        let mut file = fs.open("a").unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "a");
        let metadata = file.stat().unwrap();
        assert_eq!(metadata.name, "a");
        assert_eq!(metadata.len, 1);
        assert!(!metadata.is_dir);
    }

    #[test]
    fn test_list_root() {
        let dir = sample();
        let fs = DirFs::new(dir.path());
        assert_eq!(fs.root(), dir.path());
        let mut root = fs.open(".").unwrap();
        assert_eq!(root.stat().unwrap().name, ".");
        let mut names: Vec<String> = root
            .read_dir(-1)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_bounded_listing_ends() {
        let dir = sample();
        let fs = DirFs::new(dir.path());
        let mut b = fs.open("b").unwrap();
        assert_eq!(b.read_dir(5).unwrap(), vec![DirEntry::new("c", false)]);
        assert!(b.read_dir(5).unwrap_err().is_end_of_listing());
    }

    #[test]
    fn test_rejects_paths_outside_root() {
        let dir = sample();
        let fs = DirFs::new(dir.path().join("b"));
        assert!(matches!(
            fs.open("../a"),
            Err(FsError::InvalidPath { .. })
        ));
        assert!(matches!(fs.open("/etc"), Err(FsError::InvalidPath { .. })));
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = sample();
        let fs = DirFs::new(dir.path());
        assert!(fs.open("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_held_back_error_is_reported_before_more_entries() {
        let dir = sample();
        let dir_fs = DirFs::new(dir.path());
        let metadata = dir_fs.open(".").unwrap().stat().unwrap();
        let mut handle = OsDir {
            path: ".".to_string(),
            metadata,
            entries: fs::read_dir(dir.path()).unwrap(),
            pending: Some(FsError::from_io(
                "readdir",
                ".",
                io::Error::other("disk gone"),
            )),
        };
        assert_eq!(
            handle.read_dir(1).unwrap_err().kind(),
            crate::error::ErrorKind::Io
        );
        assert_eq!(handle.read_dir(-1).unwrap().len(), 2);
    }
}
