//! In-memory filesystem
//!
//! A tree keyed by slash-separated path. Parent directories are implied by
//! their descendants and do not need entries of their own.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::time::SystemTime;

use crate::error::{FsError, FsResult};
use crate::path;
use crate::storage::{DirEntry, File, Metadata, ReadOnlyFs};

/// A file or explicit directory stored in a `MapFs`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapFile {
    pub data: Vec<u8>,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
}

impl MapFile {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// An explicit, possibly empty, directory
    pub fn dir() -> Self {
        Self {
            is_dir: true,
            ..Self::default()
        }
    }
}

/// In-memory read-only filesystem
#[derive(Debug, Clone, Default)]
pub struct MapFs {
    files: BTreeMap<String, MapFile>,
}

impl MapFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry at `path`
    pub fn insert(&mut self, path: impl Into<String>, file: MapFile) -> Option<MapFile> {
        self.files.insert(path.into(), file)
    }

    /// Builder form of `insert` for a regular file
    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, MapFile::new(data));
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Immediate children of `dir`, sorted by name
    fn children(&self, dir: &str) -> Vec<DirEntry> {
        let prefix = if dir == path::ROOT {
            String::new()
        } else {
            format!("{}/", dir)
        };

        let mut names: BTreeMap<&str, bool> = BTreeMap::new();
        for (key, file) in self.files.range(prefix.clone()..) {
            let Some(rest) = key.strip_prefix(prefix.as_str()) else {
                break;
            };
            if rest.is_empty() {
                continue;
            }
            match rest.split_once('/') {
                Some((name, _)) => {
                    names.insert(name, true);
                }
                None => {
                    *names.entry(rest).or_insert(false) |= file.is_dir;
                }
            }
        }

        names
            .into_iter()
            .map(|(name, is_dir)| DirEntry::new(name, is_dir))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, MapFile)> for MapFs {
    fn from_iter<I: IntoIterator<Item = (S, MapFile)>>(iter: I) -> Self {
        let mut fs = MapFs::new();
        for (path, file) in iter {
            fs.insert(path, file);
        }
        fs
    }
}

impl ReadOnlyFs for MapFs {
    fn open(&self, name: &str) -> FsResult<Box<dyn File>> {
        if !path::is_valid(name) {
            return Err(FsError::invalid_path("open", name));
        }

        let explicit = self.files.get(name);
        if let Some(file) = explicit.filter(|file| !file.is_dir) {
            let metadata = Metadata {
                name: path::base(name).to_string(),
                len: file.data.len() as u64,
                is_dir: false,
                modified: file.modified,
            };
            return Ok(Box::new(MapFileHandle {
                metadata,
                data: Cursor::new(file.data.clone()),
            }));
        }

        let entries = self.children(name);
        if explicit.is_none() && entries.is_empty() && name != path::ROOT {
            return Err(FsError::not_found("open", name));
        }

        let metadata = Metadata {
            name: path::base(name).to_string(),
            len: 0,
            is_dir: true,
            modified: explicit.and_then(|file| file.modified),
        };
        Ok(Box::new(MapDirHandle {
            path: name.to_string(),
            metadata,
            entries,
            offset: 0,
        }))
    }
}

struct MapFileHandle {
    metadata: Metadata,
    data: Cursor<Vec<u8>>,
}

impl Read for MapFileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl File for MapFileHandle {
    fn stat(&self) -> FsResult<Metadata> {
        Ok(self.metadata.clone())
    }
}

struct MapDirHandle {
    path: String,
    metadata: Metadata,
    entries: Vec<DirEntry>,
    offset: usize,
}

impl Read for MapDirHandle {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("read {}: is a directory", self.path),
        ))
    }
}

impl File for MapDirHandle {
    fn stat(&self) -> FsResult<Metadata> {
        Ok(self.metadata.clone())
    }

    fn can_read_dir(&self) -> bool {
        true
    }

    fn read_dir(&mut self, n: isize) -> FsResult<Vec<DirEntry>> {
        let remaining = self.entries.len() - self.offset;
        if n > 0 && remaining == 0 {
            return Err(FsError::EndOfListing);
        }

        let take = if n > 0 {
            remaining.min(n as usize)
        } else {
            remaining
        };
        let batch = self.entries[self.offset..self.offset + take].to_vec();
        self.offset += take;
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MapFs {
        MapFs::new()
            .with_file("a", "a")
            .with_file("b/c", "")
            .with_file("g/h/i", "i")
    }

    #[test]
    fn test_open_file_reads_content() {
        let fs = sample();
        let mut file = fs.open("g/h/i").unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "i");
        assert_eq!(file.stat().unwrap(), Metadata::file("i", 1));
        assert!(!file.can_read_dir());
    }

    #[test]
    fn test_implied_directories() {
        let fs = sample();
        let dir = fs.open("g/h").unwrap();
        assert!(dir.stat().unwrap().is_dir);
        assert!(dir.can_read_dir());
    }

    #[test]
    fn test_root_lists_sorted_children() {
        let fs = sample().with_file("b.txt", "");
        let mut root = fs.open(".").unwrap();
        let names: Vec<String> = root
            .read_dir(-1)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "b.txt", "g"]);
    }

    #[test]
    fn test_bounded_read_dir_reports_end_of_listing() {
        let fs = sample();
        let mut root = fs.open(".").unwrap();
        assert_eq!(root.read_dir(2).unwrap().len(), 2);
        assert_eq!(root.read_dir(2).unwrap().len(), 1);
        assert!(root.read_dir(2).unwrap_err().is_end_of_listing());
        assert!(root.read_dir(-1).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_empty_directory() {
        let mut fs = MapFs::new();
        fs.insert("empty", MapFile::dir());
        let mut dir = fs.open("empty").unwrap();
        assert!(dir.read_dir(0).unwrap().is_empty());
    }

    #[test]
    fn test_missing_and_invalid_paths() {
        let fs = sample();
        assert!(fs.open("zzz").unwrap_err().is_not_found());
        assert!(fs.open("b/c/d").unwrap_err().is_not_found());
        assert_eq!(
            fs.open("./a").unwrap_err().kind(),
            crate::error::ErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_read_on_directory_fails() {
        let fs = sample();
        let mut dir = fs.open("b").unwrap();
        let mut buf = [0u8; 4];
        assert!(dir.read(&mut buf).is_err());
    }
}
