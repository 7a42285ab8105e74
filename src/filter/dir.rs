//! Filtered directory handles

use std::io::{self, Read};

use log::trace;

use crate::error::{FsError, FsResult};
use crate::filter::exclude::HidePredicate;
use crate::path;
use crate::storage::{DirEntry, File, Metadata};

/// Directory handle that drops hidden entries from its listings
///
/// The directory itself was already checked when it was opened, so only the
/// full path of each listed child is tested.
pub struct ExcludeDir {
    path: String,
    hide: HidePredicate,
    inner: Box<dyn File>,
    /// Error held back so the entries read before it could be returned
    pending: Option<FsError>,
}

impl ExcludeDir {
    pub(crate) fn new(path: String, hide: HidePredicate, inner: Box<dyn File>) -> Self {
        Self {
            path,
            hide,
            inner,
            pending: None,
        }
    }

    fn visible(&self, entries: Vec<DirEntry>) -> impl Iterator<Item = DirEntry> + '_ {
        entries.into_iter().filter(move |entry| {
            let child = path::join(&self.path, &entry.name);
            let hidden = (self.hide)(&child);
            if hidden {
                trace!("Dropped hidden entry {} from listing", child);
            }
            !hidden
        })
    }
}

impl Read for ExcludeDir {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl File for ExcludeDir {
    fn stat(&self) -> FsResult<Metadata> {
        self.inner.stat()
    }

    fn can_read_dir(&self) -> bool {
        true
    }

    fn read_dir(&mut self, n: isize) -> FsResult<Vec<DirEntry>> {
        if let Some(e) = self.pending.take() {
            return Err(e);
        }

        if n <= 0 {
            let entries = self.inner.read_dir(n)?;
            return Ok(self.visible(entries).collect());
        }

        // Keep asking for the shortfall so a bounded read is only short at
        // the end of the listing.
        let wanted = n as usize;
        let mut batch = Vec::with_capacity(wanted);
        while batch.len() < wanted {
            let shortfall = (wanted - batch.len()) as isize;
            let entries = match self.inner.read_dir(shortfall) {
                Ok(entries) => entries,
                Err(FsError::EndOfListing) if !batch.is_empty() => break,
                Err(e) if !batch.is_empty() => {
                    self.pending = Some(e);
                    break;
                }
                Err(e) => return Err(e),
            };
            // A backend returning nothing without ending the listing gets
            // its empty batch passed back rather than polled forever.
            if entries.is_empty() {
                break;
            }
            let visible: Vec<DirEntry> = self.visible(entries).collect();
            batch.extend(visible);
        }
        Ok(batch)
    }
}
