//! Classifies recorded source files as current, changed, or missing.

mod error;

use std::collections::btree_map;
use std::io;
use std::path::{Path, PathBuf};

use crate::checksum::{buffers_equal, hash_file, HashKind};
use crate::source_index::{ChecksumEntry, ChecksumIndex};

pub use error::{VerifyError, VerifyErrorKind};

/// Why a source file was reported stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// No file at the recorded path.
    Missing,
    /// File exists but its content hash differs from the recorded one.
    Changed,
}

impl StaleReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StaleReason::Missing => "missing",
            StaleReason::Changed => "changed",
        }
    }
}

/// One stale source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSource {
    /// Path as recorded in the container.
    pub path: String,
    /// Path actually checked on disk, after source-root resolution.
    pub resolved: PathBuf,
    pub reason: StaleReason,
}

/// Lazily verify every index entry against the filesystem, yielding only the
/// stale ones.
///
/// Entries are visited in index order, one file handle at a time; files whose
/// content matches are not yielded. A structural error (unsupported digest
/// length, unreadable file) is yielded once and ends the iteration, since
/// results past it could not be trusted.
pub fn find_stale_sources<'a>(
    index: &'a ChecksumIndex,
    source_root: Option<&'a Path>,
) -> StaleSources<'a> {
    StaleSources {
        entries: index.iter(),
        source_root,
        done: false,
    }
}

/// Once-through sequence of stale source files.
pub struct StaleSources<'a> {
    entries: btree_map::Values<'a, String, ChecksumEntry>,
    source_root: Option<&'a Path>,
    done: bool,
}

impl<'a> Iterator for StaleSources<'a> {
    type Item = Result<StaleSource, VerifyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for entry in self.entries.by_ref() {
            match classify(entry, self.source_root) {
                Ok(None) => continue,
                Ok(Some(stale)) => return Some(Ok(stale)),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Classify one entry; `None` means the on-disk file matches.
fn classify(
    entry: &ChecksumEntry,
    source_root: Option<&Path>,
) -> Result<Option<StaleSource>, VerifyError> {
    let Some(kind) = HashKind::from_digest_len(entry.hash.len()) else {
        return Err(VerifyError {
            kind: VerifyErrorKind::UnsupportedHashLength {
                path: entry.path.clone(),
                len: entry.hash.len(),
            },
        });
    };

    // Recorded paths keep their original separators when joined; `\` is not
    // translated for non-Windows source roots. Not yet handled.
    let resolved = match source_root {
        Some(root) => root.join(&entry.path),
        None => PathBuf::from(&entry.path),
    };

    let actual = match hash_file(&resolved, kind) {
        Ok(digest) => Some(digest),
        // Absence is a classification, not an error. Letting the open report
        // it also covers a file disappearing after any up-front check.
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(VerifyError {
                kind: VerifyErrorKind::Io {
                    path: entry.path.clone(),
                    source,
                },
            })
        }
    };

    if buffers_equal(Some(&entry.hash), actual.as_deref()) {
        return Ok(None);
    }

    let reason = if actual.is_none() {
        StaleReason::Missing
    } else {
        StaleReason::Changed
    };
    Ok(Some(StaleSource {
        path: entry.path.clone(),
        resolved,
        reason,
    }))
}
