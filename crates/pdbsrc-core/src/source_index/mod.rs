//! Builds the path→checksum index from a symbol container's name table.
//!
//! Source indexing stores one stream per compiled source file under the
//! `/src/files/` prefix in the container's name table; the stream's trailing
//! bytes are the file's content digest as it was at build time.

use std::collections::btree_map;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::container::SymbolContainer;

/// Name-table prefix marking a record as an embedded source-file entry.
pub const SOURCE_FILE_PREFIX: &str = "/src/files/";

/// Fixed number of bytes preceding the digest in a source-file stream.
///
/// Specific to the srcsrv-era PDB revision this tool consumes; other
/// container revisions may lay the record out differently. The digest is
/// whatever follows these bytes, and its length (16 or 20) identifies the
/// algorithm.
pub const SOURCE_STREAM_HEADER_LEN: usize = 72;

/// One source file recorded in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    /// Path as recorded, with the `/src/files/` prefix stripped.
    pub path: String,
    /// Digest bytes stored at the tail of the record's stream.
    pub hash: Vec<u8>,
}

/// Path→checksum mapping with case-insensitive path identity.
///
/// Keys fold ASCII case (the recorded paths come from Windows toolchains, so
/// `Foo.cs` and `foo.cs` are the same file). Iteration order is the
/// folded-path sort order, deterministic across runs. Read-only once built.
#[derive(Debug, Default)]
pub struct ChecksumIndex {
    entries: BTreeMap<String, ChecksumEntry>,
}

impl ChecksumIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by path, ignoring ASCII case.
    pub fn get(&self, path: &str) -> Option<&ChecksumEntry> {
        self.entries.get(&path.to_ascii_lowercase())
    }

    /// Entries in deterministic (folded-path) order.
    pub fn iter(&self) -> btree_map::Values<'_, String, ChecksumEntry> {
        self.entries.values()
    }

    fn insert(&mut self, entry: ChecksumEntry) {
        let key = entry.path.to_ascii_lowercase();
        if let Some(prev) = self.entries.insert(key, entry) {
            tracing::warn!(
                "duplicate source record for {}: keeping the later entry",
                prev.path
            );
        }
    }
}

/// Failure extracting checksums from a container.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A source record's stream cannot hold the fixed header, so no digest
    /// can be recovered; the container is corrupt.
    #[error("source record {name}: stream is {len} bytes, shorter than the fixed 72-byte record header")]
    RecordTooShort { name: String, len: usize },
    /// The container failed to produce a record's stream bytes.
    #[error("source record {name}: reading stream {index} failed: {cause}")]
    Stream {
        name: String,
        index: u32,
        cause: anyhow::Error,
    },
}

/// Scan the container's name table and extract one checksum entry per
/// embedded source-file record.
///
/// Records whose stream is shorter than the fixed header abort the scan: that
/// indicates container corruption, and a partial index would be misleading.
/// Two records whose paths differ only in case collapse to one entry, last
/// record wins.
pub fn build_index(container: &impl SymbolContainer) -> Result<ChecksumIndex, IndexError> {
    let mut index = ChecksumIndex::default();

    for (name, stream) in container.name_table() {
        let Some(path) = name.strip_prefix(SOURCE_FILE_PREFIX) else {
            continue;
        };

        let bytes = container
            .read_stream(*stream)
            .map_err(|cause| IndexError::Stream {
                name: name.clone(),
                index: *stream,
                cause,
            })?;

        if bytes.len() < SOURCE_STREAM_HEADER_LEN {
            return Err(IndexError::RecordTooShort {
                name: name.clone(),
                len: bytes.len(),
            });
        }

        index.insert(ChecksumEntry {
            path: path.to_string(),
            hash: bytes[SOURCE_STREAM_HEADER_LEN..].to_vec(),
        });
    }

    Ok(index)
}

#[cfg(test)]
mod tests;
