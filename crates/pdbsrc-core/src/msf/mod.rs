//! Read-only MSF 7.0 container access (the on-disk layout of Microsoft PDBs).
//!
//! Parses just enough of the container to expose the named-stream table and
//! raw stream contents: superblock, stream directory, and the info stream's
//! named-stream map. Writing, type records, and symbol records are out of
//! scope.

mod directory;
mod error;
mod nametable;
mod superblock;

pub use error::MsfError;

use std::fs;
use std::path::Path;

use crate::container::SymbolContainer;
use directory::StreamDirectory;

/// Stream index of the PDB info stream, fixed by the format.
const INFO_STREAM: u32 = 1;

/// An opened MSF container with its stream directory and name table decoded.
pub struct MsfContainer {
    data: Vec<u8>,
    directory: StreamDirectory,
    names: Vec<(String, u32)>,
}

impl MsfContainer {
    /// Open a PDB file and decode its stream directory and name table.
    pub fn open(path: &Path) -> Result<Self, MsfError> {
        let data = fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Decode a container already loaded into memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, MsfError> {
        let sb = superblock::parse_superblock(&data)?;
        if (sb.num_blocks as u64) * (sb.block_size as u64) > data.len() as u64 {
            return Err(MsfError::Truncated("container body"));
        }
        let directory = StreamDirectory::parse(&data, &sb)?;
        let info = directory.stream_bytes(&data, INFO_STREAM)?;
        let names = nametable::parse_name_table(&info)?;
        Ok(Self {
            data,
            directory,
            names,
        })
    }

    pub fn stream_count(&self) -> usize {
        self.directory.stream_count()
    }
}

impl SymbolContainer for MsfContainer {
    fn name_table(&self) -> &[(String, u32)] {
        &self.names
    }

    fn read_stream(&self, index: u32) -> anyhow::Result<Vec<u8>> {
        Ok(self.directory.stream_bytes(&self.data, index)?)
    }
}

/// Read a little-endian u32 at `pos`, advancing it. `what` names the structure
/// being decoded for the truncation error.
pub(crate) fn read_u32(data: &[u8], pos: &mut usize, what: &'static str) -> Result<u32, MsfError> {
    let bytes = data.get(*pos..*pos + 4).ok_or(MsfError::Truncated(what))?;
    *pos += 4;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
