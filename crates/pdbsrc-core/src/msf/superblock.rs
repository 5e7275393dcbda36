//! The MSF superblock: first 56 bytes of the container.

use super::{read_u32, MsfError};

/// 32-byte magic opening every MSF 7.0 file.
pub(crate) const MSF_MAGIC: &[u8; 32] = b"Microsoft C/C++ MSF 7.00\r\n\x1aDS\0\0\0";

/// Fixed header length: magic plus six u32 fields.
const HEADER_LEN: usize = 56;

/// Header fields the reader needs; free-block-map and reserved fields are
/// skipped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SuperBlock {
    /// Size of one block in bytes; power of two between 512 and 4096.
    pub block_size: u32,
    /// Total number of blocks in the file.
    pub num_blocks: u32,
    /// Length of the serialized stream directory in bytes.
    pub num_directory_bytes: u32,
    /// Block index of the page listing the directory's block indices.
    pub block_map_addr: u32,
}

pub(crate) fn parse_superblock(data: &[u8]) -> Result<SuperBlock, MsfError> {
    if data.len() < HEADER_LEN {
        return Err(MsfError::Truncated("superblock"));
    }
    if &data[..32] != MSF_MAGIC {
        return Err(MsfError::BadMagic);
    }

    let mut pos = 32usize;
    let block_size = read_u32(data, &mut pos, "superblock")?;
    let _free_block_map = read_u32(data, &mut pos, "superblock")?;
    let num_blocks = read_u32(data, &mut pos, "superblock")?;
    let num_directory_bytes = read_u32(data, &mut pos, "superblock")?;
    let _reserved = read_u32(data, &mut pos, "superblock")?;
    let block_map_addr = read_u32(data, &mut pos, "superblock")?;

    if !matches!(block_size, 512 | 1024 | 2048 | 4096) {
        return Err(MsfError::UnsupportedBlockSize(block_size));
    }

    Ok(SuperBlock {
        block_size,
        num_blocks,
        num_directory_bytes,
        block_map_addr,
    })
}
