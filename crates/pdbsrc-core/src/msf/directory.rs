//! The stream directory: per-stream sizes and block lists.

use super::superblock::SuperBlock;
use super::{read_u32, MsfError};

/// Directory size value marking a stream slot as nil (no stream).
const NIL_STREAM_SIZE: u32 = 0xFFFF_FFFF;

/// One present stream: its byte length and the blocks holding it, in order.
struct StreamRecord {
    size: usize,
    blocks: Vec<u32>,
}

/// Parsed stream directory; nil slots are kept so stream indices line up.
pub(crate) struct StreamDirectory {
    block_size: usize,
    streams: Vec<Option<StreamRecord>>,
}

impl StreamDirectory {
    pub(crate) fn parse(data: &[u8], sb: &SuperBlock) -> Result<Self, MsfError> {
        let bs = sb.block_size as usize;
        let dir_len = sb.num_directory_bytes as usize;
        let dir_blocks = dir_len.div_ceil(bs);

        // The directory's block list must fit one block-map page. Directories
        // big enough to need more than one page do not occur at the container
        // sizes this tool handles.
        if dir_blocks * 4 > bs {
            return Err(MsfError::Malformed("oversized stream directory"));
        }

        let map = block(data, bs, sb.block_map_addr)?;
        let mut dir = Vec::with_capacity(dir_blocks * bs);
        for i in 0..dir_blocks {
            let mut pos = 4 * i;
            let idx = read_u32(map, &mut pos, "block map")?;
            dir.extend_from_slice(block(data, bs, idx)?);
        }
        dir.truncate(dir_len);
        if dir.len() < dir_len {
            return Err(MsfError::Truncated("stream directory"));
        }

        let mut pos = 0usize;
        let num_streams = read_u32(&dir, &mut pos, "stream count")? as usize;
        // Counts come from the file; clamp capacity hints to what the
        // directory bytes could actually hold before allocating.
        let mut sizes = Vec::with_capacity(num_streams.min(dir.len() / 4));
        for _ in 0..num_streams {
            sizes.push(read_u32(&dir, &mut pos, "stream sizes")?);
        }

        let mut streams = Vec::with_capacity(sizes.len());
        for &size in &sizes {
            if size == NIL_STREAM_SIZE {
                streams.push(None);
                continue;
            }
            let size = size as usize;
            let num = size.div_ceil(bs);
            let mut blocks = Vec::with_capacity(num.min(dir.len().saturating_sub(pos) / 4));
            for _ in 0..num {
                blocks.push(read_u32(&dir, &mut pos, "stream block list")?);
            }
            streams.push(Some(StreamRecord { size, blocks }));
        }

        Ok(Self {
            block_size: bs,
            streams,
        })
    }

    pub(crate) fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Reassemble the full content of one stream from its blocks.
    pub(crate) fn stream_bytes(&self, data: &[u8], index: u32) -> Result<Vec<u8>, MsfError> {
        let record = self
            .streams
            .get(index as usize)
            .and_then(|s| s.as_ref())
            .ok_or(MsfError::BadStreamIndex(index))?;

        let bs = self.block_size;
        let mut out = Vec::with_capacity(record.size);
        for &idx in &record.blocks {
            let b = block(data, bs, idx)?;
            let take = (record.size - out.len()).min(bs);
            out.extend_from_slice(&b[..take]);
        }
        if out.len() != record.size {
            return Err(MsfError::Truncated("stream content"));
        }
        Ok(out)
    }
}

/// Bounds-checked view of one block.
fn block(data: &[u8], block_size: usize, index: u32) -> Result<&[u8], MsfError> {
    let start = (index as usize)
        .checked_mul(block_size)
        .ok_or(MsfError::Truncated("block"))?;
    data.get(start..start + block_size)
        .ok_or(MsfError::Truncated("block"))
}
