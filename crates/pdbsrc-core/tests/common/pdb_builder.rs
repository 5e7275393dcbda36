//! Minimal MSF 7.0 writer used to fabricate PDB fixtures.
//!
//! Produces a container with the standard layout: superblock, two free-block
//! maps, one block-map page, the stream directory, then stream content.
//! Stream 0 is left nil and stream 1 carries the info stream with the name
//! table; the given records occupy streams 2 onward, in order.

pub const BLOCK_SIZE: usize = 512;

const MAGIC: &[u8; 32] = b"Microsoft C/C++ MSF 7.00\r\n\x1aDS\0\0\0";
const PDB_VERSION_VC70: u32 = 20_000_404;
const NIL_STREAM_SIZE: u32 = 0xFFFF_FFFF;

/// A well-formed source-record stream: 72 header bytes then the digest.
pub fn source_record(hash: &[u8]) -> Vec<u8> {
    let mut v = vec![0u8; 72];
    v.extend_from_slice(hash);
    v
}

/// Serialize a container holding the given named streams.
pub fn build_container(records: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let named: Vec<(&str, u32)> = records
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (*name, (i + 2) as u32))
        .collect();
    let info = info_stream(&named);

    let mut streams: Vec<Option<Vec<u8>>> = vec![None, Some(info)];
    for (_, bytes) in records {
        streams.push(Some(bytes.clone()));
    }

    let bs = BLOCK_SIZE;
    let total_stream_blocks: usize = streams
        .iter()
        .map(|s| s.as_ref().map_or(0, |b| b.len().div_ceil(bs)))
        .sum();
    let dir_len = 4 + 4 * streams.len() + 4 * total_stream_blocks;
    let dir_blocks = dir_len.div_ceil(bs);
    let dir_first = 4usize; // after superblock, two FPMs, and the block map
    let stream_first = dir_first + dir_blocks;

    let mut dir = Vec::with_capacity(dir_len);
    dir.extend_from_slice(&(streams.len() as u32).to_le_bytes());
    for s in &streams {
        let size = match s {
            None => NIL_STREAM_SIZE,
            Some(b) => b.len() as u32,
        };
        dir.extend_from_slice(&size.to_le_bytes());
    }
    let mut next = stream_first;
    let mut placements = Vec::new();
    for s in &streams {
        if let Some(bytes) = s {
            let blocks = bytes.len().div_ceil(bs);
            for k in 0..blocks {
                dir.extend_from_slice(&((next + k) as u32).to_le_bytes());
            }
            placements.push((next, bytes.clone()));
            next += blocks;
        }
    }
    assert_eq!(dir.len(), dir_len);

    let num_blocks = next;
    let mut file = vec![0u8; num_blocks * bs];

    file[..32].copy_from_slice(MAGIC);
    put_u32(&mut file, 32, bs as u32); // block size
    put_u32(&mut file, 36, 1); // free block map
    put_u32(&mut file, 40, num_blocks as u32);
    put_u32(&mut file, 44, dir_len as u32);
    put_u32(&mut file, 48, 0); // reserved
    put_u32(&mut file, 52, 3); // block map page

    for (i, blk) in (dir_first..dir_first + dir_blocks).enumerate() {
        put_u32(&mut file, 3 * bs + 4 * i, blk as u32);
    }

    file[dir_first * bs..dir_first * bs + dir.len()].copy_from_slice(&dir);

    for (block, bytes) in placements {
        file[block * bs..block * bs + bytes.len()].copy_from_slice(&bytes);
    }

    file
}

/// Info stream: header, name buffer, and the serialized named-stream table
/// with every entry in the low buckets.
fn info_stream(entries: &[(&str, u32)]) -> Vec<u8> {
    let mut names = Vec::new();
    let mut offsets = Vec::new();
    for (name, _) in entries {
        offsets.push(names.len() as u32);
        names.extend_from_slice(name.as_bytes());
        names.push(0);
    }

    let mut v = Vec::new();
    v.extend_from_slice(&PDB_VERSION_VC70.to_le_bytes());
    v.extend_from_slice(&0u32.to_le_bytes()); // signature
    v.extend_from_slice(&1u32.to_le_bytes()); // age
    v.extend_from_slice(&[0u8; 16]); // guid
    v.extend_from_slice(&(names.len() as u32).to_le_bytes());
    v.extend_from_slice(&names);

    let capacity = (entries.len() as u32).max(1) * 2;
    v.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    v.extend_from_slice(&capacity.to_le_bytes());

    let words = (capacity as usize).div_ceil(32);
    let mut bits = vec![0u32; words];
    for i in 0..entries.len() {
        bits[i / 32] |= 1 << (i % 32);
    }
    v.extend_from_slice(&(words as u32).to_le_bytes());
    for w in &bits {
        v.extend_from_slice(&w.to_le_bytes());
    }
    v.extend_from_slice(&0u32.to_le_bytes()); // deleted bit vector: empty

    for (i, (_, stream)) in entries.iter().enumerate() {
        v.extend_from_slice(&offsets[i].to_le_bytes());
        v.extend_from_slice(&stream.to_le_bytes());
    }

    // Trailing feature code as real writers emit; readers ignore it.
    v.extend_from_slice(&20_140_508u32.to_le_bytes());
    v
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
