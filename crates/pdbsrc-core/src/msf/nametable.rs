//! The info stream's named-stream table.
//!
//! Maps stream names like `/src/files/...` to stream indices. Serialized as a
//! NUL-terminated string buffer followed by a compacted hash table; occupied
//! buckets are stored in bucket order, which this parser preserves as the
//! canonical name-table order.

use super::{read_u32, MsfError};

/// Info-stream versions this reader understands (VC 7.0 and 8.0).
const PDB_VERSION_VC70: u32 = 20_000_404;
const PDB_VERSION_VC80: u32 = 20_040_203;

/// Byte length of the info-stream header: version, signature, age, GUID.
const INFO_HEADER_LEN: usize = 4 + 4 + 4 + 16;

pub(crate) fn parse_name_table(info: &[u8]) -> Result<Vec<(String, u32)>, MsfError> {
    let mut pos = 0usize;
    let version = read_u32(info, &mut pos, "info stream header")?;
    if version != PDB_VERSION_VC70 && version != PDB_VERSION_VC80 {
        return Err(MsfError::Malformed("unrecognized info stream version"));
    }
    pos = INFO_HEADER_LEN;
    if pos > info.len() {
        return Err(MsfError::Truncated("info stream header"));
    }

    let names_len = read_u32(info, &mut pos, "name buffer length")? as usize;
    let names = info
        .get(pos..pos + names_len)
        .ok_or(MsfError::Truncated("name buffer"))?;
    pos += names_len;

    let size = read_u32(info, &mut pos, "named stream map size")? as usize;
    let capacity = read_u32(info, &mut pos, "named stream map capacity")? as usize;
    let present = read_bit_vector(info, &mut pos, "present bit vector")?;
    let _deleted = read_bit_vector(info, &mut pos, "deleted bit vector")?;

    // Counts come from the file; clamp capacity hints to what the remaining
    // bytes could actually hold before allocating.
    let mut table = Vec::with_capacity(size.min(info.len().saturating_sub(pos) / 8));
    for bucket in 0..capacity {
        if !bit_set(&present, bucket) {
            continue;
        }
        let offset = read_u32(info, &mut pos, "named stream map entry")? as usize;
        let stream = read_u32(info, &mut pos, "named stream map entry")?;
        table.push((name_at(names, offset)?, stream));
    }
    if table.len() != size {
        return Err(MsfError::Malformed("named stream map entry count"));
    }

    Ok(table)
}

fn read_bit_vector(
    data: &[u8],
    pos: &mut usize,
    what: &'static str,
) -> Result<Vec<u32>, MsfError> {
    let words = read_u32(data, pos, what)? as usize;
    let mut v = Vec::with_capacity(words.min(data.len().saturating_sub(*pos) / 4));
    for _ in 0..words {
        v.push(read_u32(data, pos, what)?);
    }
    Ok(v)
}

fn bit_set(words: &[u32], bit: usize) -> bool {
    words
        .get(bit / 32)
        .is_some_and(|w| w & (1 << (bit % 32)) != 0)
}

/// NUL-terminated string at `offset` in the name buffer.
fn name_at(names: &[u8], offset: usize) -> Result<String, MsfError> {
    let tail = names
        .get(offset..)
        .ok_or(MsfError::Malformed("name offset out of range"))?;
    let end = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(MsfError::Malformed("unterminated name"))?;
    String::from_utf8(tail[..end].to_vec())
        .map_err(|_| MsfError::Malformed("name is not valid UTF-8"))
}
