//! Content hashing for source verification.
//!
//! The container records one MD5 or SHA-1 digest per source file and
//! identifies the algorithm only by the digest's byte length. Hashing here is
//! stateless per call, so entries can be processed independently.

use md5::{Digest, Md5};
use sha1::Sha1;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Hash algorithm, selected by the stored digest's byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    Md5,
    Sha1,
}

impl HashKind {
    /// Map a stored digest length to its algorithm: 16 bytes is MD5,
    /// 20 bytes is SHA-1. Anything else is not a digest we know how to check.
    pub fn from_digest_len(len: usize) -> Option<HashKind> {
        match len {
            16 => Some(HashKind::Md5),
            20 => Some(HashKind::Sha1),
            _ => None,
        }
    }

    pub fn digest_len(self) -> usize {
        match self {
            HashKind::Md5 => 16,
            HashKind::Sha1 => 20,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashKind::Md5 => "md5",
            HashKind::Sha1 => "sha1",
        }
    }
}

/// Compute the digest of a file.
/// Reads in chunks to keep memory use bounded; the handle is dropped before
/// returning, including on error.
pub fn hash_file(path: &Path, kind: HashKind) -> io::Result<Vec<u8>> {
    let f = File::open(path)?;
    match kind {
        HashKind::Md5 => hash_reader::<Md5>(f),
        HashKind::Sha1 => hash_reader::<Sha1>(f),
    }
}

/// Digest of an in-memory buffer.
pub fn hash_bytes(data: &[u8], kind: HashKind) -> Vec<u8> {
    match kind {
        HashKind::Md5 => Md5::digest(data).to_vec(),
        HashKind::Sha1 => Sha1::digest(data).to_vec(),
    }
}

fn hash_reader<D: Digest>(mut r: impl Read) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = r.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

/// Byte-sequence equality where either side may be absent.
///
/// An absent side models "no hash could be computed" (the file does not
/// exist). Two absent sides compare equal; a one-sided absence does not.
pub fn buffers_equal(a: Option<&[u8]>, b: Option<&[u8]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
