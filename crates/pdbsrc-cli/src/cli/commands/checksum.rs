//! `pdbsrc checksum` – compute a file digest.

use anyhow::{Context, Result};
use clap::ValueEnum;
use pdbsrc_core::checksum::{hash_file, HashKind};
use std::path::Path;

/// Digest algorithm selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashAlgo {
    Md5,
    Sha1,
}

impl From<HashAlgo> for HashKind {
    fn from(a: HashAlgo) -> Self {
        match a {
            HashAlgo::Md5 => HashKind::Md5,
            HashAlgo::Sha1 => HashKind::Sha1,
        }
    }
}

/// Compute and print the digest of the given file as lowercase hex.
pub fn run_checksum(path: &Path, kind: HashKind) -> Result<()> {
    let digest =
        hash_file(path, kind).with_context(|| format!("hash {}", path.display()))?;
    println!("{}  {}", hex::encode(digest), path.display());
    Ok(())
}
