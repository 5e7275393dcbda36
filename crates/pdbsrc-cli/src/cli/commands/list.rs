//! `pdbsrc list` – show recorded source files and their checksums.

use anyhow::{Context, Result};
use pdbsrc_core::checksum::HashKind;
use pdbsrc_core::msf::MsfContainer;
use pdbsrc_core::source_index::build_index;
use std::path::Path;

pub fn run_list(pdb: &Path) -> Result<()> {
    let container =
        MsfContainer::open(pdb).with_context(|| format!("open {}", pdb.display()))?;
    let index = build_index(&container)?;

    if index.is_empty() {
        println!("No source files recorded in {}.", pdb.display());
        return Ok(());
    }

    println!("{:<6} {:<42} {}", "ALGO", "CHECKSUM", "PATH");
    for entry in index.iter() {
        let algo = HashKind::from_digest_len(entry.hash.len())
            .map(HashKind::name)
            .unwrap_or("?");
        println!(
            "{:<6} {:<42} {}",
            algo,
            hex::encode(&entry.hash),
            entry.path
        );
    }
    Ok(())
}
