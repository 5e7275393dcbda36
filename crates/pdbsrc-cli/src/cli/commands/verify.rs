//! `pdbsrc verify` – report missing or changed source files.

use anyhow::{Context, Result};
use pdbsrc_core::msf::MsfContainer;
use pdbsrc_core::source_index::build_index;
use pdbsrc_core::verify::find_stale_sources;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StaleReport<'a> {
    path: &'a str,
    resolved: &'a Path,
    reason: &'static str,
}

/// Verify all recorded source files; returns how many were stale.
pub fn run_verify(pdb: &Path, source_root: Option<&Path>, json: bool) -> Result<usize> {
    let container =
        MsfContainer::open(pdb).with_context(|| format!("open {}", pdb.display()))?;
    let index = build_index(&container)?;
    tracing::info!("{}: {} recorded source files", pdb.display(), index.len());

    let mut stale = Vec::new();
    for item in find_stale_sources(&index, source_root) {
        stale.push(item?);
    }

    if json {
        let report: Vec<StaleReport<'_>> = stale
            .iter()
            .map(|s| StaleReport {
                path: &s.path,
                resolved: &s.resolved,
                reason: s.reason.as_str(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if stale.is_empty() {
        println!("All {} recorded source files match.", index.len());
    } else {
        println!("{:<8} {}", "REASON", "PATH");
        for s in &stale {
            println!("{:<8} {}", s.reason.as_str(), s.path);
        }
    }

    Ok(stale.len())
}
