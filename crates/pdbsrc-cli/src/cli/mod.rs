//! CLI for the pdbsrc source verifier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdbsrc_core::config::{self, ReportFormat};
use std::path::PathBuf;

use commands::{run_checksum, run_list, run_verify, HashAlgo};

/// Top-level CLI for the pdbsrc source verifier.
#[derive(Debug, Parser)]
#[command(name = "pdbsrc")]
#[command(
    about = "pdbsrc: verify source files recorded in PDB debug symbols",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Report recorded source files that are missing or changed on disk.
    Verify {
        /// Path to the PDB file.
        pdb: PathBuf,

        /// Resolve recorded source paths against this directory.
        #[arg(long, value_name = "DIR")]
        source_root: Option<PathBuf>,

        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List every source file recorded in the PDB with its checksum.
    List {
        /// Path to the PDB file.
        pdb: PathBuf,
    },

    /// Compute the MD5 or SHA-1 digest of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,

        /// Digest algorithm.
        #[arg(long, default_value = "sha1")]
        algo: HashAlgo,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Verify {
                pdb,
                source_root,
                json,
            } => {
                let source_root = source_root.or_else(|| cfg.source_root.clone());
                let json = json || cfg.report == Some(ReportFormat::Json);
                let stale = run_verify(&pdb, source_root.as_deref(), json)?;
                // Stale files are a finding, not a usage error; distinct exit code.
                if stale > 0 {
                    std::process::exit(1);
                }
            }
            CliCommand::List { pdb } => run_list(&pdb)?,
            CliCommand::Checksum { path, algo } => run_checksum(&path, algo.into())?,
        }

        Ok(())
    }
}
