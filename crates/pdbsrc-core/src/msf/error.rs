//! Error type for MSF container parsing.

use thiserror::Error;

/// Failure opening or decoding an MSF 7.0 container.
#[derive(Debug, Error)]
pub enum MsfError {
    #[error("read container: {0}")]
    Io(#[from] std::io::Error),
    #[error("not an MSF 7.0 container (bad magic)")]
    BadMagic,
    #[error("unsupported block size {0}")]
    UnsupportedBlockSize(u32),
    #[error("container truncated while reading {0}")]
    Truncated(&'static str),
    #[error("no stream at index {0}")]
    BadStreamIndex(u32),
    #[error("malformed container: {0}")]
    Malformed(&'static str),
}
