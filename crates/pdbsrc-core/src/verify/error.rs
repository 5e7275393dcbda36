//! Error types for source verification.

use std::fmt;

/// Structural failure during verification. Distinct from a stale file, which
/// is a normal result, not an error.
#[derive(Debug)]
pub struct VerifyError {
    pub kind: VerifyErrorKind,
}

#[derive(Debug)]
pub enum VerifyErrorKind {
    /// Stored digest is neither MD5-sized (16 bytes) nor SHA-1-sized
    /// (20 bytes); the index data cannot be trusted.
    UnsupportedHashLength { path: String, len: usize },
    /// Reading the on-disk file failed for a reason other than absence.
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            VerifyErrorKind::UnsupportedHashLength { path, len } => write!(
                f,
                "{}: stored hash is {} bytes, expected 16 (MD5) or 20 (SHA-1)",
                path, len
            ),
            VerifyErrorKind::Io { path, source } => write!(f, "{}: {}", path, source),
        }
    }
}

impl std::error::Error for VerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            VerifyErrorKind::Io { source, .. } => Some(source),
            VerifyErrorKind::UnsupportedHashLength { .. } => None,
        }
    }
}
