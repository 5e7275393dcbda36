//! The seam between container parsing and checksum extraction.

use anyhow::{anyhow, Result};

/// Ordered access to a debug-symbol container's named streams.
///
/// `name_table` order must be deterministic for a given container so index
/// construction is reproducible; the order itself carries no meaning.
pub trait SymbolContainer {
    /// All `(record name, stream index)` pairs, in container order.
    fn name_table(&self) -> &[(String, u32)];

    /// Full raw bytes of the stream at `index`.
    fn read_stream(&self, index: u32) -> Result<Vec<u8>>;
}

/// In-memory container for tests and non-PDB adapters.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    names: Vec<(String, u32)>,
    streams: Vec<Vec<u8>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named stream; returns its index.
    pub fn add_stream(&mut self, name: &str, bytes: Vec<u8>) -> u32 {
        let index = self.streams.len() as u32;
        self.streams.push(bytes);
        self.names.push((name.to_string(), index));
        index
    }
}

impl SymbolContainer for MemoryContainer {
    fn name_table(&self) -> &[(String, u32)] {
        &self.names
    }

    fn read_stream(&self, index: u32) -> Result<Vec<u8>> {
        self.streams
            .get(index as usize)
            .cloned()
            .ok_or_else(|| anyhow!("no stream at index {index}"))
    }
}
