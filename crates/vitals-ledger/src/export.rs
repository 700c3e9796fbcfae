//! JSON projection of a ledger.
//!
//! One object per block, in index order:
//!
//! ```json
//! {
//!   "index": 1,
//!   "previous_hash": "7b7bbb63...",
//!   "timestamp": 1736870401000,
//!   "payload": { "heart_rate": 72.0, "glucose": 110.0 },
//!   "current_hash": "..."
//! }
//! ```
//!
//! Payload keys keep their schema order. Reading a projection back never
//! rehashes, so the result can be checked with
//! [`verify_chain`](vitals_ledger_core::verify_chain).

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::debug;
use vitals_ledger_core::Block;

use crate::clock::Clock;
use crate::error::Result;
use crate::ledger::Ledger;

/// Project blocks as a JSON array.
pub fn export_json(blocks: &[Block]) -> Result<Value> {
    Ok(serde_json::to_value(blocks)?)
}

/// Pretty-printed JSON array.
pub fn to_json_string_pretty(blocks: &[Block]) -> Result<String> {
    Ok(serde_json::to_string_pretty(blocks)?)
}

/// Parse a JSON array of blocks. Stored hashes are kept as-is.
pub fn from_json_str(s: &str) -> Result<Vec<Block>> {
    Ok(serde_json::from_str(s)?)
}

/// Write the projection to `path`, replacing any existing file.
pub fn write_json(blocks: &[Block], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, blocks)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(blocks = blocks.len(), path = %path.display(), "ledger exported");
    Ok(())
}

/// Read a projection written by [`write_json`].
pub fn read_json(path: impl AsRef<Path>) -> Result<Vec<Block>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

impl<C: Clock> Ledger<C> {
    /// The ledger's JSON projection.
    pub fn to_json(&self) -> Result<Value> {
        export_json(self.blocks())
    }

    /// Write the ledger's JSON projection to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(self.blocks(), path)
    }
}
