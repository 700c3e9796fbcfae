//! Error types for the Ledger.

use thiserror::Error;
use vitals_ledger_core::{ConstructionError, CoreError, GenesisError, PayloadSchema};

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Invalid payload or block arguments.
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),

    /// Payload schema differs from the ledger's.
    #[error("schema mismatch: ledger is {expected}, payload is {got}")]
    SchemaMismatch {
        expected: PayloadSchema,
        got: PayloadSchema,
    },

    /// The next index would not fit in a u64.
    #[error("ledger index overflow")]
    IndexOverflow,

    /// A thread panicked while holding the ledger lock.
    #[error("ledger lock poisoned")]
    LockPoisoned,

    /// The writer task has stopped.
    #[error("ledger writer closed")]
    WriterClosed,

    /// An imported ledger does not start with a valid genesis block.
    #[error("invalid genesis: {0}")]
    Genesis(#[from] GenesisError),

    /// An imported block's index differs from its position in the chain.
    #[error("block at position {position} has index {got}")]
    IndexOutOfSequence { position: u64, got: u64 },

    /// Malformed imported block data.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// JSON projection error.
    #[error("export error: {0}")]
    Export(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
