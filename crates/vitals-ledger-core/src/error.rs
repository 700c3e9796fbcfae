//! Error types for the Vitals Ledger core.

use thiserror::Error;

use crate::payload::PayloadSchema;

/// Invalid arguments to payload or block construction.
///
/// These are contract violations by the caller. They are reported, never
/// retried or repaired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("field {field} has non-finite value {value}")]
    NonFiniteValue { field: &'static str, value: f64 },

    #[error("schema {schema} expects {expected} fields, got {got}")]
    FieldCount {
        schema: PayloadSchema,
        expected: usize,
        got: usize,
    },

    #[error("schema {schema} expects field {expected} at position {position}, got {got}")]
    UnexpectedField {
        schema: PayloadSchema,
        position: usize,
        expected: &'static str,
        got: String,
    },

    #[error("unknown payload schema: {0}")]
    UnknownSchema(String),
}

/// Core errors surfaced by decoding stored blocks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),

    #[error("invalid hash: {0}")]
    InvalidHash(#[from] hex::FromHexError),

    #[error("malformed block: {0}")]
    MalformedBlock(String),
}

/// Reasons a block fails genesis validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("genesis index is {0}, expected 0")]
    NonZeroIndex(u64),

    #[error("genesis previous_hash is not the zero sentinel")]
    BadSentinel,

    #[error("genesis payload is not the schema default")]
    NonDefaultPayload,

    #[error("genesis hash does not match its content")]
    HashMismatch,
}
