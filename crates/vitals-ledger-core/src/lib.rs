//! # Vitals Ledger Core
//!
//! Pure primitives for the Vitals Ledger: payload schemas, blocks, canonical
//! hashing and chain validation.
//!
//! This crate contains no I/O, no clock, no logging. It is pure computation
//! over hash-linked records.
//!
//! ## Key Types
//!
//! - [`Block`] - An immutable record committing to its predecessor
//! - [`BlockHash`] - SHA-256 digest, rendered as 64 lowercase hex characters
//! - [`Payload`] / [`PayloadSchema`] - Named sensor values with a fixed field order
//! - [`ValidationResult`] / [`AuditReport`] - Fail-fast and exhaustive chain checks
//!
//! ## Canonicalization
//!
//! Block hashes are SHA-256 over a fixed text encoding. See [`canonical`].

pub mod block;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod validation;

pub use block::Block;
pub use canonical::{
    canonical_block_bytes, canonical_bytes, canonical_payload, content_hash, format_value,
};
pub use crypto::{BlockHash, HASH_HEX_LEN};
pub use error::{ConstructionError, CoreError, GenesisError};
pub use payload::{Payload, PayloadSchema};
pub use validation::{
    audit_chain, validate_genesis, verify_chain, AuditReport, FailureKind, ValidationFailure,
    ValidationResult,
};
