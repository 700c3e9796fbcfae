//! Chain validation: replay the hash chain to detect tampering.
//!
//! Two entry points share the same per-block checks:
//! - [`verify_chain`] is fail-fast and reports the first inconsistency.
//! - [`audit_chain`] scans everything and collects every inconsistency.
//!
//! Block 0 is exempt from both checks. It has no predecessor and is trusted
//! as constructed at initialization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::block::Block;
use crate::error::GenesisError;

/// What went wrong at a given block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The stored hash does not match the block's content.
    HashMismatch,
    /// The block's predecessor link does not match the previous block's hash.
    LinkMismatch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HashMismatch => f.write_str("hash mismatch"),
            FailureKind::LinkMismatch => f.write_str("link mismatch"),
        }
    }
}

/// A detected inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub kind: FailureKind,
    pub at_index: u64,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at block {}", self.kind, self.at_index)
    }
}

/// Outcome of a fail-fast verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationResult {
    Valid,
    Invalid { reason: FailureKind, at_index: u64 },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<ValidationFailure> {
        match *self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { reason, at_index } => Some(ValidationFailure {
                kind: reason,
                at_index,
            }),
        }
    }
}

impl From<ValidationFailure> for ValidationResult {
    fn from(f: ValidationFailure) -> Self {
        ValidationResult::Invalid {
            reason: f.kind,
            at_index: f.at_index,
        }
    }
}

/// Outcome of an exhaustive audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Number of blocks examined, genesis included.
    pub checked: usize,
    /// Every inconsistency, in index order; hash before link at the same index.
    pub failures: Vec<ValidationFailure>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failure `verify_chain` would have reported.
    pub fn first(&self) -> Option<ValidationFailure> {
        self.failures.first().copied()
    }

    /// Indices with at least one failure, deduplicated.
    pub fn failing_indices(&self) -> Vec<u64> {
        let mut indices: Vec<u64> = self.failures.iter().map(|f| f.at_index).collect();
        indices.dedup();
        indices
    }

    /// Collapse to the fail-fast shape.
    pub fn to_result(&self) -> ValidationResult {
        self.first()
            .map(ValidationResult::from)
            .unwrap_or(ValidationResult::Valid)
    }
}

/// Recompute the block's hash and compare with the stored one.
fn check_hash(block: &Block, at_index: u64) -> Option<ValidationFailure> {
    if block.recompute_hash() != *block.current_hash() {
        return Some(ValidationFailure {
            kind: FailureKind::HashMismatch,
            at_index,
        });
    }
    None
}

/// Compare the block's predecessor link with `prev`'s stored hash.
fn check_link(block: &Block, prev: &Block, at_index: u64) -> Option<ValidationFailure> {
    if block.previous_hash() != prev.current_hash() {
        return Some(ValidationFailure {
            kind: FailureKind::LinkMismatch,
            at_index,
        });
    }
    None
}

/// Fail-fast verification of a block sequence.
///
/// For each block from index 1 upward: recompute its hash and compare with the
/// stored hash, then compare its predecessor link with the previous block's
/// stored hash. Returns the first failure found.
///
/// `at_index` is the position in `blocks`, not the block's own `index` field,
/// so a block whose index was rewritten is still reported where it sits.
pub fn verify_chain(blocks: &[Block]) -> ValidationResult {
    for (i, pair) in blocks.windows(2).enumerate() {
        let (prev, block) = (&pair[0], &pair[1]);
        let at_index = (i + 1) as u64;

        if let Some(failure) = check_hash(block, at_index) {
            return failure.into();
        }
        if let Some(failure) = check_link(block, prev, at_index) {
            return failure.into();
        }
    }
    ValidationResult::Valid
}

/// Exhaustive audit of a block sequence.
///
/// Runs both checks on every block from index 1 without stopping. A block can
/// contribute both a hash and a link failure.
pub fn audit_chain(blocks: &[Block]) -> AuditReport {
    let mut failures = Vec::new();
    for (i, pair) in blocks.windows(2).enumerate() {
        let (prev, block) = (&pair[0], &pair[1]);
        let at_index = (i + 1) as u64;

        failures.extend(check_hash(block, at_index));
        failures.extend(check_link(block, prev, at_index));
    }
    AuditReport {
        checked: blocks.len(),
        failures,
    }
}

/// Check that the first block is a well-formed genesis.
///
/// Not part of chain verification, which trusts block 0; useful when blocks
/// come back from an export rather than from `initialize`.
pub fn validate_genesis(genesis: &Block) -> Result<(), GenesisError> {
    if genesis.index() != 0 {
        return Err(GenesisError::NonZeroIndex(genesis.index()));
    }
    if !genesis.is_genesis() {
        return Err(GenesisError::BadSentinel);
    }
    if !genesis.payload().is_default() {
        return Err(GenesisError::NonDefaultPayload);
    }
    if !genesis.is_self_consistent() {
        return Err(GenesisError::HashMismatch);
    }
    Ok(())
}
