//! The Ledger: an owned, append-only chain of blocks.
//!
//! A ledger is created with its genesis block already in place and only ever
//! grows through [`Ledger::append`]. It is a plain value: `append` takes
//! `&mut self`, so a single owner serializes all writes. See
//! [`SharedLedger`](crate::SharedLedger) and [`LedgerWriter`](crate::LedgerWriter)
//! for multi-threaded and async access.

use tracing::{debug, info, warn};
use vitals_ledger_core::{
    audit_chain, validate_genesis, verify_chain, AuditReport, Block, BlockHash, Payload,
    PayloadSchema, ValidationResult,
};

use crate::clock::{Clock, SystemClock};
use crate::config::{LedgerConfig, VerifyMode};
use crate::error::{LedgerError, Result};

/// An append-only, hash-linked sequence of blocks.
///
/// Invariants, for every ledger reachable through `initialize` and `append`:
/// - block `i` has index `i`
/// - block `i` links to the hash of block `i - 1`
/// - every stored hash matches its block's content
/// - block 0 carries the zero sentinel link and the schema's default payload
#[derive(Debug, Clone)]
pub struct Ledger<C: Clock = SystemClock> {
    config: LedgerConfig,
    clock: C,
    blocks: Vec<Block>,
}

impl Ledger<SystemClock> {
    /// Create a ledger for `schema` using wall-clock time.
    pub fn initialize(schema: PayloadSchema) -> Self {
        Self::with_clock(LedgerConfig::for_schema(schema), SystemClock)
    }

    /// Create a ledger from a configuration using wall-clock time.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Ledger<C> {
    /// Create a ledger with an explicit time source.
    pub fn with_clock(config: LedgerConfig, clock: C) -> Self {
        let genesis = Block::genesis(config.schema, clock.now_millis());
        info!(
            schema = %config.schema,
            genesis = %genesis.current_hash().short(),
            "ledger initialized"
        );
        Self {
            config,
            clock,
            blocks: vec![genesis],
        }
    }

    /// Rebuild a ledger from previously exported blocks.
    ///
    /// Hashes are taken as stored, not recomputed, so a corrupted export stays
    /// corrupted and [`verify`](Self::verify) reports it. The first block must
    /// be a well-formed genesis for the configured schema, and every block's
    /// index must equal its position.
    pub fn from_blocks(config: LedgerConfig, clock: C, blocks: Vec<Block>) -> Result<Self> {
        let genesis = blocks
            .first()
            .ok_or_else(|| vitals_ledger_core::CoreError::MalformedBlock("no blocks".into()))?;
        validate_genesis(genesis)?;

        for (position, block) in (0u64..).zip(blocks.iter()) {
            if block.index() != position {
                return Err(LedgerError::IndexOutOfSequence {
                    position,
                    got: block.index(),
                });
            }
        }

        if let Some(block) = blocks
            .iter()
            .find(|b| b.payload().schema() != config.schema)
        {
            return Err(LedgerError::SchemaMismatch {
                expected: config.schema,
                got: block.payload().schema(),
            });
        }

        info!(blocks = blocks.len(), schema = %config.schema, "ledger restored");
        Ok(Self {
            config,
            clock,
            blocks,
        })
    }

    /// Append a payload as a new block and return it.
    ///
    /// Links to the current latest block, takes the next index and the
    /// clock's current time. Prior blocks are never rehashed.
    pub fn append(&mut self, payload: Payload) -> Result<&Block> {
        if payload.schema() != self.config.schema {
            return Err(LedgerError::SchemaMismatch {
                expected: self.config.schema,
                got: payload.schema(),
            });
        }

        let index = u64::try_from(self.blocks.len()).map_err(|_| LedgerError::IndexOverflow)?;
        let previous_hash = *self.latest().current_hash();
        let timestamp = self.clock.now_millis();

        let block = Block::new(index, previous_hash, timestamp, payload);
        debug!(
            index,
            hash = %block.current_hash().short(),
            prev = %previous_hash.short(),
            "block appended"
        );

        self.blocks.push(block);
        Ok(self.latest())
    }

    /// The last block. A ledger is never empty.
    pub fn latest(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// The genesis block.
    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    /// Block at `index`, if present.
    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the genesis block is created with the ledger.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in index order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Index-ordered traversal. Call again to restart.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Hash of the latest block.
    pub fn head_hash(&self) -> BlockHash {
        *self.latest().current_hash()
    }

    /// The ledger's payload schema.
    pub fn schema(&self) -> PayloadSchema {
        self.config.schema
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Copy of the current block sequence.
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    /// Fail-fast chain verification.
    pub fn verify(&self) -> ValidationResult {
        let result = verify_chain(&self.blocks);
        if let Some(failure) = result.failure() {
            warn!(kind = %failure.kind, at_index = failure.at_index, "ledger verification failed");
        }
        result
    }

    /// Exhaustive chain audit.
    pub fn audit(&self) -> AuditReport {
        let report = audit_chain(&self.blocks);
        for failure in &report.failures {
            warn!(kind = %failure.kind, at_index = failure.at_index, "ledger audit failure");
        }
        report
    }

    /// Run the validator selected by the configured [`VerifyMode`].
    pub fn check(&self) -> ValidationResult {
        match self.config.verify_mode {
            VerifyMode::FailFast => self.verify(),
            VerifyMode::Exhaustive => self.audit().to_result(),
        }
    }

    /// Mutable access to a stored block, bypassing every invariant.
    #[cfg(any(test, feature = "tamper"))]
    pub fn block_mut(&mut self, index: u64) -> Option<&mut Block> {
        usize::try_from(index)
            .ok()
            .and_then(move |i| self.blocks.get_mut(i))
    }
}

impl<'a, C: Clock> IntoIterator for &'a Ledger<C> {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
