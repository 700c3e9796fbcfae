//! Block: the immutable unit of the ledger.
//!
//! A block's `current_hash` is computed once, in [`Block::new`], over its
//! index, predecessor link, timestamp and payload. There are no mutators.
//! With the `tamper` feature, raw setters exist that change a field *without*
//! rehashing, so tests can simulate on-disk corruption or a malicious edit.

use serde::{Deserialize, Serialize};

use crate::canonical::content_hash;
use crate::crypto::BlockHash;
use crate::payload::{Payload, PayloadSchema};

/// An immutable, hash-committed ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    previous_hash: BlockHash,
    timestamp: i64,
    payload: Payload,
    current_hash: BlockHash,
}

impl Block {
    /// Construct a block and fix its hash.
    pub fn new(index: u64, previous_hash: BlockHash, timestamp: i64, payload: Payload) -> Self {
        let current_hash = content_hash(index, &previous_hash, timestamp, &payload);
        Self {
            index,
            previous_hash,
            timestamp,
            payload,
            current_hash,
        }
    }

    /// Construct the genesis block for a schema.
    pub fn genesis(schema: PayloadSchema, timestamp: i64) -> Self {
        Self::new(0, BlockHash::ZERO, timestamp, schema.default_payload())
    }

    /// Reassemble a block from stored fields, keeping the stored hash as-is.
    ///
    /// Nothing is recomputed: a corrupted record stays corrupted and is left
    /// for the validator to report.
    pub fn from_parts(
        index: u64,
        previous_hash: BlockHash,
        timestamp: i64,
        payload: Payload,
        current_hash: BlockHash,
    ) -> Self {
        Self {
            index,
            previous_hash,
            timestamp,
            payload,
            current_hash,
        }
    }

    /// Position in the ledger (0 for genesis).
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Hash of the predecessor (zero sentinel for genesis).
    pub fn previous_hash(&self) -> &BlockHash {
        &self.previous_hash
    }

    /// Creation time, Unix milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The sensor payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The hash fixed at construction.
    pub fn current_hash(&self) -> &BlockHash {
        &self.current_hash
    }

    /// Recompute the hash from the current field values.
    pub fn recompute_hash(&self) -> BlockHash {
        content_hash(self.index, &self.previous_hash, self.timestamp, &self.payload)
    }

    /// True if the stored hash matches the content.
    pub fn is_self_consistent(&self) -> bool {
        self.recompute_hash() == self.current_hash
    }

    /// True for the genesis position with the sentinel link.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == BlockHash::ZERO
    }
}

/// Raw field setters that skip hashing.
#[cfg(any(test, feature = "tamper"))]
impl Block {
    /// Overwrite one payload field. Returns false if the field is unknown.
    pub fn tamper_payload(&mut self, field: &str, value: f64) -> bool {
        self.payload.set_unchecked(field, value)
    }

    /// Replace the whole payload.
    pub fn tamper_replace_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    /// Overwrite the timestamp.
    pub fn tamper_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    /// Overwrite the index.
    pub fn tamper_index(&mut self, index: u64) {
        self.index = index;
    }

    /// Overwrite the predecessor link.
    pub fn tamper_previous_hash(&mut self, previous_hash: BlockHash) {
        self.previous_hash = previous_hash;
    }

    /// Overwrite the stored hash.
    pub fn tamper_current_hash(&mut self, current_hash: BlockHash) {
        self.current_hash = current_hash;
    }

    /// Recompute and store the hash, as a forger covering an edit would.
    pub fn tamper_rehash(&mut self) {
        self.current_hash = self.recompute_hash();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Block {
        Block::new(
            1,
            BlockHash::from_bytes([0x11; 32]),
            1736870401000,
            Payload::readings(72.0, 110.0).unwrap(),
        )
    }

    #[test]
    fn test_new_fixes_hash() {
        let block = sample();
        assert!(block.is_self_consistent());
        assert_eq!(*block.current_hash(), block.recompute_hash());
    }

    #[test]
    fn test_identical_content_identical_hash() {
        assert_eq!(sample().current_hash(), sample().current_hash());
    }

    #[test]
    fn test_genesis_shape() {
        let g = Block::genesis(PayloadSchema::Statistics, 42);
        assert_eq!(g.index(), 0);
        assert_eq!(*g.previous_hash(), BlockHash::ZERO);
        assert!(g.payload().is_default());
        assert_eq!(g.payload().schema(), PayloadSchema::Statistics);
        assert!(g.is_genesis());
        assert!(!sample().is_genesis());
    }

    #[test]
    fn test_tamper_payload_breaks_consistency() {
        let mut block = sample();
        assert!(block.tamper_payload("glucose", 250.0));
        assert!(!block.is_self_consistent());
        assert!(!block.tamper_payload("pressure", 1.0));
    }

    #[test]
    fn test_tamper_then_rehash_restores_consistency() {
        let mut block = sample();
        block.tamper_timestamp(1);
        assert!(!block.is_self_consistent());
        block.tamper_rehash();
        assert!(block.is_self_consistent());
    }

    #[test]
    fn test_from_parts_keeps_stored_hash() {
        let block = sample();
        let forged = Block::from_parts(
            block.index(),
            *block.previous_hash(),
            block.timestamp() + 1,
            block.payload().clone(),
            *block.current_hash(),
        );
        assert_eq!(forged.current_hash(), block.current_hash());
        assert!(!forged.is_self_consistent());
    }

    #[test]
    fn test_serde_shape() {
        let block = sample();
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["index"], 1);
        assert_eq!(value["timestamp"], 1736870401000i64);
        assert_eq!(value["payload"]["heart_rate"], 72.0);
        assert_eq!(value["previous_hash"], "11".repeat(32));
        assert_eq!(value["current_hash"], block.current_hash().to_hex());

        let back: Block = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }
}
