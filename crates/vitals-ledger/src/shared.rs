//! Thread-safe ledger handle.
//!
//! Appends take the write lock, so each one sees the latest block and none
//! interleave. Readers and validators take the read lock, or work on a
//! [`snapshot`](SharedLedger::snapshot) to avoid holding it while they run.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vitals_ledger_core::{verify_chain, AuditReport, Block, Payload, ValidationResult};

use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;

/// A cloneable, lock-protected ledger.
#[derive(Debug)]
pub struct SharedLedger<C: Clock = SystemClock> {
    inner: Arc<RwLock<Ledger<C>>>,
}

impl<C: Clock> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedLedger<C> {
    pub fn new(ledger: Ledger<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger<C>>> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger<C>>> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Append under the write lock and return a copy of the new block.
    pub fn append(&self, payload: Payload) -> Result<Block> {
        let mut ledger = self.write()?;
        ledger.append(payload).cloned()
    }

    pub fn latest(&self) -> Result<Block> {
        Ok(self.read()?.latest().clone())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Consistent copy of every block at one point in time.
    pub fn snapshot(&self) -> Result<LedgerSnapshot> {
        let blocks = self.read()?.snapshot();
        Ok(LedgerSnapshot { blocks })
    }

    /// Fail-fast verification under the read lock.
    pub fn verify(&self) -> Result<ValidationResult> {
        Ok(self.read()?.verify())
    }

    pub fn audit(&self) -> Result<AuditReport> {
        Ok(self.read()?.audit())
    }

    /// Run `f` with shared access to the ledger.
    pub fn with_read<R>(&self, f: impl FnOnce(&Ledger<C>) -> R) -> Result<R> {
        Ok(f(&*self.read()?))
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut Ledger<C>) -> R) -> Result<R> {
        Ok(f(&mut *self.write()?))
    }
}

/// Blocks copied out of a ledger. Verification needs no lock.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    blocks: Vec<Block>,
}

impl LedgerSnapshot {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn verify(&self) -> ValidationResult {
        verify_chain(&self.blocks)
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}
