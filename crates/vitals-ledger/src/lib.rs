//! # Vitals Ledger
//!
//! An append-only, tamper-evident ledger of derived heart-rate and glucose
//! readings.
//!
//! ## Overview
//!
//! Each block commits to its predecessor by storing the predecessor's hash.
//! Editing any recorded block after the fact breaks either that block's own
//! hash or the link from its successor, and [`Ledger::verify`] reports the
//! first place where that happens.
//!
//! - **Ledger**: a single-owner value; `append` takes `&mut self`
//! - **SharedLedger**: `Arc<RwLock<Ledger>>` for use across threads
//! - **LedgerWriter**: a tokio task that owns the ledger and serves commands
//! - **Export**: a JSON projection that can be read back and verified offline
//! - **Provider**: helpers that turn raw sensor series into payloads
//!
//! ## Usage
//!
//! ```rust
//! use vitals_ledger::{Ledger, Payload, PayloadSchema};
//!
//! let mut ledger = Ledger::initialize(PayloadSchema::Readings);
//! ledger.append(Payload::readings(72.0, 110.0)?)?;
//! ledger.append(Payload::readings(75.0, 108.0)?)?;
//!
//! assert_eq!(ledger.len(), 3);
//! assert!(ledger.verify().is_valid());
//! # Ok::<(), vitals_ledger::LedgerError>(())
//! ```
//!
//! ## Re-exports
//!
//! - `vitals_ledger::core` - Pure primitives (Block, BlockHash, validation)

pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod provider;
pub mod shared;
pub mod writer;

pub use vitals_ledger_core as core;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LedgerConfig, VerifyMode};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use shared::{LedgerSnapshot, SharedLedger};
pub use writer::{LedgerHandle, LedgerWriter};

// Re-export commonly used core types
pub use vitals_ledger_core::{
    AuditReport, Block, BlockHash, FailureKind, Payload, PayloadSchema, ValidationFailure,
    ValidationResult,
};
