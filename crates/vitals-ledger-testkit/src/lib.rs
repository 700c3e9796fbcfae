//! # Vitals Ledger Testkit
//!
//! Testing utilities for the Vitals Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known blocks with their canonical input and expected hash
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Ledgers on a manual clock, with sample readings
//!
//! The integration tests enable the ledger crates' `tamper` feature as a
//! dev-dependency, so they can corrupt stored blocks and check that
//! validation notices. Library builds never see the raw setters.
//!
//! ## Golden Vectors
//!
//! ```rust
//! use vitals_ledger_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hash) in verify_all_vectors() {
//!     assert!(matches, "{name}: {hash}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use vitals_ledger_testkit::generators::{block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn block_hash_is_deterministic(params: BlockParams) {
//!         let b1 = block_from_params(&params);
//!         let b2 = block_from_params(&params);
//!         prop_assert_eq!(b1.current_hash(), b2.current_hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use vitals_ledger_testkit::fixtures::LedgerFixture;
//!
//! let fixture = LedgerFixture::with_two_readings();
//! assert!(fixture.ledger.verify().is_valid());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{reading, sample_readings, LedgerFixture};
pub use generators::{block_from_params, BlockParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
