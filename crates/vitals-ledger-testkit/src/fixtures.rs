//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use vitals_ledger::{Ledger, LedgerConfig, ManualClock, SharedLedger};
use vitals_ledger_core::{Payload, PayloadSchema};

/// Start time used by every fixture: 2025-01-14T16:00:00Z.
pub const FIXTURE_START_MS: i64 = 1736870400000;

/// Clock advance between appends.
pub const FIXTURE_STEP_MS: i64 = 1000;

/// A ledger on a stepping manual clock.
pub struct LedgerFixture {
    pub clock: ManualClock,
    pub ledger: Ledger<ManualClock>,
}

impl LedgerFixture {
    /// A `Readings` ledger starting at [`FIXTURE_START_MS`].
    pub fn new() -> Self {
        Self::with_schema(PayloadSchema::Readings)
    }

    pub fn with_schema(schema: PayloadSchema) -> Self {
        Self::with_config(LedgerConfig::for_schema(schema))
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let clock = ManualClock::stepping(FIXTURE_START_MS, FIXTURE_STEP_MS);
        let ledger = Ledger::with_clock(config, clock.clone());
        Self { clock, ledger }
    }

    /// Append `{heart_rate: 72, glucose: 110}` then `{heart_rate: 75, glucose: 108}`.
    pub fn with_two_readings() -> Self {
        let mut fixture = Self::new();
        for payload in sample_readings() {
            fixture.append(payload);
        }
        fixture
    }

    /// A `Readings` ledger with `n` appended blocks.
    pub fn with_readings(n: usize) -> Self {
        let mut fixture = Self::new();
        for i in 0..n {
            fixture.append(reading(i));
        }
        fixture
    }

    /// Append, panicking on error.
    pub fn append(&mut self, payload: Payload) {
        if let Err(e) = self.ledger.append(payload) {
            panic!("fixture append failed: {e}");
        }
    }

    /// Move the ledger behind a lock.
    pub fn into_shared(self) -> SharedLedger<ManualClock> {
        SharedLedger::new(self.ledger)
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The two readings used in the end-to-end scenario.
pub fn sample_readings() -> Vec<Payload> {
    vec![readings(72.0, 110.0), readings(75.0, 108.0)]
}

/// A deterministic, varied `Readings` payload for position `i`.
pub fn reading(i: usize) -> Payload {
    let i = i as f64;
    readings(60.0 + (i * 7.0) % 40.0, 90.0 + (i * 13.0) % 60.0)
}

fn readings(heart_rate: f64, glucose: f64) -> Payload {
    Payload::readings(heart_rate, glucose)
        .unwrap_or_else(|e| panic!("fixture payload rejected: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_two_readings() {
        let fixture = LedgerFixture::with_two_readings();
        assert_eq!(fixture.ledger.len(), 3);
        assert_eq!(fixture.ledger.latest().timestamp(), FIXTURE_START_MS + 2000);
        assert!(fixture.ledger.verify().is_valid());
    }

    #[test]
    fn test_fixture_clock_is_shared() {
        let mut fixture = LedgerFixture::new();
        fixture.clock.set(5);
        fixture.append(reading(0));
        assert_eq!(fixture.ledger.latest().timestamp(), 5);
    }

    #[test]
    fn test_readings_vary() {
        assert_ne!(reading(0), reading(1));
        assert_eq!(reading(3), reading(3));
    }
}
