//! Ledger configuration.

use serde::{Deserialize, Serialize};
use vitals_ledger_core::PayloadSchema;

use crate::error::Result;

/// Which validator [`Ledger::check`](crate::Ledger::check) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyMode {
    /// Stop at the first inconsistency.
    #[default]
    FailFast,
    /// Scan the whole chain and log every inconsistency.
    Exhaustive,
}

/// Configuration for a Ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Payload schema every block must use.
    pub schema: PayloadSchema,
    /// Validator used by `check`.
    pub verify_mode: VerifyMode,
    /// Command queue depth of the writer task.
    pub writer_queue_depth: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            schema: PayloadSchema::Readings,
            verify_mode: VerifyMode::FailFast,
            writer_queue_depth: 64,
        }
    }
}

impl LedgerConfig {
    /// Default configuration for a given schema.
    pub fn for_schema(schema: PayloadSchema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing keys take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
