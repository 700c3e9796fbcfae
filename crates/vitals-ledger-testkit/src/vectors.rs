//! Golden test vectors for deterministic verification.
//!
//! Each vector pins both the canonical hash input and the resulting SHA-256
//! digest, so any other implementation of the encoding can be checked
//! against them byte for byte.

use serde::Serialize;
use vitals_ledger_core::{canonical_bytes, content_hash, BlockHash, Payload, PayloadSchema};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub index: u64,
    /// Predecessor hash (hex).
    pub previous_hash: &'static str,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub schema: PayloadSchema,
    /// Values in schema field order.
    pub values: &'static [f64],
    /// Expected canonical hash input.
    pub expected_canonical: &'static str,
    /// Expected block hash (hex).
    pub expected_hash: &'static str,
}

const ZERO: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const GENESIS_HASH: &str = "7b7bbb6390cbe09945ac8287e5bc68b6abf21b4ce486a5cc8c3942651227ade7";
const B1_HASH: &str = "6e8127ae42e36a39cffce6e729861575684208eb149562d4a7bdb429001ee291";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "Readings genesis",
            index: 0,
            previous_hash: ZERO,
            timestamp: 1736870400000, // 2025-01-14T16:00:00Z
            schema: PayloadSchema::Readings,
            values: &[0.0, 0.0],
            expected_canonical: concat!(
                "0",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "1736870400000",
                r#"{"heart_rate":0.000000,"glucose":0.000000}"#
            ),
            expected_hash: GENESIS_HASH,
        },
        GoldenVector {
            name: "Readings block 1",
            index: 1,
            previous_hash: GENESIS_HASH,
            timestamp: 1736870401000,
            schema: PayloadSchema::Readings,
            values: &[72.0, 110.0],
            expected_canonical: concat!(
                "1",
                "7b7bbb6390cbe09945ac8287e5bc68b6abf21b4ce486a5cc8c3942651227ade7",
                "1736870401000",
                r#"{"heart_rate":72.000000,"glucose":110.000000}"#
            ),
            expected_hash: B1_HASH,
        },
        GoldenVector {
            name: "Readings block 2",
            index: 2,
            previous_hash: B1_HASH,
            timestamp: 1736870402000,
            schema: PayloadSchema::Readings,
            values: &[75.0, 108.0],
            expected_canonical: concat!(
                "2",
                "6e8127ae42e36a39cffce6e729861575684208eb149562d4a7bdb429001ee291",
                "1736870402000",
                r#"{"heart_rate":75.000000,"glucose":108.000000}"#
            ),
            expected_hash: "5b5a537b2057b9aa5f962be6184adff17b4f939f66382e96696f83737d55543e",
        },
        GoldenVector {
            name: "Statistics genesis at epoch",
            index: 0,
            previous_hash: ZERO,
            timestamp: 0,
            schema: PayloadSchema::Statistics,
            values: &[0.0, 0.0, 0.0, 0.0],
            expected_canonical: concat!(
                "0",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0",
                r#"{"heart_rate_mean":0.000000,"heart_rate_std":0.000000,"#,
                r#""glucose_mean":0.000000,"glucose_std":0.000000}"#
            ),
            expected_hash: "a562de65e0898e38cf940fb7c1d1d1431fbf03c681a2716aca46f62dccee9410",
        },
        GoldenVector {
            name: "Detailed with rounding and negative timestamp",
            index: 7,
            previous_hash: "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            timestamp: -1,
            schema: PayloadSchema::Detailed,
            values: &[72.5, 73.333333333, 1.25, 98.6, 101.1, 0.0000004],
            expected_canonical: concat!(
                "7",
                "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "-1",
                r#"{"heart_rate":72.500000,"heart_rate_mean":73.333333,"heart_rate_std":1.250000,"#,
                r#""glucose":98.600000,"glucose_mean":101.100000,"glucose_std":0.000000}"#
            ),
            expected_hash: "49fcd9b28b9cf4c143b227cb4f5b3fc8be2c37e5f25553b8a5c824cc0bbc39b0",
        },
        GoldenVector {
            name: "Readings with exact rounding ties",
            index: 3,
            previous_hash: "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            timestamp: 1736870403000,
            schema: PayloadSchema::Readings,
            // 2^-7 and 3 * 2^-7: both end in 5 at the seventh digit.
            values: &[0.0078125, 0.0234375],
            expected_canonical: concat!(
                "3",
                "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "1736870403000",
                r#"{"heart_rate":0.007812,"glucose":0.023438}"#
            ),
            expected_hash: "6f060c5f68ce614195286a3c3d4e1a8c2e5155e6c606a69f661d05c345e58ec4",
        },
    ]
}

/// The payload a vector describes.
pub fn payload_from_vector(vector: &GoldenVector) -> Payload {
    Payload::new(vector.schema, vector.values.to_vec())
        .unwrap_or_else(|e| panic!("vector '{}' has an invalid payload: {e}", vector.name))
}

/// The predecessor hash a vector describes.
pub fn previous_hash_from_vector(vector: &GoldenVector) -> BlockHash {
    BlockHash::from_hex(vector.previous_hash)
        .unwrap_or_else(|e| panic!("vector '{}' has an invalid hash: {e}", vector.name))
}

/// Canonical hash input for a vector.
pub fn canonical_from_vector(vector: &GoldenVector) -> Vec<u8> {
    canonical_bytes(
        vector.index,
        &previous_hash_from_vector(vector),
        vector.timestamp,
        &payload_from_vector(vector),
    )
}

/// Check every vector, returning `(name, matches, computed hash)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hash = content_hash(
                v.index,
                &previous_hash_from_vector(v),
                v.timestamp,
                &payload_from_vector(v),
            )
            .to_hex();
            let matches = canonical_from_vector(v) == v.expected_canonical.as_bytes()
                && hash == v.expected_hash;
            (v.name.to_string(), matches, hash)
        })
        .collect()
}

/// All vectors as a JSON document, for sharing with other implementations.
pub fn vectors_json() -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(all_vectors())
}
