//! Canonical text encoding for deterministic hashing.
//!
//! The hash input of a block is the concatenation of:
//! - `index` as plain decimal
//! - `previous_hash` as 64 lowercase hex characters
//! - `timestamp` (Unix milliseconds) as plain decimal, with a leading `-` if negative
//! - the payload text: `{"<field>":<value>,...}` in schema order, no whitespace
//!
//! Every payload value is rendered with exactly [`VALUE_DECIMALS`] fractional
//! digits and no exponent, correctly rounded from the binary value. Any
//! implementation following these rules produces byte-identical input, and
//! thus an identical SHA-256 digest, for the same logical block.
//!
//! **This encoding is frozen.** Changing it invalidates every stored hash.

use std::fmt::Write;

use crate::block::Block;
use crate::crypto::BlockHash;
use crate::payload::Payload;

/// Fractional digits used for every payload value.
pub const VALUE_DECIMALS: usize = 6;

/// Render a single payload value.
pub fn format_value(value: f64) -> String {
    // Payload construction already folded -0.0 into 0.0; repeat it so this
    // function is safe to call on arbitrary input too.
    format!("{:.*}", VALUE_DECIMALS, value + 0.0)
}

/// Encode a payload to its canonical text.
pub fn canonical_payload(payload: &Payload) -> String {
    let mut out = String::with_capacity(16 * payload.values().len() + 2);
    out.push('{');
    for (i, (field, value)) in payload.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "\"{}\":{}", field, format_value(value));
    }
    out.push('}');
    out
}

/// Encode a block's logical content to the canonical hash input.
pub fn canonical_bytes(
    index: u64,
    previous_hash: &BlockHash,
    timestamp: i64,
    payload: &Payload,
) -> Vec<u8> {
    let mut out = String::with_capacity(128);
    let _ = write!(out, "{}", index);
    out.push_str(&previous_hash.to_hex());
    let _ = write!(out, "{}", timestamp);
    out.push_str(&canonical_payload(payload));
    out.into_bytes()
}

/// Hash a block's logical content.
pub fn content_hash(
    index: u64,
    previous_hash: &BlockHash,
    timestamp: i64,
    payload: &Payload,
) -> BlockHash {
    BlockHash::hash(&canonical_bytes(index, previous_hash, timestamp, payload))
}

/// Canonical hash input for a stored block, read from its current fields.
pub fn canonical_block_bytes(block: &Block) -> Vec<u8> {
    canonical_bytes(
        block.index(),
        block.previous_hash(),
        block.timestamp(),
        block.payload(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PayloadSchema;
    use proptest::prelude::*;

    #[test]
    fn test_format_value_fixed_digits() {
        assert_eq!(format_value(72.0), "72.000000");
        assert_eq!(format_value(-1.5), "-1.500000");
        assert_eq!(format_value(0.1), "0.100000");
        assert_eq!(format_value(1e-7), "0.000000");
        assert_eq!(format_value(123456789.0), "123456789.000000");
        assert_eq!(format_value(2.0 / 3.0), "0.666667");
    }

    #[test]
    fn test_format_value_ties_round_to_even() {
        // Exact binary ties at the seventh fractional digit.
        assert_eq!(format_value(0.0078125), "0.007812");
        assert_eq!(format_value(0.0234375), "0.023438");
        assert_eq!(format_value(-0.0078125), "-0.007812");
    }

    #[test]
    fn test_format_value_no_negative_zero() {
        assert_eq!(format_value(-0.0), "0.000000");
    }

    #[test]
    fn test_format_value_no_exponent() {
        assert_eq!(format_value(1e21), "1000000000000000000000.000000");
    }

    #[test]
    fn test_canonical_payload_layout() {
        let p = Payload::readings(72.0, 110.0).unwrap();
        assert_eq!(
            canonical_payload(&p),
            r#"{"heart_rate":72.000000,"glucose":110.000000}"#
        );
    }

    #[test]
    fn test_canonical_payload_follows_schema_order() {
        let p = Payload::statistics(71.5, 2.25, 104.0, 3.5).unwrap();
        assert_eq!(
            canonical_payload(&p),
            r#"{"heart_rate_mean":71.500000,"heart_rate_std":2.250000,"glucose_mean":104.000000,"glucose_std":3.500000}"#
        );
    }

    #[test]
    fn test_canonical_bytes_layout() {
        let p = PayloadSchema::Readings.default_payload();
        let bytes = canonical_bytes(0, &BlockHash::ZERO, 1736870400000, &p);
        let expected = format!(
            "0{}1736870400000{}",
            "0".repeat(64),
            r#"{"heart_rate":0.000000,"glucose":0.000000}"#
        );
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_negative_timestamp_rendered_with_sign() {
        let p = PayloadSchema::Readings.default_payload();
        let bytes = canonical_bytes(3, &BlockHash::ZERO, -5, &p);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(&format!("3{}-5{{", "0".repeat(64))));
    }

    #[test]
    fn test_content_hash_deterministic() {
        let p = Payload::readings(72.0, 110.0).unwrap();
        let prev = BlockHash::from_bytes([0x11; 32]);
        let h1 = content_hash(1, &prev, 1736870401000, &p);
        let h2 = content_hash(1, &prev, 1736870401000, &p.clone());
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_content_hash_sensitive_to_each_field() {
        let p = Payload::readings(72.0, 110.0).unwrap();
        let prev = BlockHash::from_bytes([0x11; 32]);
        let base = content_hash(1, &prev, 1000, &p);

        assert_ne!(base, content_hash(2, &prev, 1000, &p));
        assert_ne!(base, content_hash(1, &BlockHash::ZERO, 1000, &p));
        assert_ne!(base, content_hash(1, &prev, 1001, &p));
        assert_ne!(
            base,
            content_hash(1, &prev, 1000, &Payload::readings(72.0, 110.5).unwrap())
        );
    }

    #[test]
    fn test_content_hash_known_vector() {
        // Genesis of a Readings ledger at 2025-01-14T16:00:00Z.
        let p = PayloadSchema::Readings.default_payload();
        let h = content_hash(0, &BlockHash::ZERO, 1736870400000, &p);
        assert_eq!(h.to_hex(), GENESIS_READINGS_HASH);
    }

    proptest! {
        #[test]
        fn test_format_value_shape(v in -1.0e9f64..1.0e9) {
            let text = format_value(v);
            let (_, frac) = text.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), VALUE_DECIMALS);
            prop_assert!(!text.contains('e'));
        }

        #[test]
        fn test_canonical_payload_has_no_whitespace(hr in 0.0f64..300.0, g in 0.0f64..600.0) {
            let p = Payload::readings(hr, g).unwrap();
            prop_assert!(!canonical_payload(&p).contains(char::is_whitespace));
        }
    }

    const GENESIS_READINGS_HASH: &str = "7b7bbb6390cbe09945ac8287e5bc68b6abf21b4ce486a5cc8c3942651227ade7";
}
