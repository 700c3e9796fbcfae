//! Proptest generators for property-based testing.

use proptest::prelude::*;

use vitals_ledger_core::{Block, BlockHash, Payload, PayloadSchema};

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a payload schema.
pub fn schema() -> impl Strategy<Value = PayloadSchema> {
    prop_oneof![
        Just(PayloadSchema::Readings),
        Just(PayloadSchema::Statistics),
        Just(PayloadSchema::Detailed),
    ]
}

/// Generate a plausible sensor value.
pub fn sensor_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        // Whole readings as a sensor reports them
        (0u32..400).prop_map(f64::from),
        // Derived statistics
        0.0f64..1000.0,
    ]
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800_000i64
}

/// Generate a payload of the given schema.
pub fn payload(schema: PayloadSchema) -> impl Strategy<Value = Payload> {
    prop::collection::vec(sensor_value(), schema.width()).prop_map(move |values| {
        Payload::new(schema, values).unwrap_or_else(|e| panic!("generated bad payload: {e}"))
    })
}

/// Generate a `Readings` payload.
pub fn readings() -> impl Strategy<Value = Payload> {
    payload(PayloadSchema::Readings)
}

/// Generate a payload of any schema.
pub fn any_payload() -> impl Strategy<Value = Payload> {
    schema().prop_flat_map(payload)
}

/// Generate up to `max_len` `Readings` payloads.
pub fn readings_sequence(max_len: usize) -> impl Strategy<Value = Vec<Payload>> {
    prop::collection::vec(readings(), 0..=max_len)
}

/// Parameters for generating a block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub index: u64,
    pub previous_hash: BlockHash,
    pub timestamp: i64,
    pub payload: Payload,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0u64..=1_000_000u64, block_hash(), timestamp(), any_payload())
            .prop_map(|(index, previous_hash, timestamp, payload)| BlockParams {
                index,
                previous_hash,
                timestamp,
                payload,
            })
            .boxed()
    }
}

/// Build a block from parameters.
pub fn block_from_params(params: &BlockParams) -> Block {
    Block::new(
        params.index,
        params.previous_hash,
        params.timestamp,
        params.payload.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_ledger_core::canonical_block_bytes;

    proptest! {
        #[test]
        fn test_block_hash_deterministic(params: BlockParams) {
            let b1 = block_from_params(&params);
            let b2 = block_from_params(&params);

            prop_assert_eq!(b1.current_hash(), b2.current_hash());
            prop_assert_eq!(canonical_block_bytes(&b1), canonical_block_bytes(&b2));
        }

        #[test]
        fn test_block_self_consistent(params: BlockParams) {
            prop_assert!(block_from_params(&params).is_self_consistent());
        }

        #[test]
        fn test_hash_differs_with_different_payload(
            prev in block_hash(),
            p1 in readings(),
            p2 in readings(),
        ) {
            prop_assume!(p1 != p2);

            let b1 = Block::new(1, prev, 1000, p1);
            let b2 = Block::new(1, prev, 1000, p2);

            prop_assert_ne!(b1.current_hash(), b2.current_hash());
        }

        #[test]
        fn test_hash_differs_with_different_prev(
            h1 in block_hash(),
            h2 in block_hash(),
            p in readings(),
        ) {
            prop_assume!(h1 != h2);
            let b1 = Block::new(1, h1, 1000, p.clone());
            let b2 = Block::new(1, h2, 1000, p);
            prop_assert_ne!(
                b1.current_hash(),
                b2.current_hash()
            );
        }
    }
}
