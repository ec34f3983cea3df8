//! Property-based tests for the codec invariants.
//!
//! Run with: cargo test --test proptest_codec

use proptest::prelude::*;

use byte_huffman::{
    build_code_table, count_frequencies, decode, encode, rebuild_tree, CodeTable, FrequencyMap,
    HuffmanCodec,
};

/// Payloads drawn from a small alphabet, so codes get skewed.
fn narrow_payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), any::<u8>()], 0..512)
}

/// Payloads over the full byte range.
fn wide_payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

/// Arbitrary frequency maps, including heavy ties.
fn frequency_strategy() -> impl Strategy<Value = FrequencyMap> {
    prop::collection::btree_map(any::<u8>(), 1u64..1000, 0..64)
        .prop_map(|counts| counts.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    /// Property: decode(encode(s)) == s through a table-only rebuild.
    #[test]
    fn prop_roundtrip(data in prop_oneof![narrow_payload_strategy(), wide_payload_strategy()]) {
        let table = build_code_table(&count_frequencies(&data));
        let encoded = encode(&data, &table).unwrap();
        let tree = rebuild_tree(&table).unwrap();
        let decoded = decode(&encoded.packed, &tree, encoded.padding).unwrap();
        prop_assert_eq!(decoded, data);
    }

    /// Property: the table holds exactly the symbols of the input.
    #[test]
    fn prop_table_completeness(data in wide_payload_strategy()) {
        let freqs = count_frequencies(&data);
        let table = build_code_table(&freqs);
        prop_assert_eq!(table.len(), freqs.len());
        for &symbol in &data {
            prop_assert!(table.contains(symbol));
        }
    }

    /// Property: non-degenerate tables are prefix-free and rebuild exactly.
    #[test]
    fn prop_prefix_free_and_rebuildable(freqs in frequency_strategy()) {
        let table = build_code_table(&freqs);
        prop_assert!(table.is_prefix_free());
        let tree = rebuild_tree(&table).unwrap();
        prop_assert_eq!(tree.code_table(), table);
    }

    /// Property: packed bits minus padding equals the summed code lengths.
    #[test]
    fn prop_bit_length_identity(data in narrow_payload_strategy()) {
        let table = build_code_table(&count_frequencies(&data));
        let encoded = encode(&data, &table).unwrap();
        let expected: usize = data.iter().map(|&s| table.get(s).unwrap().len()).sum();
        prop_assert!(encoded.padding < 8);
        prop_assert_eq!(encoded.packed.len() * 8 - encoded.padding as usize, expected);
    }

    /// Property: the encoder never emits set padding bits.
    #[test]
    fn prop_padding_bits_are_zero(data in narrow_payload_strategy()) {
        let codec = HuffmanCodec::train(&data);
        let encoded = codec.encode(&data).unwrap();
        if let Some(&tail) = encoded.packed.last() {
            let mask = ((1u16 << encoded.padding) - 1) as u8;
            prop_assert_eq!(tail & mask, 0);
        }
    }

    /// Property: building is deterministic for a given map.
    #[test]
    fn prop_build_is_deterministic(freqs in frequency_strategy()) {
        let first: CodeTable = build_code_table(&freqs);
        let second: CodeTable = build_code_table(&freqs);
        prop_assert_eq!(first, second);
    }
}
