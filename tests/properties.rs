//! Property tests over arbitrary data, bit fields and symbol weights.

use proptest::prelude::*;

use huffpack::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use huffpack::compression::compress::compress_bytes;
use huffpack::compression::decompress::decompress_bytes;
use huffpack::huffman_coding::symbol_table::{SymbolTable, EOF_SYMBOL, FIRST_INTERNAL, MAX_NODE};
use huffpack::huffman_coding::tree_codec::code_table;

/// A value together with a width (1..=16) wide enough to hold it.
fn field_strategy() -> impl Strategy<Value = (u32, u8)> {
    (1_u8..=16).prop_flat_map(|width| (0..(1_u32 << width), Just(width)))
}

/// Data drawn from a small alphabet, so byte counts are lopsided and trees get deep.
fn narrow_data_strategy() -> impl Strategy<Value = Vec<u8>> {
    (1_u8..=8).prop_flat_map(|bits| {
        prop::collection::vec(any::<u8>().prop_map(move |b| b >> (8 - bits)), 0..4096)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn any_data_round_trips(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let packed = compress_bytes(&data).unwrap();
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), data);
    }

    #[test]
    fn narrow_data_round_trips(data in narrow_data_strategy()) {
        let packed = compress_bytes(&data).unwrap();
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), data);
    }

    #[test]
    fn fields_read_back(fields in prop::collection::vec(field_strategy(), 1..200)) {
        let mut packed = Vec::new();
        let mut bw = BitWriter::new(&mut packed);
        for &(n, width) in &fields {
            bw.put_int(n, width).unwrap();
        }
        let bits: u64 = fields.iter().map(|&(_, width)| width as u64).sum();
        prop_assert_eq!(bw.bits_written(), bits);
        bw.close().unwrap();
        prop_assert_eq!(packed.len() as u64, (bits + 7) / 8);

        let mut br = BitReader::new(packed.as_slice());
        for &(n, width) in &fields {
            prop_assert_eq!(br.get_int(width).unwrap(), Some(n));
        }
    }

    #[test]
    fn any_weights_build_a_valid_tree(
        weights in prop::collection::vec(prop_oneof![Just(0_u64), 1_u64..1_000_000], 256),
        eof_weight in 1_u64..4,
    ) {
        let mut table = SymbolTable::new();
        for (symbol, &weight) in weights.iter().enumerate() {
            table.add(symbol as u16, weight);
        }
        table.add(EOF_SYMBOL, eof_weight);
        let tree = table.build();

        let used = weights.iter().filter(|&&w| w != 0).count() + 1;
        prop_assert_eq!(tree.leaves(), used);
        prop_assert!(tree.root() >= EOF_SYMBOL && tree.root() <= MAX_NODE);

        for x in FIRST_INTERNAL..=tree.root() {
            let node = tree.node(x);
            prop_assert!(!node.is_leaf());
            let (left, right) = (node.left.unwrap(), node.right.unwrap());
            prop_assert!(left < x && right < x);
            prop_assert_eq!(tree.node(left).parent, Some(x));
            prop_assert_eq!(tree.node(right).parent, Some(x));
            prop_assert_eq!(node.weight, tree.node(left).weight + tree.node(right).weight);
        }
        let total: u64 = weights.iter().sum::<u64>() + eof_weight;
        prop_assert_eq!(tree.node(tree.root()).weight, total);

        // Every counted symbol gets a code, and no code starts another
        let codes = code_table(&tree);
        let present: Vec<&Vec<u8>> = (0..=EOF_SYMBOL)
            .filter(|&s| s == EOF_SYMBOL || weights[s as usize] != 0)
            .map(|s| &codes[s as usize])
            .collect();
        if used > 1 {
            prop_assert!(present.iter().all(|code| !code.is_empty()));
        }
        for (i, a) in present.iter().enumerate() {
            for (j, b) in present.iter().enumerate() {
                prop_assert!(i == j || !b.starts_with(a.as_slice()));
            }
        }
    }
}
