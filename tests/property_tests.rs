use huffpack::{
    compress, container, decompress, decompress_with_table, CodewordTable, Error, FrequencyTable,
    HuffmanTree, PackedStream,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_roundtrip(input in prop::collection::vec(any::<u8>(), 1..2000)) {
        let encoded = compress(&input).unwrap();
        let output = decompress(&encoded.stream, &encoded.tree).unwrap();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_roundtrip_small_alphabet(input in prop::collection::vec(0u8..4, 1..500)) {
        let encoded = compress(&input).unwrap();
        let table = CodewordTable::from_tree(&encoded.tree);
        prop_assert_eq!(&decompress(&encoded.stream, &encoded.tree).unwrap(), &input);
        prop_assert_eq!(&decompress_with_table(&encoded.stream, &table).unwrap(), &input);
    }

    #[test]
    fn test_container_roundtrip(input in prop::collection::vec(any::<u8>(), 0..2000)) {
        let stored = container::encode(&input).unwrap();
        prop_assert_eq!(container::decode(&stored).unwrap(), input);
    }

    #[test]
    fn test_prefix_free(input in prop::collection::vec(any::<u8>(), 1..1000)) {
        let tree = HuffmanTree::from_bytes(&input).unwrap();
        let table = CodewordTable::from_tree(&tree);
        prop_assert!(table.is_prefix_free());
        prop_assert_eq!(table.len(), FrequencyTable::from_bytes(&input).len());
    }

    #[test]
    fn test_padding_bound(input in prop::collection::vec(any::<u8>(), 1..1000)) {
        let encoded = compress(&input).unwrap();
        let padding = encoded.stream.padding().unwrap();
        prop_assert!(padding <= 7);

        let freqs = FrequencyTable::from_bytes(&input);
        let bits = CodewordTable::from_tree(&encoded.tree).encoded_bits(&freqs);
        prop_assert_eq!((bits + padding as u64) % 8, 0);
        prop_assert_eq!(encoded.stream.bit_len(), Some(bits as usize));
    }

    #[test]
    fn test_deterministic(input in prop::collection::vec(any::<u8>(), 1..1000)) {
        let freqs = FrequencyTable::from_bytes(&input);
        let a = CodewordTable::from_tree(&HuffmanTree::from_frequencies(&freqs).unwrap());
        let b = CodewordTable::from_tree(&HuffmanTree::from_frequencies(&freqs).unwrap());
        prop_assert_eq!(a.lengths(), b.lengths());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_truncation_never_returns_garbage_silently(
        input in prop::collection::vec(any::<u8>(), 2..500),
        cut in 1usize..8,
    ) {
        let stored = container::encode(&input).unwrap();
        let cut = cut.min(stored.len() - 1);
        let truncated = &stored[..stored.len() - cut];
        prop_assert!(container::decode(truncated).is_err());
    }
}

#[test]
fn test_scenario() {
    let data = b"aaaabbbcc";
    let freqs = FrequencyTable::from_bytes(data);
    assert_eq!(
        freqs.iter().collect::<Vec<_>>(),
        vec![(b'a', 4), (b'b', 3), (b'c', 2)]
    );

    let encoded = compress(data).unwrap();
    let lengths = CodewordTable::from_tree(&encoded.tree).lengths();
    assert_eq!(lengths[&b'a'], 1);
    assert_eq!(lengths[&b'b'], 2);
    assert_eq!(lengths[&b'c'], 2);
    assert_eq!(decompress(&encoded.stream, &encoded.tree).unwrap(), data);
}

#[test]
fn test_single_symbol() {
    let encoded = compress(b"aaaa").unwrap();
    assert_eq!(decompress(&encoded.stream, &encoded.tree).unwrap(), b"aaaa");
    let stored = container::encode(b"aaaa").unwrap();
    assert_eq!(container::decode(&stored).unwrap(), b"aaaa");
}

#[test]
fn test_empty_input() {
    assert!(matches!(compress(b""), Err(Error::EmptyInput)));
    assert!(container::decode(&container::encode(b"").unwrap())
        .unwrap()
        .is_empty());
}

#[test]
fn test_corruption_detected() {
    let encoded = compress(b"aaaabbbcc").unwrap();
    let tree = &encoded.tree;

    // Drop the last data bit: "...101" ends inside the codeword of c.
    let mut bytes = encoded.stream.clone().into_bytes();
    bytes[0] = 3;
    let err = decompress(&PackedStream::from_bytes(bytes), tree).unwrap_err();
    assert!(matches!(err, Error::CorruptStream { .. }));

    let err = decompress(&PackedStream::from_bytes(vec![200, 0]), tree).unwrap_err();
    assert!(matches!(err, Error::InvalidPadding(200)));

    let err = decompress(&PackedStream::from_bytes(vec![]), tree).unwrap_err();
    assert!(matches!(err, Error::TruncatedStream { .. }));
}
