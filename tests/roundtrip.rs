//! End-to-end round-trip tests.
//!
//! Validates that compression is lossless across representative inputs
//! and that the code table and bit stream formats hold their invariants.

use huffpack::{
    compress, decode, decompress, encode, read_code_table, write_code_table, Error,
    FrequencyTable, HuffmanTree, PSEUDO_EOF,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn round_trip(data: &[u8]) -> Vec<u8> {
    let (table, compressed) = compress(data).unwrap();
    decompress(&table, &compressed).unwrap()
}

#[test]
fn test_round_trip_ascii_text() {
    let data = b"the quick brown fox jumps over the lazy dog";
    assert_eq!(round_trip(data), data);
}

#[test]
fn test_round_trip_two_symbols() {
    let data = b"aaaabbbb";
    let (table, compressed) = compress(data).unwrap();
    let tree = read_code_table(table.as_slice()).unwrap();
    assert_eq!(tree.leaf_count(), 3);
    assert_eq!(decompress(&table, &compressed).unwrap(), data);
}

#[test]
fn test_round_trip_empty_file() {
    let (table, compressed) = compress(b"").unwrap();
    let tree = read_code_table(table.as_slice()).unwrap();
    assert_eq!(tree.leaf_count(), 1);
    assert!(decompress(&table, &compressed).unwrap().is_empty());
}

#[test]
fn test_round_trip_single_repeated_byte() {
    let data = vec![65u8; 1000];
    let (table, compressed) = compress(&data).unwrap();
    let tree = read_code_table(table.as_slice()).unwrap();
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(decompress(&table, &compressed).unwrap(), data);
}

#[test]
fn test_round_trip_binary_data_with_nul_bytes() {
    let data = [0u8, 0, 0, 255, 1, 0, 128, 7, 0];
    assert_eq!(round_trip(&data), data);
}

#[test]
fn test_round_trip_random_data() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for len in [1usize, 2, 63, 64, 65, 1024, 65_536] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        assert_eq!(round_trip(&data), data, "length {}", len);
    }
}

#[test]
fn test_round_trip_skewed_distribution() {
    // Heavily repeated symbols compress well and stress long codes
    // for the rare ones.
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = vec![b'e'; 50_000];
    for _ in 0..100 {
        let pos = rng.gen_range(0..data.len());
        data[pos] = rng.gen();
    }
    let (table, compressed) = compress(&data).unwrap();
    assert!(compressed.len() < data.len());
    assert_eq!(decompress(&table, &compressed).unwrap(), data);
}

#[test]
fn test_compressed_text_beats_raw_size() {
    let data: Vec<u8> = b"abababababab".repeat(500);
    let (_, compressed) = compress(&data).unwrap();
    assert!(compressed.len() < data.len() / 4);
}

#[test]
fn test_code_table_round_trip_preserves_codes() {
    let mut rng = StdRng::seed_from_u64(7);
    let data: Vec<u8> = (0..10_000).map(|_| rng.gen_range(b'a'..=b'z')).collect();
    let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data));

    let mut table = Vec::new();
    write_code_table(&tree, &mut table).unwrap();
    let rebuilt = read_code_table(table.as_slice()).unwrap();

    let mut original: Vec<(u16, String)> = tree
        .code_book()
        .iter()
        .map(|(s, c)| (s, c.to_string()))
        .collect();
    let mut recovered: Vec<(u16, String)> = rebuilt
        .code_book()
        .iter()
        .map(|(s, c)| (s, c.to_string()))
        .collect();
    original.sort();
    recovered.sort();
    assert_eq!(original, recovered);
}

#[test]
fn test_leaf_count_invariant_random_alphabets() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let alphabet_size = rng.gen_range(1..=200usize);
        let mut data = Vec::new();
        for symbol in 0..alphabet_size {
            let repeats = rng.gen_range(1..=50);
            data.extend(std::iter::repeat(symbol as u8).take(repeats));
        }
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data));
        assert_eq!(tree.leaf_count(), alphabet_size + 1);
        assert_eq!(tree.internal_count(), alphabet_size);
    }
}

#[test]
fn test_streaming_api_matches_in_memory_api() {
    let data = b"streaming and in-memory entry points must agree".to_vec();
    let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data));
    let book = tree.code_book();

    let streamed = encode(data.as_slice(), &book, Vec::new()).unwrap();
    let (_, in_memory) = compress(&data).unwrap();
    assert_eq!(streamed, in_memory);

    let mut decoded = Vec::new();
    decode(streamed.as_slice(), &tree, &mut decoded).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn test_pseudo_eof_always_present() {
    for data in [&b""[..], &b"x"[..], &b"hello world"[..]] {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data));
        assert!(tree.code_book().get(PSEUDO_EOF).is_some());
    }
}

#[test]
fn test_truncated_stream_rejected() {
    let (table, compressed) = compress(b"some meaningful payload").unwrap();
    for cut in 0..compressed.len() {
        // The remaining bits replay the original walk exactly, so the
        // pseudo-EOF leaf can never be reached early.
        let result = decompress(&table, &compressed[..cut]);
        assert!(
            matches!(result, Err(Error::TruncatedStream)),
            "cut at {} should fail as truncated",
            cut
        );
    }
}

#[test]
fn test_corrupt_code_table_rejected() {
    let cases: [&[u8]; 4] = [
        b"not a number\n01\n",
        b"65\n",
        b"65\n0\n66\n01\n",
        b"999\n0\n",
    ];
    for table in cases {
        assert!(matches!(
            read_code_table(table),
            Err(Error::InvalidCodeTable(_))
        ));
    }
}
