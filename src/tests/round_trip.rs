use alloc::vec;
use alloc::vec::Vec;
use core::num::NonZeroU8;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::decoding::MultiPassDecoder;
use crate::encoding::{MultiPassCompressor, PassLimit};
use crate::frame::Frame;
use crate::huffman::{FrequencyTable, HuffmanTree};
use crate::{compress, decompress};

fn assert_round_trip(data: &[u8]) {
    let compressed = compress(data).unwrap();
    let decompressed = decompress(&compressed).unwrap();
    assert!(
        decompressed == data,
        "Decoded data did not match the original input ({} bytes)",
        data.len()
    );
}

fn random_bytes(rng: &mut SmallRng, len: usize) -> Vec<u8> {
    let mut data = vec![0; len];
    rng.fill(data.as_mut_slice());
    data
}

/// Bytes drawn from a small, skewed alphabet, which compresses well but not trivially
fn skewed_bytes(rng: &mut SmallRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"eeeeeeeetttttaaaooiinnsshrdlu \n";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

#[test]
fn empty_input() {
    let compressed = compress(&[]).unwrap();
    let frame = Frame::parse(&compressed).unwrap();
    assert_eq!(frame.header.tree_size, 0);
    assert_eq!(frame.header.data_size, 0);
    assert!(frame.header.is_terminal());
    assert!(decompress(&compressed).unwrap().is_empty());
}

#[test]
fn single_byte() {
    assert_round_trip(&[0x00]);
    assert_round_trip(&[0xff]);
}

#[test]
fn single_symbol() {
    // The only symbol gets the code `0`, so the payload is all zero bits
    let data = [0x41, 0x41, 0x41];
    let compressed = compress(&data).unwrap();
    let frame = Frame::parse(&compressed).unwrap();
    assert_eq!(frame.tree, &[0x01, 0x41]);
    assert_eq!(frame.payload, &[0x00]);
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn all_byte_values() {
    let data: Vec<u8> = (0..=255u8).collect();
    assert_round_trip(&data);

    let data: Vec<u8> = (0..=255u8).rev().cycle().take(256 * 40).collect();
    assert_round_trip(&data);
}

#[test]
fn text() {
    let data = b"It was the best of times, it was the worst of times, it was the age of wisdom, \
                 it was the age of foolishness, it was the epoch of belief, it was the epoch of \
                 incredulity, it was the season of Light, it was the season of Darkness";
    assert_round_trip(data);
    assert!(compress(data).unwrap().len() < data.len());
}

#[test]
fn random_inputs() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for len in [1, 2, 3, 7, 8, 9, 100, 1000, 4096, 65_536] {
        assert_round_trip(&random_bytes(&mut rng, len));
        assert_round_trip(&skewed_bytes(&mut rng, len));
    }
}

#[test]
fn highly_compressible_input_takes_multiple_passes() {
    let data = vec![b'x'; 10_000];
    let output = MultiPassCompressor::default().compress(&data).unwrap();
    assert!(output.passes > 1, "only {} pass(es) were applied", output.passes);
    assert!(output.data.len() < data.len() / 10);

    let outer = Frame::parse(&output.data).unwrap();
    assert_eq!(outer.header.pass_depth as usize, output.passes - 1);

    let mut decoder = MultiPassDecoder::new();
    assert_eq!(decoder.decode_all(&output.data).unwrap(), data);
    assert_eq!(decoder.passes_decoded(), output.passes);
}

#[test]
fn incompressible_input_stops_after_one_pass() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let data = random_bytes(&mut rng, 1 << 16);
    let output = MultiPassCompressor::default().compress(&data).unwrap();
    assert_eq!(output.passes, 1);
    assert!(Frame::parse(&output.data).unwrap().header.is_terminal());
    assert_eq!(decompress(&output.data).unwrap(), data);
}

#[test]
fn every_pass_limit_round_trips() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut data = skewed_bytes(&mut rng, 5000);
    data.extend(core::iter::repeat(0).take(5000));
    for limit in 1..=6 {
        let limit = PassLimit::AtMost(NonZeroU8::new(limit).unwrap());
        let output = MultiPassCompressor::new(limit).compress(&data).unwrap();
        assert!(output.passes <= 6);
        assert_eq!(decompress(&output.data).unwrap(), data);
    }
}

#[test]
fn codes_are_prefix_free() {
    let mut rng = SmallRng::seed_from_u64(42);
    for len in [2, 50, 3000] {
        for data in [random_bytes(&mut rng, len), skewed_bytes(&mut rng, len)] {
            let tree = HuffmanTree::build(&FrequencyTable::count(&data)).unwrap();
            assert!(tree.code_table().is_prefix_free());
        }
    }
}

#[test]
fn trees_survive_serialization() {
    let mut rng = SmallRng::seed_from_u64(1337);
    for len in [1, 2, 50, 3000] {
        for data in [random_bytes(&mut rng, len), skewed_bytes(&mut rng, len)] {
            let tree = HuffmanTree::build(&FrequencyTable::count(&data)).unwrap();
            let mut bytes = Vec::new();
            tree.serialize(&mut bytes);
            let read = HuffmanTree::deserialize(&bytes).unwrap();
            assert_eq!(read.code_table(), tree.code_table());
        }
    }
}

#[test]
fn truncated_artifacts_are_rejected() {
    let mut rng = SmallRng::seed_from_u64(99);
    let data = skewed_bytes(&mut rng, 300);
    let compressed = compress(&data).unwrap();
    for len in 0..compressed.len() {
        assert!(
            decompress(&compressed[..len]).is_err(),
            "decoding the first {len} of {} bytes did not fail",
            compressed.len()
        );
    }
}

#[test]
fn compression_is_deterministic() {
    let mut rng = SmallRng::seed_from_u64(3);
    let data = skewed_bytes(&mut rng, 2000);
    assert_eq!(compress(&data).unwrap(), compress(&data).unwrap());
}
