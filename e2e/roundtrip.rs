//! E2E Test Suite 01: Round-trip
//!
//! Validates `decompress(compress(B)) == B` through every layer:
//! - block: compress_block_level / decompress_block
//! - frame: compress_prepend_size / decompress_size_prepended
//! - api:   compress / compress_level / decompress (engine-owned buffers)
//!
//! Pathological inputs (all-zero, repetitive, random, single byte × 10000)
//! are covered explicitly; arbitrary inputs via proptest.

extern crate lz4;

use lz4::block::compress::{compress_block_level, compress_bound};
use lz4::block::decompress::decompress_block;
use lz4::frame::{compress_prepend_size, decompress_size_prepended};
use lz4::{compress, compress_level, decompress};
use proptest::prelude::*;

fn xorshift(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed.max(1);
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        })
        .collect()
}

fn check_all_layers(data: &[u8]) {
    for level in [1, 2, 5, 6, 9] {
        let block = compress_block_level(data, level).unwrap();
        assert!(block.len() <= compress_bound(data.len()));
        assert_eq!(decompress_block(&block, data.len()).unwrap(), data, "block level {level}");

        let framed = compress_prepend_size(data, level).unwrap();
        assert_eq!(decompress_size_prepended(&framed).unwrap(), data, "frame level {level}");

        if !data.is_empty() {
            let packed = compress_level(data, level).unwrap();
            assert_eq!(decompress(packed.as_slice()).unwrap().as_slice(), data, "api level {level}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: pathological inputs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_all_zero() {
    check_all_layers(&vec![0u8; 100_000]);
}

#[test]
fn test_roundtrip_highly_repetitive() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(2000);
    check_all_layers(&data);
}

#[test]
fn test_roundtrip_random() {
    check_all_layers(&xorshift(70_000, 0xC0FFEE));
}

#[test]
fn test_roundtrip_single_byte_repeated_10000() {
    check_all_layers(&vec![b'x'; 10_000]);
}

#[test]
fn test_roundtrip_single_byte() {
    check_all_layers(&[42]);
}

#[test]
fn test_roundtrip_empty_block_and_frame() {
    check_all_layers(&[]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: window and length boundaries
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_repeat_beyond_window() {
    // A chunk repeated after more than 64 KiB of noise cannot be referenced.
    let chunk = xorshift(4096, 7);
    let mut data = chunk.clone();
    data.extend(xorshift(70_000, 99));
    data.extend(&chunk);
    check_all_layers(&data);
}

#[test]
fn test_roundtrip_repeat_at_window_edge() {
    let chunk = xorshift(512, 3);
    for gap in [65_535 - 512, 65_535 - 511, 65_535] {
        let mut data = chunk.clone();
        data.extend(xorshift(gap, 11));
        data.extend(&chunk);
        let framed = compress_prepend_size(&data, 9).unwrap();
        assert_eq!(decompress_size_prepended(&framed).unwrap(), data, "gap {gap}");
    }
}

#[test]
fn test_roundtrip_lengths_around_limits() {
    let base = b"abcabcabcabcabcabcabcabcabcabcabcabc".repeat(20);
    for len in [1usize, 4, 5, 12, 13, 14, 17, 18, 19, 20, 270, 271, 272, 525, base.len()] {
        check_all_layers(&base[..len]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: compression efficiency
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_repeated_byte_compresses_strictly_smaller() {
    let data = vec![0x55u8; 10_000];
    let packed = compress(&data).unwrap();
    assert!(packed.len() < data.len(), "{} >= {}", packed.len(), data.len());
    assert!(packed.len() < 100);
}

#[test]
fn test_random_data_expands_within_bound() {
    let data = xorshift(100_000, 12345);
    let packed = compress(&data).unwrap();
    assert!(packed.len() <= compress_bound(data.len()) + 4);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: properties
// ─────────────────────────────────────────────────────────────────────────────

fn structured_bytes() -> impl Strategy<Value = Vec<u8>> {
    // Short alphabet and repeated chunks give the match finder something to do.
    prop::collection::vec(
        prop_oneof![
            prop::collection::vec(any::<u8>(), 0..64),
            prop::collection::vec(0u8..4, 0..256),
            (any::<u8>(), 1usize..600).prop_map(|(b, n)| vec![b; n]),
        ],
        0..24,
    )
    .prop_map(|chunks| chunks.concat())
}

proptest! {
    #[test]
    fn prop_block_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4096), level in 1i32..=9) {
        let block = compress_block_level(&data, level).unwrap();
        prop_assert!(block.len() <= compress_bound(data.len()));
        prop_assert_eq!(decompress_block(&block, data.len()).unwrap(), data);
    }

    #[test]
    fn prop_structured_frame_roundtrip(data in structured_bytes(), level in 1i32..=9) {
        let framed = compress_prepend_size(&data, level).unwrap();
        prop_assert_eq!(decompress_size_prepended(&framed).unwrap(), data);
    }

    #[test]
    fn prop_api_roundtrip(data in prop::collection::vec(any::<u8>(), 1..2048)) {
        let packed = compress(&data).unwrap();
        let unpacked = decompress(packed.as_slice()).unwrap();
        prop_assert_eq!(unpacked.as_slice(), &data[..]);
    }

    #[test]
    fn prop_compression_is_deterministic(data in structured_bytes()) {
        prop_assert_eq!(
            compress_block_level(&data, 6).unwrap(),
            compress_block_level(&data, 6).unwrap()
        );
    }
}
