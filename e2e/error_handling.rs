//! E2E Test Suite 02: Error Handling
//!
//! Validates that malformed input is reported, never accepted or panicked on:
//! - EmptyInput for empty compress / decompress input
//! - TruncatedStream when a token claims more bytes than remain
//! - CorruptStream when a back-reference reaches before the output start
//! - No handle is left behind by a failed call

extern crate lz4;

use lz4::block::decompress::decompress_block;
use lz4::block::token::{write_tokens, Token};
use lz4::frame::{compress_prepend_size, decompress_size_prepended};
use lz4::{compress, decompress, CodecError};

fn frame_of(block: &[u8], declared: u32) -> Vec<u8> {
    let mut out = declared.to_le_bytes().to_vec();
    out.extend_from_slice(block);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: empty input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_empty_input() {
    assert_eq!(compress(&[]).unwrap_err(), CodecError::EmptyInput);
}

#[test]
fn test_decompress_empty_input() {
    assert_eq!(decompress(&[]).unwrap_err(), CodecError::EmptyInput);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: truncation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_final_token_claims_more_literals_than_remain() {
    // Token says 8 literals; only 3 follow.
    let block = [0x80, b'a', b'b', b'c'];
    assert_eq!(decompress_block(&block, 8), Err(CodecError::TruncatedStream));
    assert_eq!(decompress(&frame_of(&block, 8)).unwrap_err(), CodecError::TruncatedStream);
}

#[test]
fn test_frame_shorter_than_prefix() {
    for len in 1..4 {
        assert_eq!(decompress(&[1, 0, 0][..len]).unwrap_err(), CodecError::TruncatedStream);
    }
}

#[test]
fn test_prefix_without_block() {
    assert_eq!(decompress(&[10, 0, 0, 0]).unwrap_err(), CodecError::TruncatedStream);
}

#[test]
fn test_every_truncation_of_a_real_frame() {
    let data = b"truncate me, truncate me, truncate me; please truncate me".repeat(10);
    let framed = compress_prepend_size(&data, 6).unwrap();
    for cut in 1..framed.len() {
        let err = decompress(&framed[..cut]).unwrap_err();
        assert!(
            matches!(err, CodecError::TruncatedStream | CodecError::CorruptStream),
            "cut {cut}: {err:?}"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: corruption
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_back_reference_beyond_produced_output() {
    let block = write_tokens(&[
        Token::LiteralRun(b"12345"),
        Token::BackReference { distance: 6, length: 4 },
        Token::LiteralRun(b"67890"),
    ]);
    assert_eq!(decompress_block(&block, 0), Err(CodecError::CorruptStream));
    assert_eq!(decompress(&frame_of(&block, 14)).unwrap_err(), CodecError::CorruptStream);
}

#[test]
fn test_back_reference_with_no_output_yet() {
    let block = [0x00, 0x01, 0x00, 0x00];
    assert_eq!(decompress_block(&block, 0), Err(CodecError::CorruptStream));
}

#[test]
fn test_zero_distance() {
    let block = [0x10, b'a', 0x00, 0x00, 0x10, b'b'];
    assert_eq!(decompress_block(&block, 0), Err(CodecError::CorruptStream));
}

#[test]
fn test_output_longer_than_declared() {
    let framed = compress_prepend_size(&[9u8; 1000], 1).unwrap();
    let mut lying = framed.clone();
    lying[..4].copy_from_slice(&999u32.to_le_bytes());
    assert_eq!(decompress_size_prepended(&lying), Err(CodecError::CorruptStream));
}

#[test]
fn test_zero_length_frame_is_empty_input() {
    let framed = compress_prepend_size(&[], 1).unwrap();
    assert_eq!(decompress(&framed).unwrap_err(), CodecError::EmptyInput);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: arbitrary garbage never panics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_garbage_inputs_fail_cleanly() {
    let mut x = 0x9E37_79B9u32;
    for len in 0..400usize {
        let junk: Vec<u8> = (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (x >> 24) as u8
            })
            .collect();
        // Any outcome is fine as long as it is a value, not a panic.
        let _ = decompress(&junk);
        let _ = decompress_block(&junk, 1 << 16);
    }
}
