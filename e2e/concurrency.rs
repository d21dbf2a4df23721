//! E2E Test Suite 03: Concurrent Reentrancy
//!
//! Validates that independent compress / decompress calls running on many
//! threads at once produce exactly the sequential results:
//! - rayon parallel iterators over distinct inputs
//! - std::thread::scope with one thread per input
//! - handles created and released on different threads

extern crate lz4;

use std::sync::Barrier;
use std::thread;

use lz4::block::compress::compress_block_level;
use lz4::{compress, compress_level, decompress, release, CodecError};
use rayon::prelude::*;

fn corpus(n: usize) -> Vec<Vec<u8>> {
    (0..n)
        .map(|i| {
            let mut v = format!("input #{i}: ").repeat(50 + i * 7).into_bytes();
            v.extend((0..(i * 131) % 3000).map(|j| (j * (i + 1)) as u8));
            v
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: rayon
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_parallel_compress_matches_sequential() {
    let inputs = corpus(64);
    let sequential: Vec<Vec<u8>> = inputs
        .iter()
        .enumerate()
        .map(|(i, d)| compress_level(d, 1 + (i % 9) as i32).unwrap().to_vec())
        .collect();
    let parallel: Vec<Vec<u8>> = inputs
        .par_iter()
        .enumerate()
        .map(|(i, d)| compress_level(d, 1 + (i % 9) as i32).unwrap().to_vec())
        .collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_parallel_roundtrip() {
    let inputs = corpus(64);
    let results: Vec<Result<Vec<u8>, CodecError>> = inputs
        .par_iter()
        .map(|d| -> Result<Vec<u8>, CodecError> {
            let packed = compress(d)?;
            Ok(decompress(packed.as_slice())?.to_vec())
        })
        .collect();
    for (input, result) in inputs.iter().zip(results) {
        assert_eq!(&result.unwrap(), input);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: scoped threads started together
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_scoped_threads_block_level() {
    let inputs = corpus(16);
    let expected: Vec<Vec<u8>> = inputs.iter().map(|d| compress_block_level(d, 9).unwrap()).collect();
    let barrier = Barrier::new(inputs.len());

    let got: Vec<Vec<u8>> = thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|d| {
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    compress_block_level(d, 9).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(got, expected);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: ownership crosses threads
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_handles_released_on_other_threads() {
    let inputs = corpus(32);
    let handed_out: Vec<(usize, usize)> = inputs
        .par_iter()
        .map(|d| {
            let (ptr, len) = compress(d).unwrap().into_raw_parts();
            (ptr as usize, len)
        })
        .collect();

    thread::scope(|s| {
        for chunk in handed_out.chunks(8) {
            s.spawn(move || {
                for &(addr, _) in chunk {
                    assert_eq!(unsafe { release(addr as *mut u8) }, Ok(()));
                }
            });
        }
    });
}
