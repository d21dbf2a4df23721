// Integration tests for block::types: format constants, sizing helpers and
// the compression-level table.
//
//   - Format constants keep the values other LZ4 block decoders expect
//   - hash_log_for / chain_size_for stay inside their bounds
//   - count() agrees with a naive byte-by-byte comparison
//   - CompressParams::for_level follows the level table and clamps

use lz4::block::types::{
    chain_size_for, count, hash_log_for, CompressParams, CHAIN_SIZE_MAX, HASH_LOG_MAX,
    HASH_LOG_MIN, LASTLITERALS, LEVEL_TABLE, LZ4_DISTANCE_MAX, LZ4_MAX_INPUT_SIZE,
    LZ4_MIN_LENGTH, MFLIMIT, MINMATCH,
};
use lz4::config::{CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_constants() {
    assert_eq!(MINMATCH, 4);
    assert_eq!(LASTLITERALS, 5);
    assert_eq!(MFLIMIT, 12);
    assert_eq!(LZ4_MIN_LENGTH, 13);
    assert_eq!(LZ4_DISTANCE_MAX, 65_535);
    assert_eq!(LZ4_MAX_INPUT_SIZE, 0x7E00_0000);
}

// ─────────────────────────────────────────────────────────────────────────────
// Table sizing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hash_log_is_bounded_for_all_sizes() {
    for shift in 0..usize::BITS - 1 {
        let log = hash_log_for(1usize << shift);
        assert!((HASH_LOG_MIN..=HASH_LOG_MAX).contains(&log), "shift {shift}");
    }
}

#[test]
fn hash_log_is_monotonic() {
    let mut prev = 0;
    for len in (0..200_000).step_by(997) {
        let log = hash_log_for(len);
        assert!(log >= prev);
        prev = log;
    }
}

#[test]
fn chain_size_never_exceeds_window() {
    for len in [1usize, 2, 3, 100, 65_535, 65_536, 65_537, 1 << 24] {
        let size = chain_size_for(len);
        assert!(size.is_power_of_two());
        assert!(size <= CHAIN_SIZE_MAX);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// count()
// ─────────────────────────────────────────────────────────────────────────────

fn naive_count(src: &[u8], earlier: usize, later: usize, limit: usize) -> usize {
    let mut n = 0;
    while later + n < limit && src[earlier + n] == src[later + n] {
        n += 1;
    }
    n
}

#[test]
fn count_matches_naive_on_mixed_data() {
    let src: Vec<u8> = (0..300u32).map(|i| if i % 37 < 30 { b'a' } else { (i % 251) as u8 }).collect();
    for earlier in (0..100).step_by(7) {
        for later in (earlier + 1..200).step_by(11) {
            for limit in [later, later + 3, later + 17, src.len()] {
                assert_eq!(
                    count(&src, earlier, later, limit),
                    naive_count(&src, earlier, later, limit),
                    "earlier={earlier} later={later} limit={limit}"
                );
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Levels
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn level_table_shape() {
    assert!(LEVEL_TABLE[1].accelerate);
    assert!(!LEVEL_TABLE[1].lazy);
    for level in 6..=9 {
        assert!(LEVEL_TABLE[level].lazy);
    }
    assert_eq!(LEVEL_TABLE[9].nb_searches, 256);
}

#[test]
fn for_level_uses_table() {
    for level in CLEVEL_MIN..=CLEVEL_MAX {
        assert_eq!(CompressParams::for_level(level), LEVEL_TABLE[level as usize]);
    }
    assert_eq!(CompressParams::default(), LEVEL_TABLE[CLEVEL_DEFAULT as usize]);
}
