// Integration tests for block::compress: the block encoder.
//
//   - compress_bound() returns worst-case sizes and 0 above LZ4_MAX_INPUT_SIZE
//   - Output respects the end-of-block parsing restrictions
//   - Higher levels never lose to level 1 on redundant data by much
//   - compress_block_into() appends without touching existing bytes

use lz4::block::compress::{
    compress_block, compress_block_default, compress_block_into, compress_block_level,
    compress_bound,
};
use lz4::block::decompress::decompress_block;
use lz4::block::token::{Token, TokenReader};
use lz4::block::types::{CompressParams, LASTLITERALS, LZ4_MAX_INPUT_SIZE, MFLIMIT};

fn lorem(len: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
        "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut x = 0x2545_F491u32;
    while out.len() < len {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        out.extend_from_slice(WORDS[x as usize % WORDS.len()].as_bytes());
        out.push(if x % 11 == 0 { b'\n' } else { b' ' });
    }
    out.truncate(len);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bound_values() {
    assert_eq!(compress_bound(0), 16);
    assert_eq!(compress_bound(1), 17);
    assert_eq!(compress_bound(1000), 1000 + 3 + 16);
    assert_eq!(compress_bound(LZ4_MAX_INPUT_SIZE), LZ4_MAX_INPUT_SIZE + LZ4_MAX_INPUT_SIZE / 255 + 16);
    assert_eq!(compress_bound(LZ4_MAX_INPUT_SIZE + 1), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing restrictions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_match_starts_in_last_mflimit_bytes() {
    for len in [13usize, 20, 64, 333, 4096] {
        let src = lorem(len);
        for level in [1, 4, 9] {
            let block = compress_block_level(&src, level).unwrap();
            let mut produced = 0usize;
            let mut last_was_literal = false;
            for token in TokenReader::new(&block) {
                match token.unwrap() {
                    Token::LiteralRun(l) => {
                        produced += l.len();
                        last_was_literal = true;
                    }
                    Token::BackReference { length, .. } => {
                        assert!(produced + MFLIMIT <= len, "len {len} level {level}");
                        produced += length;
                        assert!(produced + LASTLITERALS <= len);
                        last_was_literal = false;
                    }
                }
            }
            assert!(last_was_literal);
            assert_eq!(produced, len);
        }
    }
}

#[test]
fn tiny_inputs_are_literal_only() {
    for len in 1..13usize {
        let src = vec![b'r'; len];
        let block = compress_block_default(&src).unwrap();
        assert_eq!(block.len(), len + 1);
        assert_eq!(block[0] >> 4, len as u8);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ratio sanity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn text_compresses() {
    let src = lorem(64 * 1024);
    let block = compress_block_default(&src).unwrap();
    assert!(block.len() < src.len() * 3 / 4, "{} -> {}", src.len(), block.len());
}

#[test]
fn higher_level_is_not_worse_than_fast_on_text() {
    let src = lorem(32 * 1024);
    let fast = compress_block_level(&src, 1).unwrap().len();
    let dense = compress_block_level(&src, 9).unwrap().len();
    assert!(dense <= fast, "level 9 {dense} > level 1 {fast}");
}

#[test]
fn every_level_round_trips_text() {
    let src = lorem(20_000);
    for level in 1..=9 {
        let block = compress_block_level(&src, level).unwrap();
        assert_eq!(decompress_block(&block, src.len()).unwrap(), src, "level {level}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameters and output placement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn explicit_params_are_honoured() {
    let src = lorem(10_000);
    let greedy = CompressParams { nb_searches: 8, lazy: false, accelerate: false };
    let lazy = CompressParams { nb_searches: 8, lazy: true, accelerate: false };
    for params in [greedy, lazy] {
        let block = compress_block(&src, &params).unwrap();
        assert_eq!(decompress_block(&block, 0).unwrap(), src);
    }
}

#[test]
fn into_appends() {
    let src = lorem(1000);
    let mut out = b"HDR".to_vec();
    let n = compress_block_into(&src, &CompressParams::default(), &mut out).unwrap();
    assert_eq!(out.len(), 3 + n);
    assert_eq!(&out[..3], b"HDR");
    assert_eq!(decompress_block(&out[3..], 1000).unwrap(), src);
}
