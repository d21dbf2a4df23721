// Integration tests for block::decompress: token replay.
//
//   - Hand-crafted blocks decode to the expected bytes
//   - Overlapping back-references replicate their pattern
//   - Corrupt and truncated blocks fail without partial output
//   - max_output bounds the decoded size

use lz4::block::compress::compress_block_default;
use lz4::block::decompress::{copy_back_reference, decompress_block, decompress_block_into};
use lz4::block::token::{write_tokens, Token};
use lz4::CodecError;

#[test]
fn literal_only_block() {
    let block = write_tokens(&[Token::LiteralRun(b"just literals")]);
    assert_eq!(decompress_block(&block, 0).unwrap(), b"just literals");
}

#[test]
fn empty_block_decodes_to_nothing() {
    assert!(decompress_block(&[0x00], 0).unwrap().is_empty());
}

#[test]
fn empty_stream_is_truncated() {
    assert_eq!(decompress_block(&[], 0), Err(CodecError::TruncatedStream));
}

#[test]
fn overlapping_reference_run_length() {
    let block = write_tokens(&[
        Token::LiteralRun(b"ab"),
        Token::BackReference { distance: 2, length: 1000 },
        Token::LiteralRun(b"!"),
    ]);
    let out = decompress_block(&block, 0).unwrap();
    assert_eq!(out.len(), 1003);
    assert!(out[..1002].chunks(2).all(|c| c == b"ab"));
    assert_eq!(out[1002], b'!');
}

#[test]
fn copy_with_every_small_distance() {
    for distance in 1..=16usize {
        let mut out: Vec<u8> = (0..distance as u8).collect();
        copy_back_reference(&mut out, distance, 100).unwrap();
        for (i, &b) in out.iter().enumerate() {
            assert_eq!(b as usize, i % distance);
        }
    }
}

#[test]
fn distance_past_start_is_corrupt() {
    let block = write_tokens(&[
        Token::LiteralRun(b"abc"),
        Token::BackReference { distance: 4, length: 4 },
    ]);
    assert_eq!(decompress_block(&block, 0), Err(CodecError::CorruptStream));
}

#[test]
fn final_literals_claiming_too_much_are_truncated() {
    let mut block = compress_block_default(b"some input that is long enough to matter").unwrap();
    // Drop the last literal byte; the final token still claims it.
    block.pop();
    assert_eq!(decompress_block(&block, 0), Err(CodecError::TruncatedStream));
}

#[test]
fn failure_leaves_destination_untouched() {
    let mut out = b"keep".to_vec();
    let block = write_tokens(&[
        Token::LiteralRun(b"0123456789"),
        Token::BackReference { distance: 11, length: 4 },
    ]);
    assert_eq!(
        decompress_block_into(&block, &mut out, usize::MAX),
        Err(CodecError::CorruptStream)
    );
    assert_eq!(out, b"keep");
}

#[test]
fn append_after_existing_output() {
    let mut out = b"keep".to_vec();
    let block = write_tokens(&[
        Token::LiteralRun(b"xyz"),
        Token::BackReference { distance: 3, length: 6 },
    ]);
    assert_eq!(decompress_block_into(&block, &mut out, usize::MAX), Ok(9));
    assert_eq!(out, b"keepxyzxyzxyz");
}

#[test]
fn max_output_limits_literals_too() {
    let block = write_tokens(&[Token::LiteralRun(b"0123456789")]);
    let mut out = Vec::new();
    assert_eq!(decompress_block_into(&block, &mut out, 9), Err(CodecError::CorruptStream));
    assert_eq!(decompress_block_into(&block, &mut out, 10), Ok(10));
}
