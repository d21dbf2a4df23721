// Integration tests for block::token: sequence serialization and parsing.
//
//   - write_tokens / TokenReader agree on hand-built token lists
//   - Every strict prefix of a valid block is rejected or parses to fewer tokens
//   - Malformed streams map to TruncatedStream / CorruptStream

use lz4::block::token::{write_last_literals, write_sequence, write_tokens, Token, TokenReader};
use lz4::CodecError;

fn parse(block: &[u8]) -> Result<Vec<Token<'_>>, CodecError> {
    TokenReader::new(block).collect()
}

#[test]
fn hand_built_token_list_round_trips() {
    let long_lits = vec![b'L'; 600];
    let tokens = [
        Token::LiteralRun(b"abcd"),
        Token::BackReference { distance: 4, length: 4 },
        Token::LiteralRun(&long_lits),
        Token::BackReference { distance: 300, length: 1000 },
        Token::BackReference { distance: 1, length: 19 },
        Token::LiteralRun(b"tail!"),
    ];
    let block = write_tokens(&tokens);
    assert_eq!(parse(&block).unwrap(), tokens.to_vec());
}

#[test]
fn empty_token_list_is_single_zero_byte() {
    assert_eq!(write_tokens(&[]), vec![0x00]);
}

#[test]
fn reader_position_tracks_consumption() {
    let mut block = Vec::new();
    write_sequence(&mut block, b"xy", 2, 6);
    let first_len = block.len();
    write_last_literals(&mut block, b"z");

    let mut reader = TokenReader::new(&block);
    assert_eq!(reader.next(), Some(Ok(Token::LiteralRun(b"xy"))));
    assert_eq!(reader.next(), Some(Ok(Token::BackReference { distance: 2, length: 6 })));
    assert_eq!(reader.position(), first_len);
    assert_eq!(reader.next(), Some(Ok(Token::LiteralRun(b"z"))));
    assert_eq!(reader.next(), None);
    assert_eq!(reader.position(), block.len());
}

#[test]
fn truncated_prefixes_never_panic() {
    let block = write_tokens(&[
        Token::LiteralRun(&[b'q'; 40]),
        Token::BackReference { distance: 40, length: 400 },
        Token::LiteralRun(b"end of block"),
    ]);
    for cut in 0..block.len() {
        // Either an error, or a stream that stops at a sequence boundary.
        match parse(&block[..cut]) {
            Err(e) => assert!(
                matches!(e, CodecError::TruncatedStream | CodecError::CorruptStream),
                "cut {cut}: {e:?}"
            ),
            Ok(tokens) => assert!(tokens.len() <= 3, "cut {cut}"),
        }
    }
}

#[test]
fn endless_length_extension_is_truncated() {
    // Extension bytes that never terminate run out of input first.
    let mut block = vec![0xF0];
    block.extend(std::iter::repeat(0xFF).take(1000));
    assert_eq!(parse(&block), Err(CodecError::TruncatedStream));
}

#[test]
fn zero_distance_is_corrupt_anywhere() {
    let mut block = Vec::new();
    write_sequence(&mut block, b"abcd", 4, 8);
    block.extend_from_slice(&[0x00, 0x00, 0x00]);
    write_last_literals(&mut block, b"12345");
    let result = parse(&block);
    assert_eq!(result, Err(CodecError::CorruptStream));
}
