#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
    // First byte picks the level; the rest is the payload.
    let Some((&selector, data)) = input.split_first() else {
        return;
    };
    let level = i32::from(selector % 10);

    let compressed = lz4::block::compress_block_level(data, level).expect("compression failed");
    assert!(compressed.len() <= lz4::block::compress_bound(data.len()));

    let recovered = lz4::block::decompress_block(&compressed, data.len()).expect("decode failed");
    assert_eq!(recovered, data, "block round-trip mismatch at level {level}");

    // Every back-reference must point inside already-produced output.
    let mut produced = 0usize;
    for token in lz4::block::TokenReader::new(&compressed) {
        match token.expect("token stream") {
            lz4::block::Token::LiteralRun(lits) => produced += lits.len(),
            lz4::block::Token::BackReference { distance, length } => {
                assert!(distance >= 1 && distance <= produced);
                produced += length;
            }
        }
    }
    assert_eq!(produced, data.len());
});
