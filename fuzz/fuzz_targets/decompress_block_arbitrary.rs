#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must yield Ok or Err, never a panic or an overrun.
    for limit in [0usize, 64, 4096, 1 << 20] {
        let mut dst = Vec::new();
        if let Ok(n) = lz4::block::decompress_block_into(data, &mut dst, limit) {
            assert!(n <= limit);
            assert_eq!(n, dst.len());
        } else {
            assert!(dst.is_empty(), "output must be rolled back on error");
        }
    }
});
