#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Through the frame layer and the engine-owned buffer boundary.
    if let Ok(buf) = lz4::decompress(data) {
        assert_eq!(Some(buf.len()), lz4::frame::declared_size(data));
    }
});
