// Integration tests for frame: the 4-byte size prefix + block layout.
//
//   - The prefix is the little-endian uncompressed length
//   - Frames round-trip at every level, including the empty payload
//   - Length mismatches between prefix and block are detected
//   - A hostile prefix does not force a huge allocation

use lz4::block::compress::compress_block_default;
use lz4::frame::{
    compress_prepend_size, compress_prepend_size_with, declared_size, decompress_size_prepended,
    frame_bound, SIZE_PREFIX_LEN,
};
use lz4::block::types::CompressParams;
use lz4::CodecError;

#[test]
fn layout_is_prefix_then_block() {
    let src = b"frame layout frame layout frame layout".to_vec();
    let framed = compress_prepend_size(&src, 1).unwrap();
    assert_eq!(&framed[..SIZE_PREFIX_LEN], &(src.len() as u32).to_le_bytes());
    assert_eq!(&framed[SIZE_PREFIX_LEN..], &compress_block_default(&src).unwrap()[..]);
}

#[test]
fn round_trip_every_level() {
    let src: Vec<u8> = b"0123456789abcdef".iter().cycle().take(10_000).copied().collect();
    for level in 1..=9 {
        let framed = compress_prepend_size(&src, level).unwrap();
        assert!(framed.len() <= frame_bound(src.len()));
        assert_eq!(decompress_size_prepended(&framed).unwrap(), src);
    }
}

#[test]
fn explicit_params() {
    let params = CompressParams { nb_searches: 3, lazy: true, accelerate: false };
    let framed = compress_prepend_size_with(b"params params params params", &params).unwrap();
    assert_eq!(decompress_size_prepended(&framed).unwrap(), b"params params params params");
}

#[test]
fn declared_size_reads_prefix() {
    let framed = compress_prepend_size(&[1u8; 300], 1).unwrap();
    assert_eq!(declared_size(&framed), Some(300));
    assert_eq!(declared_size(&framed[..3]), None);
}

#[test]
fn truncated_block_is_detected() {
    let src = vec![b'z'; 5000];
    let framed = compress_prepend_size(&src, 1).unwrap();
    for cut in SIZE_PREFIX_LEN..framed.len() {
        let err = decompress_size_prepended(&framed[..cut]).unwrap_err();
        assert!(
            matches!(err, CodecError::TruncatedStream | CodecError::CorruptStream),
            "cut {cut}: {err:?}"
        );
    }
}

#[test]
fn oversized_prefix_is_truncated_not_oom() {
    let mut framed = compress_prepend_size(b"tiny", 1).unwrap();
    framed[..4].copy_from_slice(&u32::MAX.to_le_bytes());
    assert_eq!(decompress_size_prepended(&framed), Err(CodecError::TruncatedStream));
}

#[test]
fn undersized_prefix_is_corrupt() {
    let mut framed = compress_prepend_size(&[3u8; 100], 1).unwrap();
    framed[0] = 99;
    assert_eq!(decompress_size_prepended(&framed), Err(CodecError::CorruptStream));
}
