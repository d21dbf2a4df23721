//! E2E Test Suite 04: C ABI
//!
//! Drives the exported `lz4_*` symbols exactly as a C caller would:
//! - NULL result and *out_len == 0 on every failure
//! - lz4_last_error() reports the failure kind per thread
//! - lz4_free() releases exactly once; a second release is detected
//! - Buffers come from malloc and hold a size-prefixed frame

extern crate lz4;

use std::ffi::CStr;
use std::ptr;
use std::slice;

use lz4::abi::{
    lz4_compress, lz4_compress_bound, lz4_compress_level, lz4_decompress, lz4_error_string,
    lz4_free, lz4_last_error, lz4_version_string,
};
use lz4::config::HANDLE_TRACKING;
use lz4::CodecError;

unsafe fn call_compress(data: &[u8]) -> (*mut u8, u64) {
    let mut len = u64::MAX;
    let p = lz4_compress(data.as_ptr(), data.len(), &mut len);
    (p, len)
}

unsafe fn call_decompress(data: &[u8]) -> (*mut u8, u64) {
    let mut len = u64::MAX;
    let p = lz4_decompress(data.as_ptr(), data.len(), &mut len);
    (p, len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: success path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_abi_roundtrip() {
    let data = b"crossing the boundary ".repeat(100);
    unsafe {
        let (c, clen) = call_compress(&data);
        assert!(!c.is_null());
        assert_eq!(lz4_last_error(), 0);
        assert!((clen as usize) < data.len());
        assert!(clen as usize <= lz4_compress_bound(data.len()));

        let compressed = slice::from_raw_parts(c, clen as usize);
        assert_eq!(&compressed[..4], &(data.len() as u32).to_le_bytes());

        let (d, dlen) = call_decompress(compressed);
        assert!(!d.is_null());
        assert_eq!(slice::from_raw_parts(d, dlen as usize), &data[..]);

        lz4_free(c.cast());
        lz4_free(d.cast());
        assert_eq!(lz4_last_error(), 0);
    }
}

#[test]
fn test_abi_levels() {
    let data = b"level level level level level level level level".repeat(40);
    unsafe {
        for level in [-5, 0, 1, 4, 9, 100] {
            let mut clen = 0u64;
            let c = lz4_compress_level(data.as_ptr(), data.len(), level, &mut clen);
            assert!(!c.is_null(), "level {level}");
            let (d, dlen) = call_decompress(slice::from_raw_parts(c, clen as usize));
            assert_eq!(slice::from_raw_parts(d, dlen as usize), &data[..]);
            lz4_free(c.cast());
            lz4_free(d.cast());
        }
    }
}

// free() bypasses the registry, so this only runs with tracking off.
#[test]
#[cfg_attr(any(debug_assertions, feature = "handle-tracking"), ignore = "handle tracking owns release")]
fn test_abi_buffers_are_malloc_compatible() {
    unsafe {
        let (c, _) = call_compress(b"freed with libc");
        assert!(!c.is_null());
        libc::free(c.cast());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: failure convention
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_abi_empty_input() {
    unsafe {
        let (p, len) = call_compress(&[]);
        assert!(p.is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::EmptyInput.code());

        let (p, len) = call_decompress(&[]);
        assert!(p.is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::EmptyInput.code());
    }
}

#[test]
fn test_abi_null_arguments() {
    unsafe {
        let mut len = 7u64;
        assert!(lz4_compress(ptr::null(), 10, &mut len).is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::InvalidArgument.code());

        let data = [1u8, 2, 3];
        assert!(lz4_decompress(data.as_ptr(), 3, ptr::null_mut()).is_null());
        assert_eq!(lz4_last_error(), CodecError::InvalidArgument.code());
    }
}

#[test]
fn test_abi_corrupt_and_truncated() {
    unsafe {
        let (p, len) = call_decompress(&[8, 0, 0, 0, 0x80, b'a']);
        assert!(p.is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::TruncatedStream.code());

        let (p, len) = call_decompress(&[8, 0, 0, 0, 0x10, b'a', 0x05, 0x00, 0x30, b'x', b'y', b'z']);
        assert!(p.is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::CorruptStream.code());
    }
}

#[test]
fn test_abi_impossible_length() {
    let data = b"only a few bytes";
    unsafe {
        let mut len = 1u64;
        assert!(lz4_compress(data.as_ptr(), usize::MAX, &mut len).is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::InputTooLarge.code());

        len = 1;
        assert!(lz4_compress_level(data.as_ptr(), usize::MAX, 9, &mut len).is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::InputTooLarge.code());

        len = 1;
        let past_isize = isize::MAX as usize + 1;
        assert!(lz4_decompress(data.as_ptr(), past_isize, &mut len).is_null());
        assert_eq!(len, 0);
        assert_eq!(lz4_last_error(), CodecError::InvalidArgument.code());
    }
}

#[test]
fn test_abi_last_error_is_per_thread() {
    unsafe {
        let _ = call_compress(&[]);
        assert_eq!(lz4_last_error(), CodecError::EmptyInput.code());
    }
    let other = std::thread::spawn(|| lz4_last_error()).join().unwrap();
    assert_eq!(other, 0);
    assert_eq!(lz4_last_error(), CodecError::EmptyInput.code());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: release discipline
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_abi_free_null_is_noop() {
    unsafe { lz4_free(ptr::null_mut()) };
    assert_eq!(lz4_last_error(), 0);
}

#[test]
#[cfg_attr(not(any(debug_assertions, feature = "handle-tracking")), ignore = "needs handle tracking")]
fn test_abi_double_free_detected() {
    assert!(HANDLE_TRACKING, "release checks need handle tracking");
    unsafe {
        let (c, _) = call_compress(b"free me twice, see what happens");
        lz4_free(c.cast());
        assert_eq!(lz4_last_error(), 0);
        lz4_free(c.cast());
        assert_eq!(lz4_last_error(), CodecError::InvalidHandle.code());
    }
}

#[test]
#[cfg_attr(not(any(debug_assertions, feature = "handle-tracking")), ignore = "needs handle tracking")]
fn test_abi_foreign_pointer_detected() {
    assert!(HANDLE_TRACKING, "release checks need handle tracking");
    let mut stack = [0u8; 8];
    unsafe { lz4_free(stack.as_mut_ptr().cast()) };
    assert_eq!(lz4_last_error(), CodecError::InvalidHandle.code());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: diagnostics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_abi_error_strings() {
    unsafe {
        assert_eq!(CStr::from_ptr(lz4_error_string(0)).to_str().unwrap(), "no error");
        assert_eq!(
            CStr::from_ptr(lz4_error_string(CodecError::TruncatedStream.code())).to_str().unwrap(),
            "truncated compressed stream"
        );
        assert_eq!(CStr::from_ptr(lz4_error_string(-42)).to_str().unwrap(), "unknown error code");
    }
}

#[test]
fn test_abi_version_and_bound() {
    let v = unsafe { CStr::from_ptr(lz4_version_string()) };
    assert_eq!(v.to_str().unwrap(), lz4::VERSION_STRING);
    assert_eq!(lz4_compress_bound(255), 255 + 1 + 16 + 4);
    assert_eq!(lz4_compress_bound(usize::MAX), 0);
}
