//! C-ABI shims: the exported `lz4_*` symbols declared in
//! `include/lz4_interface.h`.
//!
//! Buffers are allocated with `malloc` and must be released with `lz4_free`
//! (or `free()` when handle tracking is off).  Every failure returns NULL,
//! stores 0 in `*out_len` when `out_len` is non-null, and records the error
//! code for `lz4_last_error` on the calling thread.
//!
//! # Safety
//! Callers must pass an `input_ptr` valid for `input_len` bytes and an
//! `out_len` valid for one `uint64_t` write, or NULL.
#![allow(clippy::missing_safety_doc)]

use std::cell::Cell;
use std::ffi::c_void;
use std::os::raw::{c_char, c_int, c_uchar};
use std::ptr;
use std::slice;

use libc::size_t;

use crate::api;
use crate::block::types::LZ4_MAX_INPUT_SIZE;
use crate::buffer::{self, EngineBuffer};
use crate::displaylevel;
use crate::error::CodecError;
use crate::frame::frame_bound;

// ─── helpers ─────────────────────────────────────────────────────────────────

thread_local! {
    static LAST_ERROR: Cell<c_int> = const { Cell::new(0) };
}

#[inline]
fn set_last_error(code: c_int) {
    LAST_ERROR.with(|e| e.set(code));
}

/// Borrow the caller's input, rejecting NULL and lengths no allocation can
/// have.
#[inline]
unsafe fn input_slice<'a>(input_ptr: *const c_uchar, input_len: size_t) -> Result<&'a [u8], CodecError> {
    if input_ptr.is_null() || input_len > isize::MAX as usize {
        return Err(CodecError::InvalidArgument);
    }
    Ok(slice::from_raw_parts(input_ptr, input_len))
}

/// Input accepted by the compress entry points: at most
/// `LZ4_MAX_INPUT_SIZE` bytes, checked before the slice is built.
#[inline]
unsafe fn compress_input<'a>(input_ptr: *const c_uchar, input_len: size_t) -> Result<&'a [u8], CodecError> {
    if !input_ptr.is_null() && input_len > LZ4_MAX_INPUT_SIZE {
        return Err(CodecError::InputTooLarge);
    }
    input_slice(input_ptr, input_len)
}

/// Hand a result across the boundary following the NULL / `*out_len = 0`
/// failure convention.
unsafe fn hand_out(
    op: &str,
    result: Result<EngineBuffer, CodecError>,
    out_len: *mut u64,
) -> *mut c_uchar {
    match result {
        Ok(buf) => {
            let (ptr, len) = buf.into_raw_parts();
            *out_len = len as u64;
            set_last_error(0);
            ptr
        }
        Err(e) => {
            *out_len = 0;
            set_last_error(e.code());
            displaylevel!(4, "{}: {} ({}) \n", op, e, e.error_name());
            ptr::null_mut()
        }
    }
}

unsafe fn run<'a>(
    op: &str,
    input: impl FnOnce() -> Result<&'a [u8], CodecError>,
    out_len: *mut u64,
    f: impl FnOnce(&'a [u8]) -> Result<EngineBuffer, CodecError>,
) -> *mut c_uchar {
    if out_len.is_null() {
        set_last_error(CodecError::InvalidArgument.code());
        displaylevel!(4, "{}: null out_len \n", op);
        return ptr::null_mut();
    }
    let result = input().and_then(f);
    hand_out(op, result, out_len)
}

// ─────────────────────────────────────────────────────────────────────────────
// lz4_compress
//
// unsigned char* lz4_compress(const unsigned char* input_ptr, size_t input_len,
//                             uint64_t* out_len);
//
// Size-prefixed frame at the default level, or NULL on failure.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lz4_compress(
    input_ptr: *const c_uchar,
    input_len: size_t,
    out_len: *mut u64,
) -> *mut c_uchar {
    run("lz4_compress", || compress_input(input_ptr, input_len), out_len, api::compress)
}

// ─────────────────────────────────────────────────────────────────────────────
// lz4_compress_level
//
// unsigned char* lz4_compress_level(const unsigned char* input_ptr,
//                                   size_t input_len, int level,
//                                   uint64_t* out_len);
//
// As lz4_compress; `level` is clamped to 1..=9.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lz4_compress_level(
    input_ptr: *const c_uchar,
    input_len: size_t,
    level: c_int,
    out_len: *mut u64,
) -> *mut c_uchar {
    run("lz4_compress_level", || compress_input(input_ptr, input_len), out_len, |src| {
        api::compress_level(src, level)
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// lz4_decompress
//
// unsigned char* lz4_decompress(const unsigned char* input_ptr, size_t input_len,
//                               uint64_t* out_len);
//
// Original bytes of a frame produced by lz4_compress*, or NULL on failure.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lz4_decompress(
    input_ptr: *const c_uchar,
    input_len: size_t,
    out_len: *mut u64,
) -> *mut c_uchar {
    run("lz4_decompress", || input_slice(input_ptr, input_len), out_len, api::decompress)
}

// ─────────────────────────────────────────────────────────────────────────────
// lz4_free
//
// void lz4_free(void* ptr);
//
// NULL is ignored.  A pointer the engine does not own sets
// ERROR_invalid_handle (tracking builds only) and is left alone.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lz4_free(ptr: *mut c_void) {
    match buffer::release(ptr.cast()) {
        Ok(()) => set_last_error(0),
        Err(e) => {
            set_last_error(e.code());
            displaylevel!(4, "lz4_free({:p}): {} ({}) \n", ptr, e, e.error_name());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ─────────────────────────────────────────────────────────────────────────────

/// Error code of the last `lz4_*` call on this thread (0 = success).
#[no_mangle]
pub extern "C" fn lz4_last_error() -> c_int {
    LAST_ERROR.with(|e| e.get())
}

/// NUL-terminated description of an error code.  Never NULL.
#[no_mangle]
pub extern "C" fn lz4_error_string(code: c_int) -> *const c_char {
    match CodecError::from_code(code) {
        Some(e) => e.c_description().as_ptr(),
        None if code == 0 => b"no error\0".as_ptr().cast(),
        None => b"unknown error code\0".as_ptr().cast(),
    }
}

/// NUL-terminated crate version.
#[no_mangle]
pub extern "C" fn lz4_version_string() -> *const c_char {
    crate::VERSION_CSTR.as_ptr().cast()
}

/// Worst-case size of an `lz4_compress*` result for `input_len` bytes, or 0
/// when the input is too large to compress.
#[no_mangle]
pub extern "C" fn lz4_compress_bound(input_len: size_t) -> size_t {
    frame_bound(input_len)
}
