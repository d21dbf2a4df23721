//! Engine-owned output buffers.
//!
//! Results cross the C boundary as a `(pointer, length)` pair allocated with
//! the C allocator, so a foreign caller may hand them back to `lz4_free` (or
//! to `free()` when handle tracking is off).  On the Rust side the same
//! memory is an [`EngineBuffer`]: a single-owner handle that frees itself on
//! drop until [`EngineBuffer::into_raw_parts`] gives ownership away.
//!
//! With handle tracking on (debug builds, or the `handle-tracking` feature)
//! every live allocation is recorded in a process-wide registry.  Released
//! blocks are parked in a FIFO quarantine of [`HANDLE_QUARANTINE`] entries
//! before reaching `free`, so their addresses cannot be handed out again
//! while a stale pointer to them may still be released a second time.
//! Releasing a pointer the registry does not know yields
//! [`CodecError::InvalidHandle`] and frees nothing.
//!
//! Detection only covers the last [`HANDLE_QUARANTINE`] releases.  Once an
//! address leaves the quarantine, `malloc` may reuse it; a stale release of
//! that address then frees the new live buffer and is not reported.

use std::collections::{HashSet, VecDeque};
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::config::{HANDLE_QUARANTINE, HANDLE_TRACKING};
use crate::displaylevel;
use crate::error::CodecError;

// ─────────────────────────────────────────────────────────────────────────────
// Handle registry
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Registry {
    live: HashSet<usize>,
    quarantine: VecDeque<usize>,
}

static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();

fn registry() -> MutexGuard<'static, Registry> {
    REGISTRY
        .get_or_init(|| Mutex::new(Registry::default()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn track(ptr: *mut u8) {
    if HANDLE_TRACKING {
        registry().live.insert(ptr as usize);
    }
}

/// Return `ptr` to the C allocator, through the quarantine when tracking.
///
/// # Safety
/// `ptr` must be non-null and, when tracking is off, must come from
/// `libc::malloc` and not have been freed.
unsafe fn retire(ptr: *mut u8) -> Result<(), CodecError> {
    if !HANDLE_TRACKING {
        libc::free(ptr.cast());
        return Ok(());
    }

    let evicted = {
        let mut reg = registry();
        if !reg.live.remove(&(ptr as usize)) {
            return Err(CodecError::InvalidHandle);
        }
        reg.quarantine.push_back(ptr as usize);
        if reg.quarantine.len() > HANDLE_QUARANTINE {
            reg.quarantine.pop_front()
        } else {
            None
        }
    };
    if let Some(addr) = evicted {
        libc::free(addr as *mut libc::c_void);
    }
    Ok(())
}

/// Number of engine buffers currently owned by anyone (0 when tracking is
/// off).
pub fn live_handle_count() -> usize {
    if HANDLE_TRACKING {
        registry().live.len()
    } else {
        0
    }
}

/// Whether `ptr` is a live engine buffer.  Always `false` when tracking is
/// off.
pub fn is_live_handle(ptr: *const u8) -> bool {
    HANDLE_TRACKING && registry().live.contains(&(ptr as usize))
}

// ─────────────────────────────────────────────────────────────────────────────
// EngineBuffer
// ─────────────────────────────────────────────────────────────────────────────

/// Non-empty, `malloc`-backed byte buffer owned by the engine until handed
/// out.
pub struct EngineBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

// The buffer is uniquely owned heap memory with no interior mutability.
unsafe impl Send for EngineBuffer {}
unsafe impl Sync for EngineBuffer {}

impl EngineBuffer {
    /// Allocate a buffer holding a copy of `data`.
    ///
    /// Zero-length results are not representable across the boundary, so
    /// empty `data` is [`CodecError::EmptyInput`].
    pub fn copy_from_slice(data: &[u8]) -> Result<Self, CodecError> {
        if data.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        // SAFETY: non-zero size; the result is checked for null below.
        let raw = unsafe { libc::malloc(data.len()) } as *mut u8;
        let ptr = NonNull::new(raw).ok_or(CodecError::OutOfMemory)?;
        // SAFETY: `ptr` is a fresh allocation of `data.len()` bytes.
        unsafe { ptr::copy_nonoverlapping(data.as_ptr(), ptr.as_ptr(), data.len()) };
        track(ptr.as_ptr());
        Ok(Self { ptr, len: data.len() })
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `len` initialized bytes while `self` lives.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Copy the contents into a `Vec`, leaving the buffer owned.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Give up ownership.  The pointer must eventually be passed to
    /// [`release`] (or [`EngineBuffer::from_raw_parts`]) exactly once.
    pub fn into_raw_parts(self) -> (*mut u8, usize) {
        let me = ManuallyDrop::new(self);
        (me.ptr.as_ptr(), me.len)
    }

    /// Take ownership back from a pair produced by
    /// [`into_raw_parts`](Self::into_raw_parts).  Returns `None` for null.
    ///
    /// # Safety
    /// `ptr` and `len` must come from `into_raw_parts` and must not have been
    /// released or reclaimed since.
    pub unsafe fn from_raw_parts(ptr: *mut u8, len: usize) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, len })
    }
}

impl AsRef<[u8]> for EngineBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::fmt::Debug for EngineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

impl Drop for EngineBuffer {
    fn drop(&mut self) {
        // SAFETY: `self` owns the allocation.
        if let Err(e) = unsafe { retire(self.ptr.as_ptr()) } {
            displaylevel!(4, "EngineBuffer drop {:p}: {} \n", self.ptr, e);
        }
    }
}

/// Release a pointer previously returned across the boundary.
///
/// Null is a no-op.  With tracking on, an unknown or already released
/// pointer yields [`CodecError::InvalidHandle`] and nothing is freed.  A
/// repeated release is only caught while the address is among the last
/// [`HANDLE_QUARANTINE`] releases; after that it may belong to a new buffer,
/// which this call would then free.
///
/// # Safety
/// With tracking off, `ptr` must be null or a live pointer obtained from
/// [`EngineBuffer::into_raw_parts`]; anything else is undefined behavior.
pub unsafe fn release(ptr: *mut u8) -> Result<(), CodecError> {
    if ptr.is_null() {
        return Ok(());
    }
    retire(ptr)
}
