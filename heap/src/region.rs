//! The backing buffer.
//!
//! A [`Region`] is acquired once and never resized or released explicitly by
//! the running program — but it does release its mapping on `Drop`, so
//! that tests which construct many regions in a process don't leak address
//! space, and repeatedly reinitializing is safe to do in a loop.

use crate::error::RegionError;

/// Default heap size: a compile-time constant.
pub const HEAP_SIZE: usize = 4096;
/// Word alignment the region (and every chunk within it) respects.
pub const ALIGN_TO: usize = 8;

/// Owns a fixed-size, word-aligned, anonymous private mapping.
///
/// `Region` exposes only its base address and size; it does not know
/// anything about chunks, headers, or free lists — that's `ChunkManager`'s
/// job, operating on the raw bytes this struct hands out.
pub struct Region {
    base: std::ptr::NonNull<u8>,
    size: usize,
    owned: bool,
}

// The mapping is exclusively owned by whichever `ChunkManager` holds this
// `Region`; there is no aliasing, so it's fine to move across threads even
// though nothing in this crate is thread-safe in use.
unsafe impl Send for Region {}

impl Region {
    /// Acquires a `size`-byte anonymous, private, read-write mapping from
    /// the operating system. `size` is rounded up to the platform page size
    /// by the OS call itself; callers that need an exact `HEAP_SIZE` should
    /// pick a `HEAP_SIZE` that is already page-aligned, as the default is.
    #[cfg(feature = "system-backed")]
    pub fn new(size: usize) -> Result<Self, RegionError> {
        let base = sys::reserve(size).map_err(RegionError::Reservation)?;
        Ok(Self { base, size, owned: true })
    }

    /// Wraps a caller-provided buffer instead of asking the OS for one.
    ///
    /// Used by the property tests (see `heap/tests/invariants.rs`) to run
    /// thousands of randomized cases without a live mapping per case, and
    /// available regardless of the `system-backed` feature.
    ///
    /// # Safety
    /// `base` must be valid for reads and writes for `size` bytes, aligned
    /// to [`ALIGN_TO`], and not aliased for the lifetime of the returned
    /// `Region`.
    pub unsafe fn from_raw_parts(base: std::ptr::NonNull<u8>, size: usize) -> Self {
        debug_assert_eq!(base.as_ptr() as usize % ALIGN_TO, 0, "region base must be word-aligned");
        Self { base, size, owned: false }
    }

    /// The region's base address.
    #[inline]
    pub fn base(&self) -> std::ptr::NonNull<u8> {
        self.base
    }

    /// The region's total size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        if self.owned {
            #[cfg(feature = "system-backed")]
            unsafe {
                sys::release(self.base, self.size);
            }
        }
    }
}

#[cfg(feature = "system-backed")]
mod sys {
    use std::ptr::NonNull;

    #[cfg(unix)]
    pub(super) fn reserve(size: usize) -> std::io::Result<NonNull<u8>> {
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_ANONYMOUS | libc::MAP_PRIVATE,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(std::io::Error::last_os_error());
        }

        // SAFETY: mmap succeeded, so `ptr` is a valid non-null mapping.
        Ok(unsafe { NonNull::new_unchecked(ptr.cast()) })
    }

    #[cfg(unix)]
    pub(super) unsafe fn release(base: NonNull<u8>, size: usize) {
        unsafe {
            libc::munmap(base.as_ptr().cast(), size);
        }
    }

    #[cfg(windows)]
    pub(super) fn reserve(size: usize) -> std::io::Result<NonNull<u8>> {
        use windows_sys::Win32::System::Memory::{
            VirtualAlloc, MEM_COMMIT, MEM_RESERVE, PAGE_READWRITE,
        };

        let ptr = unsafe {
            VirtualAlloc(std::ptr::null(), size, MEM_COMMIT | MEM_RESERVE, PAGE_READWRITE)
        };

        NonNull::new(ptr.cast()).ok_or_else(std::io::Error::last_os_error)
    }

    #[cfg(windows)]
    pub(super) unsafe fn release(base: NonNull<u8>, _size: usize) {
        use windows_sys::Win32::System::Memory::{VirtualFree, MEM_RELEASE};

        unsafe {
            VirtualFree(base.as_ptr().cast(), 0, MEM_RELEASE);
        }
    }
}
