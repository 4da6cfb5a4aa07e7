use std::fmt;

/// Failure acquiring the backing buffer.
#[derive(Debug)]
pub enum RegionError {
    /// The underlying `mmap`/`VirtualAlloc` call failed.
    Reservation(std::io::Error),
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::Reservation(err) => write!(f, "failed to reserve backing region: {err}"),
        }
    }
}

impl std::error::Error for RegionError {}

/// A recoverable rejection at the allocator boundary.
///
/// `release` has no equivalent recoverable path: a bad magic word there is
/// corruption, not a caller error, and is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The free list is empty; there is nothing to allocate from.
    NoFreeChunks,
    /// The request exceeds the size of the region (this also catches a
    /// negative size that wrapped to a huge unsigned value).
    SizeExceedsHeap,
    /// A request of exactly zero bytes is refused.
    ZeroSize,
    /// The free list is non-empty, but no chunk is large enough.
    NoChunkBigEnough,
}

impl AllocError {
    /// A short diagnostic line. The shell prints this; the library itself
    /// never writes to stdout.
    pub fn diagnostic(self) -> &'static str {
        match self {
            AllocError::NoFreeChunks => "no free chunks",
            AllocError::SizeExceedsHeap => "request exceeds heap",
            AllocError::ZeroSize => "refusing size 0",
            AllocError::NoChunkBigEnough => "no chunk big enough",
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diagnostic())
    }
}

impl std::error::Error for AllocError {}
