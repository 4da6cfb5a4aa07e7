use std::ptr::NonNull;

use heap::{ChunkManager, Region};

/// Builds a `ChunkManager` over a heap-allocated (not mmap'd) buffer of
/// `size` bytes, so these tests can run thousands of cases without a
/// live OS mapping per case. The buffer is deliberately leaked: it lives
/// for the process's duration, same as the real `mmap`-backed region
/// would: released only at process termination.
pub fn manager(size: usize) -> ChunkManager {
    let layout = std::alloc::Layout::from_size_align(size, heap::ALIGN_TO).unwrap();
    let base = unsafe { std::alloc::alloc(layout) };
    let base = NonNull::new(base).expect("allocation for test heap failed");
    let region = unsafe { Region::from_raw_parts(base, size) };
    ChunkManager::new(region)
}

pub const HEAP_SIZE: usize = 4096;
pub const CHUNK_SIZE: usize = HEAP_SIZE / 20;
