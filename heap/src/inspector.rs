//! Read-only traversal of the region using the chunk manager's layout
//! invariants.
//!
//! `Inspector` never mutates the region itself; it only reads headers and
//! nodes to report on them. The one derived operation that does mutate
//! (`release_nth_allocated`) takes `&mut ChunkManager` directly rather than
//! going through an `Inspector` value, since Rust's borrow checker won't
//! let an immutable walk hand out a mutation through itself.

use std::fmt;
use std::ptr::NonNull;

use crate::chunk::raw::{self, addr_of, offset, HEADER_SIZE, NODE_SIZE};
use crate::chunk::{ChunkManager, MAGIC_NUMBER};

/// One chunk encountered during a walk, in address order.
#[derive(Debug, Clone, Copy)]
pub enum ChunkReport {
    /// An allocated chunk. `index` is the 1-based position among
    /// allocated chunks only, in address order.
    Allocated { index: usize, address: NonNull<u8>, payload_size: usize },
    /// A free chunk, as it sits in the free list.
    Free { address: NonNull<u8>, capacity: usize, next: Option<NonNull<u8>> },
}

/// A read-only view over a [`ChunkManager`].
pub struct Inspector<'a> {
    manager: &'a ChunkManager,
}

impl<'a> Inspector<'a> {
    pub fn new(manager: &'a ChunkManager) -> Self {
        Self { manager }
    }

    /// The region's base address, for callers that want to print
    /// offset-relative addresses rather than raw pointers.
    pub fn base(&self) -> NonNull<u8> {
        self.manager.base()
    }

    /// Walks the whole region, maintaining two cursors: `a`, the address
    /// cursor, and `f`, the next-expected-free node cursor starting at the
    /// free-list head.
    ///
    /// # Panics
    /// If the walk overshoots the region's end, or an allocated chunk's
    /// magic word is wrong: both are corruption and fatal.
    pub fn audit(&self) -> Vec<ChunkReport> {
        let base = self.manager.base();
        let end_addr = addr_of(base) + self.manager.size();

        let mut reports = Vec::new();
        let mut a = base;
        let mut f = self.manager.free_head();
        let mut alloc_index = 0usize;

        while addr_of(a) != end_addr {
            let is_free = f.is_some_and(|f_addr| addr_of(f_addr) == addr_of(a));

            if is_free {
                let f_addr = f.expect("checked above");
                // SAFETY: `f_addr` is reachable from the free-list head,
                // which the chunk manager maintains as always valid.
                let node = unsafe { raw::read_node(f_addr) };
                reports.push(ChunkReport::Free { address: a, capacity: node.capacity, next: node.next });
                a = offset(a, NODE_SIZE + node.capacity);
                f = node.next;
            } else {
                // SAFETY: `a` not being the expected free cursor means
                // this chunk is allocated, so it starts with a `Header`.
                let header = unsafe { raw::read_header(a) };
                assert_eq!(
                    header.magic, MAGIC_NUMBER,
                    "heap corrupted: bad magic at allocated chunk {a:p}"
                );
                alloc_index += 1;
                reports.push(ChunkReport::Allocated {
                    index: alloc_index,
                    address: offset(a, HEADER_SIZE),
                    payload_size: header.payload_size,
                });
                a = offset(a, HEADER_SIZE + header.payload_size);
            }

            assert!(
                addr_of(a) <= end_addr,
                "heap corrupted: walk overshot the region end (at {a:p}, end at 0x{end_addr:x})"
            );
        }

        reports
    }

    /// Free chunks only, in address order.
    pub fn walk_free(&self) -> Vec<ChunkReport> {
        self.audit().into_iter().filter(|c| matches!(c, ChunkReport::Free { .. })).collect()
    }

    /// Allocated chunks only, in address order (and therefore in
    /// ascending `index` order too).
    pub fn walk_allocated(&self) -> Vec<ChunkReport> {
        self.audit().into_iter().filter(|c| matches!(c, ChunkReport::Allocated { .. })).collect()
    }
}

/// `release_nth_allocated` rejected `k` without touching the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseIndexError {
    /// `k < 1`; allocation indices are 1-based.
    BelowRange,
    /// `k` exceeds the number of currently allocated chunks.
    AboveRange,
}

impl fmt::Display for ReleaseIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseIndexError::BelowRange => write!(f, "allocation index must be at least 1"),
            ReleaseIndexError::AboveRange => write!(f, "no allocated chunk with that index"),
        }
    }
}

/// During the walk, on encountering the `k`-th allocated chunk (1-indexed),
/// releases its payload address.
pub fn release_nth_allocated(
    manager: &mut ChunkManager,
    k: isize,
) -> Result<(), ReleaseIndexError> {
    if k < 1 {
        return Err(ReleaseIndexError::BelowRange);
    }
    let k = k as usize;

    let target = Inspector::new(manager)
        .walk_allocated()
        .into_iter()
        .find_map(|c| match c {
            ChunkReport::Allocated { index, address, .. } if index == k => Some(address),
            _ => None,
        })
        .ok_or(ReleaseIndexError::AboveRange)?;

    manager.release(target);
    Ok(())
}
