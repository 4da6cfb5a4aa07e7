//! Property tests for the allocator's structural invariants, driven by
//! randomized alloc/release sequences: sorted free list, no adjacent free
//! chunks, dense allocated indices, and full byte accounting. Modeled on a
//! fuzz target that drives an allocator through arbitrary operation
//! sequences and checks structural invariants after each one — here using
//! `fastrand` (already pulled in for randomized action generation
//! elsewhere in this workspace) rather than `arbitrary`+`libfuzzer-sys`,
//! since this crate isn't wired up for coverage-guided fuzzing.

mod common;

use std::ptr::NonNull;

use heap::{ChunkManager, ChunkReport, Inspector};

use common::{manager, HEAP_SIZE};

/// `Header`/`Node` are both exactly `footprint(0)` bytes (private to
/// `heap::chunk::raw`, but `footprint(0)` recovers the value publicly:
/// zero payload rounded up from `HEADER_SIZE` alone, and `HEADER_SIZE` is
/// already a multiple of `ALIGN_TO`).
fn metadata_size() -> usize {
    heap::footprint(0)
}

fn assert_invariants(m: &ChunkManager) {
    let inspector = Inspector::new(m);
    let base = inspector.base().as_ptr() as usize;
    let report = inspector.audit();

    let mut last_free_addr: Option<usize> = None;
    let mut free_total = 0usize;
    let mut alloc_total = 0usize;
    let mut free_count = 0usize;
    let mut seen_indices = Vec::new();

    for chunk in &report {
        match *chunk {
            ChunkReport::Free { address, capacity, next } => {
                let addr = address.as_ptr() as usize;

                if let Some(last) = last_free_addr {
                    assert!(addr > last, "free chunks must be address-ascending");
                }
                last_free_addr = Some(addr);

                if let Some(next) = next {
                    let next_addr = next.as_ptr() as usize;
                    assert!(
                        addr + metadata_size() + capacity < next_addr,
                        "adjacent free chunks must have been coalesced"
                    );
                }

                free_total += capacity;
                free_count += 1;
            }
            ChunkReport::Allocated { index, address, payload_size } => {
                assert_eq!(
                    (address.as_ptr() as usize - base) % heap::ALIGN_TO,
                    0,
                    "allocated payload addresses must be word-aligned"
                );
                seen_indices.push(index);
                alloc_total += payload_size;
            }
        }
    }

    // Magic is implicitly checked by `Inspector::audit` panicking on
    // mismatch; allocated indices must be strictly ascending starting at 1.
    for (i, &idx) in seen_indices.iter().enumerate() {
        assert_eq!(idx, i + 1, "allocated chunk indices must be dense and ascending");
    }

    // Monotone accounting: every byte of the region is in exactly one
    // chunk, metadata included.
    let accounted = free_total + alloc_total + (free_count + seen_indices.len()) * metadata_size();
    assert_eq!(accounted, HEAP_SIZE, "every byte of the region must be accounted for");
}

#[test]
fn randomized_alloc_release_preserves_invariants() {
    fastrand::seed(0xC0FFEE);

    for _ in 0..200 {
        let mut m = manager(HEAP_SIZE);
        let mut live: Vec<NonNull<u8>> = Vec::new();

        for _ in 0..300 {
            assert_invariants(&m);

            if live.is_empty() || fastrand::bool() {
                let size = fastrand::usize(1..=HEAP_SIZE / 4);
                if let Ok(p) = m.alloc(size) {
                    live.push(p);
                }
            } else {
                let i = fastrand::usize(0..live.len());
                let p = live.swap_remove(i);
                m.release(p);
            }
        }

        while let Some(p) = live.pop() {
            m.release(p);
        }

        assert_invariants(&m);
        assert_eq!(Inspector::new(&m).walk_free().len(), 1, "everything released should fully coalesce");
    }
}

#[test]
fn coalescing_is_idempotent() {
    // Releasing leaves the heap in a state where an additional pass over
    // the same data finds nothing new to merge: the walk below would panic
    // on a structural violation if an extra coalescing pass would have
    // changed anything (adjacent free chunks, unsorted nodes).
    fastrand::seed(7);
    let mut m = manager(HEAP_SIZE);
    let ptrs: Vec<_> = (0..12).map(|_| m.alloc(64).unwrap()).collect();

    let mut order: Vec<usize> = (0..ptrs.len()).collect();
    fastrand::shuffle(&mut order);
    for i in order {
        m.release(ptrs[i]);
        assert_invariants(&m);
    }

    // A second `audit` call is a read-only re-walk: running it twice must
    // produce the same report.
    let first = Inspector::new(&m).audit();
    let second = Inspector::new(&m).audit();
    assert_eq!(first.len(), second.len());
}
