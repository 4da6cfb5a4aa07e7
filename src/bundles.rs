//! The numbered test bundles, selected by the CLI's single positional
//! argument. Each bundle builds a fresh heap, drives it through one
//! concrete scenario, and prints a PASS/FAIL line rather than panicking,
//! mirroring the original driver's "run one bundle, report, move on"
//! shape rather than the crate's own panic-on-violation test suite.

use anyhow::Result;

use heap::{AllocError, ChunkManager, ChunkReport, Inspector, Region, HEAP_SIZE};

const CHUNK_SIZE: usize = HEAP_SIZE / 20;

struct Bundle {
    number: u32,
    name: &'static str,
    run: fn() -> bool,
}

const BUNDLES: &[Bundle] = &[
    Bundle { number: 1, name: "single alloc/free restores initial state", run: bundle_1 },
    Bundle { number: 2, name: "coalesce-all", run: bundle_2 },
    Bundle { number: 3, name: "two-group coalesce", run: bundle_3 },
    Bundle { number: 4, name: "worst-fit preference", run: bundle_4 },
    Bundle { number: 5, name: "bad-size rejection", run: bundle_5 },
    Bundle { number: 6, name: "exhaustion", run: bundle_6 },
    Bundle { number: 7, name: "address-sorted reinsertion", run: bundle_7 },
];

pub fn run(n: u32) -> Result<()> {
    let selected: Vec<&Bundle> =
        if n == 0 { BUNDLES.iter().collect() } else { BUNDLES.iter().filter(|b| b.number == n).collect() };

    let mut failures = 0;
    for bundle in selected {
        let passed = (bundle.run)();
        println!("[{}] bundle {}: {}", if passed { "PASS" } else { "FAIL" }, bundle.number, bundle.name);
        if !passed {
            failures += 1;
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn fresh_manager() -> ChunkManager {
    let region = Region::new(HEAP_SIZE).expect("failed to acquire the backing region");
    ChunkManager::new(region)
}

fn free_count(m: &ChunkManager) -> usize {
    Inspector::new(m).walk_free().len()
}

fn bundle_1() -> bool {
    let mut m = fresh_manager();
    let p = match m.alloc(CHUNK_SIZE) {
        Ok(p) => p,
        Err(_) => return false,
    };
    m.release(p);
    free_count(&m) == 1
}

fn bundle_2() -> bool {
    let mut m = fresh_manager();
    let ptrs: Vec<_> = (0..5).filter_map(|_| m.alloc(CHUNK_SIZE).ok()).collect();
    if ptrs.len() != 5 {
        return false;
    }
    for p in ptrs {
        m.release(p);
    }
    free_count(&m) == 1
}

fn bundle_3() -> bool {
    let mut m = fresh_manager();
    let ptrs: Vec<_> = (0..5).filter_map(|_| m.alloc(CHUNK_SIZE).ok()).collect();
    if ptrs.len() != 5 {
        return false;
    }
    m.release(ptrs[0]);
    m.release(ptrs[1]);
    m.release(ptrs[3]);
    m.release(ptrs[4]);
    free_count(&m) == 2
}

fn bundle_4() -> bool {
    let mut m = fresh_manager();
    let p1 = match m.alloc(CHUNK_SIZE) {
        Ok(p) => p,
        Err(_) => return false,
    };
    let p2 = match m.alloc(CHUNK_SIZE) {
        Ok(p) => p,
        Err(_) => return false,
    };
    m.release(p1);

    let p3 = match m.alloc(CHUNK_SIZE / 2) {
        Ok(p) => p,
        Err(_) => return false,
    };
    p3.as_ptr() > p2.as_ptr()
}

fn bundle_5() -> bool {
    let mut m = fresh_manager();
    let before = free_count(&m);

    let r1 = m.alloc(2 * HEAP_SIZE);
    let r2 = m.alloc(0);
    let r3 = m.alloc(usize::MAX);

    r1 == Err(AllocError::SizeExceedsHeap)
        && r2 == Err(AllocError::ZeroSize)
        && r3 == Err(AllocError::SizeExceedsHeap)
        && free_count(&m) == before
}

fn bundle_6() -> bool {
    let mut m = fresh_manager();
    let half = HEAP_SIZE / 2 - CHUNK_SIZE / 2;

    let p1 = match m.alloc(half) {
        Ok(p) => p,
        Err(_) => return false,
    };
    let p2 = match m.alloc(half) {
        Ok(p) => p,
        Err(_) => return false,
    };
    if p1 == p2 {
        return false;
    }

    m.alloc(CHUNK_SIZE) == Err(AllocError::NoChunkBigEnough)
}

fn bundle_7() -> bool {
    let mut m = fresh_manager();
    let ptrs: Vec<_> = (0..10).filter_map(|_| m.alloc(CHUNK_SIZE).ok()).collect();
    if ptrs.len() != 10 {
        return false;
    }

    for &i in &[4, 6, 2, 0, 8] {
        m.release(ptrs[i]);

        let free = Inspector::new(&m).walk_free();
        let addrs: Vec<_> = free
            .iter()
            .map(|c| match c {
                ChunkReport::Free { address, .. } => address.as_ptr() as usize,
                _ => unreachable!(),
            })
            .collect();
        let mut sorted = addrs.clone();
        sorted.sort();
        if addrs != sorted {
            return false;
        }
    }
    true
}
