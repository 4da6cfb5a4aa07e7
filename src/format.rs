//! Text rendering for `ChunkReport` data. Everything in `heap` returns
//! structured values; this module is the only place that turns them into
//! printed lines, matching the original's `printf`-based heap walk.

use heap::{AllocError, ChunkReport, Inspector, ReleaseIndexError};

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

fn offset(base: usize, addr: usize) -> usize {
    addr - base
}

/// One bracketed entry per chunk, in address order: `[A #1 size=204]` for
/// allocated chunks, `[F size=3676 -> 612]` for free chunks (the arrow
/// target is the next free chunk's offset, or `end` at the list tail).
pub fn print_audit(manager: &heap::ChunkManager) {
    let inspector = Inspector::new(manager);
    let base = inspector.base().as_ptr() as usize;
    let report = inspector.audit();

    let mut line = String::new();
    for chunk in &report {
        match *chunk {
            ChunkReport::Allocated { index, address, payload_size } => {
                let off = offset(base, address.as_ptr() as usize);
                line.push_str(&format!("{GREEN}[A #{index} @{off} size={payload_size}]{RESET} "));
            }
            ChunkReport::Free { address, capacity, next } => {
                let off = offset(base, address.as_ptr() as usize);
                let target = match next {
                    Some(n) => offset(base, n.as_ptr() as usize).to_string(),
                    None => "end".to_string(),
                };
                line.push_str(&format!("{YELLOW}[F @{off} size={capacity} -> {target}]{RESET} "));
            }
        }
    }

    if line.is_empty() {
        println!("(empty heap)");
    } else {
        println!("{}", line.trim_end());
    }
}

pub fn print_free(manager: &heap::ChunkManager) {
    let base = Inspector::new(manager).base().as_ptr() as usize;
    for chunk in Inspector::new(manager).walk_free() {
        if let ChunkReport::Free { address, capacity, next } = chunk {
            let off = offset(base, address.as_ptr() as usize);
            match next {
                Some(n) => println!("free @{off} size={capacity} -> {}", offset(base, n.as_ptr() as usize)),
                None => println!("free @{off} size={capacity} -> end"),
            }
        }
    }
}

pub fn print_allocated(manager: &heap::ChunkManager) {
    let base = Inspector::new(manager).base().as_ptr() as usize;
    for chunk in Inspector::new(manager).walk_allocated() {
        if let ChunkReport::Allocated { index, address, payload_size } = chunk {
            let off = offset(base, address.as_ptr() as usize);
            println!("#{index} @{off} size={payload_size}");
        }
    }
}

pub fn print_alloc_error(err: AllocError) {
    println!("{RED}malloc failed: {}{RESET}", err.diagnostic());
}

pub fn print_release_error(err: ReleaseIndexError) {
    println!("{RED}free failed: {err}{RESET}");
}
