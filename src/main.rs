//! CLI entry point.
//!
//! With no argument, starts the interactive shell. With a single decimal
//! integer `0..=7`, runs the correspondingly numbered test bundle (`0` runs
//! all of them). Any other argument prints the usage listing.

mod bundles;
mod format;
mod shell;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            let region = heap::Region::new(heap::HEAP_SIZE)
                .context("failed to acquire the backing region from the OS")?;
            let manager = heap::ChunkManager::new(region);
            shell::run(manager)
        }
        [arg] => match arg.parse::<u32>() {
            Ok(n @ 0..=7) => bundles::run(n),
            _ => {
                print_usage();
                std::process::exit(1);
            }
        },
        _ => {
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("usage: miniheap [0-7]");
    println!();
    println!("  (no argument)  start the interactive shell");
    println!("  0              run every test bundle");
    println!("  1-7            run the single numbered test bundle");
}
