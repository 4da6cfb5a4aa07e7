//! The interactive shell: a line-based REPL over one `ChunkManager`.

use std::io::{self, BufRead, Write};

use heap::{release_nth_allocated, ChunkManager, Inspector};

use crate::format;

const PROMPT: &str = "> ";

pub fn run(mut manager: ChunkManager) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => continue,
            ["audit"] => format::print_audit(&manager),
            ["walk", "free"] => format::print_free(&manager),
            ["walk", "allocated"] => format::print_allocated(&manager),
            ["malloc"] => malloc(&mut manager)?,
            ["free"] => free(&mut manager)?,
            ["help"] => print_help(),
            ["quit"] => break,
            _ => println!("unrecognized command (try 'help')"),
        }
    }

    Ok(())
}

fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn malloc(manager: &mut ChunkManager) -> anyhow::Result<()> {
    let line = prompt_line("size: ")?;
    match line.parse::<usize>() {
        Ok(size) => {
            let base = Inspector::new(manager).base().as_ptr() as usize;
            match manager.alloc(size) {
                Ok(p) => println!("allocated at offset {}", p.as_ptr() as usize - base),
                Err(err) => format::print_alloc_error(err),
            }
        }
        Err(_) => println!("not a valid non-negative integer"),
    }
    Ok(())
}

fn free(manager: &mut ChunkManager) -> anyhow::Result<()> {
    let line = prompt_line("index: ")?;
    match line.parse::<isize>() {
        Ok(k) => {
            if let Err(err) = release_nth_allocated(manager, k) {
                format::print_release_error(err);
            }
        }
        Err(_) => println!("not a valid integer"),
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  audit           full diagrammatic walk of the heap");
    println!("  walk free       list free chunks");
    println!("  walk allocated  list allocated chunks");
    println!("  malloc          prompt for a size, then allocate");
    println!("  free            prompt for a 1-based allocation index, then release it");
    println!("  help            print this list");
    println!("  quit            terminate the shell");
}
