//! A single-region `malloc`/`free` core.
//!
//! [`Region`] owns one fixed-size backing buffer. [`ChunkManager`] carves it
//! into an alternating sequence of allocated and free chunks, using a
//! worst-fit selection policy and an address-sorted, coalescing free list
//! threaded through the buffer itself. [`Inspector`] walks that layout
//! read-only to produce reports and to translate an allocation index into
//! an address for the shell's `free` command.
//!
//! This crate does no I/O: callers get back `Option`/`Result` values and a
//! handful of small enums, never printed text. The binary crate built on
//! top of this one owns all of the user-facing formatting.

#![forbid(unsafe_op_in_unsafe_fn)]

mod chunk;
mod error;
mod inspector;
mod region;

pub use chunk::align::footprint;
pub use chunk::{ChunkManager, MAGIC_NUMBER};
pub use error::{AllocError, RegionError};
pub use inspector::{release_nth_allocated, ChunkReport, Inspector, ReleaseIndexError};
pub use region::{Region, ALIGN_TO, HEAP_SIZE};
