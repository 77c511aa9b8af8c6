#![no_std]

#![deny(missing_docs)]

//! Building blocks for a block-recycling memory arena.
//!
//! llarena-core is the ownership-and-recycling engine sitting at the heart of an arena allocator. It contains:
//! -   A block-source trait, used to obtain coarse raw blocks of memory from the system heap, memory-mapped
//!     pages, or any other provider.
//! -   A move-only `MemoryArena` which hands blocks out in LIFO order, and parks released blocks for instant
//!     reuse instead of returning them to the source.
//!
//! The arena is a single-threaded primitive: thread-safe allocators are built by composing synchronization
//! around it, not inside it.

mod api;
mod internals;
mod utils;

pub use api::*;
