//! BlockAllocator
//!
//! The BlockAllocator trait abstracts the source from which an arena obtains its memory blocks. The source
//! decides block sizes and performs the actual system-level work; the arena only manages ownership and reuse,
//! so the same arena can be grown from the system heap, memory-mapped pages, or a fixed pre-carved buffer.

use crate::internals::BlockStack;
use crate::utils::MAX_ALIGNMENT;

use super::MemoryBlock;

/// Number of bytes at the front of every block reserved for the arena's embedded bookkeeping.
///
/// The usable part of a block is its allocated size minus this overhead; sources must return blocks strictly
/// larger than it.
pub const BLOCK_OVERHEAD: usize = BlockStack::OVERHEAD;

/// Minimum alignment of the addresses a block source returns.
///
/// `BLOCK_OVERHEAD` is a multiple of this value, so the usable part of a block is aligned at least as strictly
/// as the block itself.
pub const BLOCK_ALIGNMENT: usize = MAX_ALIGNMENT.value();

/// Abstraction of a source of memory blocks.
///
/// #   Safety
///
/// Implementations guarantee that a block returned by a successful `allocate_block`:
///
/// -   Describes a live range of memory, exclusively owned by the caller until passed to `deallocate_block`.
/// -   Is strictly larger than `BLOCK_OVERHEAD` bytes.
/// -   Starts at an address aligned to at least `BLOCK_ALIGNMENT` bytes.
pub unsafe trait BlockAllocator {
    /// The error returned when no block can be supplied.
    type Error;

    /// Allocates a fresh block of memory.
    ///
    /// #   Errors
    ///
    /// If the source cannot supply a block; the error is the caller's to handle, the source performs no retry
    /// of its own.
    fn allocate_block(&mut self) -> Result<MemoryBlock, Self::Error>;

    /// Deallocates the supplied block of memory.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `block` was returned by `allocate_block` on this very instance, address and size
    ///     unchanged, and was not deallocated since.
    /// -   Assumes that the caller no longer references the range after the call.
    unsafe fn deallocate_block(&mut self, block: MemoryBlock);

    /// Returns the size of the next block `allocate_block` would return, in bytes.
    ///
    /// Purely informational, for diagnostics and pre-sizing; the source is not bound by it.
    fn next_block_size(&self) -> usize;
}
