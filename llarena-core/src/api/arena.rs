//! MemoryArena
//!
//! The arena presents a grow-and-recycle block source to a client: blocks are handed out in LIFO order, and a
//! released block is parked for instant reuse rather than returned to the underlying source. Memory only flows
//! back to the source on an explicit `shrink_to_fit`, or when the arena is dropped.

use crate::internals::BlockStack;

use super::{BlockAllocator, MemoryBlock};

/// MemoryArena.
///
/// The ownership-and-recycling engine over an injected block source. The arena exclusively owns every block it
/// ever obtained, split across two intrusive stacks:
///
/// -   The active stack: blocks currently handed out to the client, most recent on top.
/// -   The recycled stack: blocks the client released, retained for reuse.
///
/// Reuse always takes precedence over asking the source for fresh memory, so steady-state allocate/release
/// cycles are source-free. The arena is move-only: duplicating it would duplicate block ownership.
pub struct MemoryArena<A>
    where
        A: BlockAllocator,
{
    active: BlockStack,
    recycled: BlockStack,
    active_count: usize,
    recycled_count: usize,
    allocator: A,
}

impl<A> MemoryArena<A>
    where
        A: BlockAllocator,
{
    /// Creates an arena drawing from `allocator`.
    ///
    /// No block is obtained until the first call to `allocate_block`.
    pub fn new(allocator: A) -> Self {
        Self {
            active: BlockStack::default(),
            recycled: BlockStack::default(),
            active_count: 0,
            recycled_count: 0,
            allocator,
        }
    }

    /// Returns the total number of blocks owned by the arena, active and recycled alike.
    ///
    /// Only ever decreases through `shrink_to_fit` or destruction.
    pub fn capacity(&self) -> usize {
        debug_assert!((self.recycled_count == 0) == self.recycled.is_empty());

        self.active_count + self.recycled_count
    }

    /// Returns the number of blocks currently handed out to the client.
    pub fn size(&self) -> usize {
        debug_assert!((self.active_count == 0) == self.active.is_empty());

        self.active_count
    }

    /// Returns the size of the next block the source would supply, in bytes.
    ///
    /// Purely informational; does not mutate any state.
    pub fn next_block_size(&self) -> usize { self.allocator.next_block_size() }

    /// Returns a reference to the underlying block source.
    pub fn allocator(&self) -> &A { &self.allocator }

    /// Returns a mutable reference to the underlying block source.
    pub fn allocator_mut(&mut self) -> &mut A { &mut self.allocator }

    /// Returns the usable view of a block, growing the arena if no recycled block is available.
    ///
    /// A recycled block is always reused in preference to calling the source.
    ///
    /// #   Errors
    ///
    /// If the source cannot supply a block, its error is returned unmodified, and the arena is unchanged: no
    /// retry, no fallback, no partial registration.
    pub fn allocate_block(&mut self) -> Result<MemoryBlock, A::Error> {
        if self.capacity() == self.size() {
            let block = self.allocator.allocate_block()?;

            //  Safety:
            //  -   `block` is live, exclusively owned, sufficiently sized and aligned, as per the
            //      `BlockAllocator` contract.
            unsafe { self.active.push(block) };
        } else {
            self.active.steal_top(&mut self.recycled);
            self.recycled_count -= 1;
        }

        self.active_count += 1;

        //  The branch above left a block on top of the active stack, either way.
        Ok(self.active.top().expect("active head"))
    }

    /// Takes back the most recently allocated block, parking it for reuse.
    ///
    /// The block stays owned by the arena; only `shrink_to_fit` or destruction return it to the source.
    ///
    /// Calling this with no block handed out is a contract violation.
    pub fn deallocate_block(&mut self) {
        debug_assert!(self.active_count > 0);

        self.active_count -= 1;
        self.recycled_count += 1;

        self.recycled.steal_top(&mut self.active);
    }

    /// Returns every recycled block to the source, in the order the source originally supplied them.
    ///
    /// Blocks handed out to the client are unaffected.
    pub fn shrink_to_fit(&mut self) {
        //  The recycled stack holds the oldest block on top: fresh blocks are only obtained while it is empty,
        //  and each release parks a block older than all it already holds. Popping in place thus walks the
        //  blocks in the order the source supplied them.
        while let Some(block) = self.recycled.pop() {
            //  Safety:
            //  -   `block` came from `self.allocator`, address and size unchanged, and the arena no longer
            //      references it.
            unsafe { self.allocator.deallocate_block(block) };
        }

        self.recycled_count = 0;
    }
}

impl<A> Default for MemoryArena<A>
    where
        A: BlockAllocator + Default,
{
    fn default() -> Self { Self::new(A::default()) }
}

impl<A> Drop for MemoryArena<A>
    where
        A: BlockAllocator,
{
    fn drop(&mut self) {
        //  Active blocks are all older than recycled ones; stealing them one by one onto the recycled stack
        //  prepends progressively older blocks, leaving the merged list ordered oldest first. The source then
        //  takes every block back in the order it supplied them.
        while !self.active.is_empty() {
            self.recycled.steal_top(&mut self.active);
        }

        while let Some(block) = self.recycled.pop() {
            //  Safety:
            //  -   `block` came from `self.allocator`, address and size unchanged, and the arena no longer
            //      references it.
            unsafe { self.allocator.deallocate_block(block) };
        }
    }
}

// mod tests
