//! A block source for tests: serves real heap memory, and records every interaction.

use std::{
    alloc::{self, Layout},
    cell::RefCell,
    mem,
    ptr::NonNull,
    rc::Rc,
};

use llarena_core::{BlockAllocator, MemoryBlock, OutOfMemory, BLOCK_ALIGNMENT, BLOCK_OVERHEAD};

/// TrackingAllocator.
///
/// A heap-backed block source recording the blocks it serves and takes back, in order. The records live behind
/// a shared `TrackingLog` handle, so a test can keep observing them while — and after — an arena owns the
/// source.
///
/// Releasing a block whose address and size do not exactly match a live one panics: a test reaching that point
/// has broken the ownership discipline.
pub struct TrackingAllocator {
    block_size: usize,
    limit: Option<usize>,
    log: Rc<RefCell<Records>>,
}

impl TrackingAllocator {
    /// Creates a source serving blocks of `block_size` bytes, with no limit on the number of live blocks.
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > BLOCK_OVERHEAD);

        Self { block_size, limit: None, log: Rc::default() }
    }

    /// Creates a source which fails whenever `limit` blocks are already live.
    pub fn with_limit(block_size: usize, limit: usize) -> Self {
        let mut result = Self::new(block_size);
        result.limit = Some(limit);
        result
    }

    /// Returns a handle on the interaction records.
    pub fn log(&self) -> TrackingLog { TrackingLog(self.log.clone()) }

    fn layout(&self) -> Layout {
        Layout::from_size_align(self.block_size, BLOCK_ALIGNMENT).expect("valid block layout")
    }
}

//  Safety:
//  -   Blocks are freshly heap-allocated: live until taken back, exclusively owned by the caller, strictly
//      larger than `BLOCK_OVERHEAD` (asserted on construction), and `BLOCK_ALIGNMENT`-aligned.
unsafe impl BlockAllocator for TrackingAllocator {
    type Error = OutOfMemory;

    fn allocate_block(&mut self) -> Result<MemoryBlock, OutOfMemory> {
        let mut log = self.log.borrow_mut();

        if log.fail_requests > 0 {
            log.fail_requests -= 1;
            return Err(OutOfMemory { requested: self.block_size });
        }

        if let Some(limit) = self.limit {
            if log.outstanding.len() >= limit {
                return Err(OutOfMemory { requested: self.block_size });
            }
        }

        //  Safety:
        //  -   The layout has a non-zero size, as asserted on construction.
        let memory = unsafe { alloc::alloc(self.layout()) };

        let memory = NonNull::new(memory).ok_or(OutOfMemory { requested: self.block_size })?;

        let block = MemoryBlock::new(memory, self.block_size);

        log.acquired.push(block);
        log.outstanding.push(block);

        Ok(block)
    }

    unsafe fn deallocate_block(&mut self, block: MemoryBlock) {
        let mut log = self.log.borrow_mut();

        let index = log
            .outstanding
            .iter()
            .position(|candidate| *candidate == block)
            .expect("released block matches a live block, address and size alike");

        log.outstanding.remove(index);
        log.released.push(block);

        //  Safety:
        //  -   `block` is a live allocation made with this layout, as per the check above.
        unsafe { alloc::dealloc(block.memory.as_ptr(), self.layout()) };
    }

    fn next_block_size(&self) -> usize { self.block_size }
}

impl Default for TrackingAllocator {
    fn default() -> Self { Self::new(1024) }
}

impl Drop for TrackingAllocator {
    //  An arena returns every block before dropping its source; blocks still live here were leaked by the test
    //  on purpose. Free them anyway, the records are what matters.
    fn drop(&mut self) {
        let outstanding = mem::take(&mut self.log.borrow_mut().outstanding);

        for block in outstanding {
            //  Safety:
            //  -   `block` is a live allocation made with this layout.
            unsafe { alloc::dealloc(block.memory.as_ptr(), self.layout()) };
        }
    }
}

/// TrackingLog.
///
/// A shared view on the records of a `TrackingAllocator`.
#[derive(Clone)]
pub struct TrackingLog(Rc<RefCell<Records>>);

impl TrackingLog {
    /// Returns the number of blocks ever served.
    pub fn allocations(&self) -> usize { self.0.borrow().acquired.len() }

    /// Returns the number of blocks currently live.
    pub fn live(&self) -> usize { self.0.borrow().outstanding.len() }

    /// Returns every block ever served, in order.
    pub fn acquired(&self) -> Vec<MemoryBlock> { self.0.borrow().acquired.clone() }

    /// Returns every block taken back, in order.
    pub fn released(&self) -> Vec<MemoryBlock> { self.0.borrow().released.clone() }

    /// Makes the next `requests` allocation requests fail.
    pub fn fail_next(&self, requests: usize) { self.0.borrow_mut().fail_requests = requests; }
}

#[derive(Default)]
struct Records {
    acquired: Vec<MemoryBlock>,
    outstanding: Vec<MemoryBlock>,
    released: Vec<MemoryBlock>,
    fail_requests: usize,
}
