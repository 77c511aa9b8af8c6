//! A collection of utilities.

use core::ptr::NonNull;

mod power_of_2;

pub(crate) use power_of_2::PowerOf2;

/// Maximum fundamental alignment the embedded bookkeeping caters for.
///
/// The bookkeeping overhead is a multiple of this value, so that the usable part of a block is as aligned as
/// the block itself.
//  Safety:
//  -   16 is a power of 2.
pub(crate) const MAX_ALIGNMENT: PowerOf2 = unsafe { PowerOf2::new_unchecked(16) };

/// Returns whether the pointer is sufficiently aligned for the given alignment.
pub(crate) fn is_sufficiently_aligned_for(ptr: NonNull<u8>, alignment: PowerOf2) -> bool {
    (ptr.as_ptr() as usize) % alignment == 0
}

// mod tests
