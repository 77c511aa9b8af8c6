#![deny(missing_docs)]

//! Test companions for llarena-core.
//!
//! Nothing in this crate is meant for production use; it exists so that integration tests, property tests and
//! benches can observe how an arena drives its block source, including after the arena (which owns the source)
//! has been dropped.

mod tracking;

pub use tracking::{TrackingAllocator, TrackingLog};
