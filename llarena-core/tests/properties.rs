//! Model-based tests running arbitrary operation sequences against plain-vector stacks.

use proptest::prelude::*;

use llarena_core::{MemoryArena, MemoryBlock, BLOCK_OVERHEAD};
use llarena_test::TrackingAllocator;

#[derive(Clone, Copy, Debug)]
enum Op {
    Allocate,
    Deallocate,
    Trim,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Allocate),
        4 => Just(Op::Deallocate),
        1 => Just(Op::Trim),
    ]
}

//  Mirrors the two intrusive stacks with plain vectors of source-view blocks, head last.
#[derive(Default)]
struct Model {
    active: Vec<MemoryBlock>,
    recycled: Vec<MemoryBlock>,
}

proptest! {
    #[test]
    fn arena_matches_model(ops in proptest::collection::vec(op(), 0..64)) {
        let allocator = TrackingAllocator::new(256);
        let log = allocator.log();

        let mut arena = MemoryArena::new(allocator);
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Allocate => {
                    let calls = log.allocations();
                    let reusing = !model.recycled.is_empty();

                    let block = arena.allocate_block().unwrap();

                    if reusing {
                        //  A spare block exists: the source must not be called.
                        prop_assert_eq!(calls, log.allocations());

                        let reused = model.recycled.pop().unwrap();

                        prop_assert_eq!(
                            reused.memory.as_ptr() as usize + BLOCK_OVERHEAD,
                            block.memory.as_ptr() as usize
                        );

                        model.active.push(reused);
                    } else {
                        prop_assert_eq!(calls + 1, log.allocations());

                        let fresh = *log.acquired().last().unwrap();

                        prop_assert_eq!(fresh.size - BLOCK_OVERHEAD, block.size);

                        model.active.push(fresh);
                    }
                }
                Op::Deallocate => {
                    if model.active.is_empty() {
                        continue;
                    }

                    arena.deallocate_block();

                    let parked = model.active.pop().unwrap();
                    model.recycled.push(parked);
                }
                Op::Trim => {
                    let released_before = log.released().len();

                    arena.shrink_to_fit();

                    //  The spare blocks go back to the source oldest first.
                    let expected: Vec<_> = model.recycled.drain(..).rev().collect();
                    let released = log.released();

                    prop_assert_eq!(&released[released_before..], &expected[..]);
                }
            }

            prop_assert_eq!(model.active.len(), arena.size());
            prop_assert_eq!(model.active.len() + model.recycled.len(), arena.capacity());
        }

        //  Destruction returns whatever remains, oldest first across both lists.
        let mut expected = model.active.clone();
        expected.extend(model.recycled.iter().rev().copied());

        let released_before = log.released().len();

        drop(arena);

        let released = log.released();

        prop_assert_eq!(&released[released_before..], &expected[..]);
        prop_assert_eq!(0, log.live());
    }

    #[test]
    fn capacity_only_decreases_on_trim(ops in proptest::collection::vec(op(), 0..64)) {
        let mut arena = MemoryArena::new(TrackingAllocator::new(256));

        let mut watermark = 0;

        for op in ops {
            match op {
                Op::Allocate => {
                    arena.allocate_block().unwrap();
                }
                Op::Deallocate => {
                    if arena.size() == 0 {
                        continue;
                    }

                    arena.deallocate_block();
                }
                Op::Trim => {
                    arena.shrink_to_fit();

                    //  The one sanctioned decrease; afterwards no spare block remains.
                    prop_assert_eq!(arena.size(), arena.capacity());
                    watermark = arena.capacity();
                    continue;
                }
            }

            prop_assert!(arena.capacity() >= watermark);
            watermark = arena.capacity();
        }
    }
}
