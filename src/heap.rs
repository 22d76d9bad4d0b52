// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! `Heap<G>`: the composed allocator — size classification, fit search,
//! splitting, and growth — wired together behind the two public
//! operations, `allocate` and `free`.

use crate::block::{round_up_8, Block, TAG_SIZE};
use crate::error::{signal_out_of_memory, AllocError};
use crate::fit::find_fit;
use crate::free_list::FreeListTable;
use crate::grow::{Grower, HeapGrower};
use crate::size_class::class_of;
use tracing::{error, instrument};

/// A single allocator instance, holding the free-list table, the sentinel
/// one-shot flag, and the `Grower` it extends its heap through.
///
/// Per the design's single-threaded Non-goal, nothing here synchronizes
/// concurrent callers; §10.5 of the expanded design wraps a process-wide
/// instance of this type in [`crate::locked::Locked`].
pub struct Heap<G: Grower> {
    free_lists: FreeListTable,
    grower_state: HeapGrower,
    grower: G,
}

impl<G: Grower> Heap<G> {
    pub const fn new(grower: G) -> Self {
        Self {
            free_lists: FreeListTable::new(),
            grower_state: HeapGrower::new(),
            grower,
        }
    }

    /// Whether the sentinel boundary tags have been planted yet.
    pub fn is_initialized(&self) -> bool {
        self.grower_state.is_initialized()
    }

    /// Allocate at least `n` bytes, returning the payload address.
    ///
    /// `n <= 0` returns `None` without touching the out-of-memory signal
    /// (the spec's invalid-argument case). A genuine exhaustion sets the
    /// signal (readable via [`crate::error::had_out_of_memory`]) and also
    /// returns `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn allocate(&mut self, n: isize) -> Option<usize> {
        if n <= 0 {
            return None;
        }
        let need = round_up_8(n as usize + 2 * TAG_SIZE);
        let cls = class_of(need);

        let (found_class, block) = match unsafe { find_fit(&self.free_lists, cls, need) } {
            Some(hit) => hit,
            None => {
                let grown = match self.grower_state.grow(&self.grower, cls, need) {
                    Ok(block) => block,
                    Err(_) => {
                        signal_out_of_memory();
                        return None;
                    }
                };
                unsafe { self.free_lists.push_free(cls, grown) };
                match unsafe { find_fit(&self.free_lists, cls, need) } {
                    Some(hit) => hit,
                    None => self.invariant_violation(
                        "fit retry after heap growth found nothing to satisfy the request",
                    ),
                }
            }
        };

        unsafe { self.free_lists.remove_free(found_class, block) };

        if let Some(tail) = unsafe { crate::split::try_split(block, need) } {
            let tail_class = class_of(unsafe { tail.size() });
            unsafe { self.free_lists.push_free(tail_class, tail) };
        }

        unsafe { block.set_allocated(true) };
        Some(block.payload_addr())
    }

    /// Release a block previously returned by [`Heap::allocate`].
    ///
    /// # Safety
    /// `payload` must be a value this `Heap` returned from `allocate` and
    /// not yet freed. Passing anything else (including a null address) is
    /// undefined, as it is in the spec this mirrors.
    #[instrument(level = "trace", skip(self))]
    pub unsafe fn free(&mut self, payload: usize) {
        let block = Block::from_payload(payload);
        unsafe { block.set_allocated(false) };
        let cls = class_of(unsafe { block.size() });
        unsafe { self.free_lists.push_free(cls, block) };
    }

    #[cold]
    fn invariant_violation(&self, msg: &'static str) -> ! {
        error!(message = msg, "allocator invariant violated");
        panic!("{}", AllocError::Invariant(msg));
    }
}
