// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! The process-wide default allocator instance, and an optional
//! `#[global_allocator]` shim over it.
//!
//! Per the design notes' closing point ("a re-implementation should
//! encapsulate \[the free-list table and initialized flag\] in a single
//! allocator instance value and retain a process-wide default instance
//! only at the outer boundary"), this is the one place in the crate that
//! owns a `static`.

use crate::heap::Heap;
use crate::locked::Locked;
use crate::sys::SbrkGrower;
use core::alloc::{GlobalAlloc, Layout};

static DEFAULT_HEAP: Locked<Heap<SbrkGrower>> = Locked::new(Heap::new(SbrkGrower::new()));

/// The process-wide default `Heap`, growing the real process break.
pub fn default_heap() -> &'static Locked<Heap<SbrkGrower>> {
    &DEFAULT_HEAP
}

/// Adapts the default heap to `GlobalAlloc`, so a binary can opt in with
/// `#[global_allocator] static ALLOC: classheap::global::GlobalHeap =
/// classheap::global::GlobalHeap;`
///
/// This is a convenience for a program that wants to actually run its own
/// heap through this engine; it is not required to use the library.
pub struct GlobalHeap;

unsafe impl GlobalAlloc for GlobalHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // The engine has no alignment support beyond 8 bytes (a documented
        // Non-goal); a caller asking for more would silently get a
        // mis-aligned block, so refuse instead.
        if layout.align() > 8 {
            return core::ptr::null_mut();
        }
        default_heap()
            .lock()
            .allocate(layout.size() as isize)
            .map(|addr| addr as *mut u8)
            .unwrap_or(core::ptr::null_mut())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        unsafe { default_heap().lock().free(ptr as usize) };
    }
}
