// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! A segregated free-list allocator that manages a single heap grown via
//! the process break.
//!
//! The engine carves blocks from a contiguous region obtained by moving an
//! OS-provided "break" pointer, segregating free blocks into eleven
//! size-class lists (see [`size_class`]), each with a boundary-tagged
//! in-band header and footer (see [`block`]). Allocation picks a class,
//! searches it (first-fit for small classes, best-fit for large ones, see
//! [`fit`]), optionally splits the tail off an oversized block ([`split`]),
//! and grows the heap with geometric back-off when nothing fits
//! ([`grow`]). Freed blocks return to their class's list; adjacent free
//! blocks are never coalesced.
//!
//! This is explicitly a single-threaded design: concurrent callers must
//! serialize externally (see [`locked`] for the process-wide default
//! instance's interior-mutability story).
//!
//! ```
//! use classheap::heap::Heap;
//! use classheap::sys::MockGrower;
//!
//! let mut heap = Heap::new(MockGrower::new(1 << 20));
//! let p = heap.allocate(64).expect("fresh heap has room");
//! unsafe { heap.free(p) };
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![allow(unsafe_op_in_unsafe_fn)]

pub mod block;
pub mod error;
pub mod fit;
pub mod free_list;
pub mod grow;
pub mod heap;
pub mod locked;
pub mod size_class;
pub mod split;
pub mod sys;

#[cfg(feature = "global-allocator")]
pub mod global;

pub use error::AllocError;
pub use heap::Heap;

/// Raw, POSIX-malloc-shaped entry point over the process-wide default
/// instance (§10.5 of the expanded design): returns null on zero/negative
/// size or on exhaustion, exactly as the spec's `allocate` does.
///
/// # Safety
/// Must not be called concurrently with itself, [`free`], or any other code
/// that moves the process break — this crate's single-threaded Non-goal is
/// not enforced here, only documented.
#[cfg(feature = "global-allocator")]
pub unsafe fn allocate(n: isize) -> *mut u8 {
    global::default_heap()
        .lock()
        .allocate(n)
        .map(|addr| addr as *mut u8)
        .unwrap_or(core::ptr::null_mut())
}

/// Raw, POSIX-malloc-shaped free over the process-wide default instance.
///
/// # Safety
/// `pointer` must have come from [`allocate`] and not yet been freed; see
/// that function's safety section for the threading caveat.
#[cfg(feature = "global-allocator")]
pub unsafe fn free(pointer: *mut u8) {
    global::default_heap().lock().free(pointer as usize)
}
