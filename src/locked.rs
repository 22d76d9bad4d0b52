// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! A single-threaded interior-mutability cell for the process-wide default
//! allocator instance.
//!
//! The design's Non-goal list explicitly excludes multithreaded safety: a
//! real `Mutex` here would misrepresent the allocator as safe to call from
//! more than one thread. `Locked<T>` is `Sync` only so it can live in a
//! `static`; it provides no actual locking and callers must serialize
//! access externally, exactly as the spec requires.

use core::cell::UnsafeCell;

pub struct Locked<T> {
    inner: UnsafeCell<T>,
}

// SAFETY: this crate's Non-goals make concurrent access to the wrapped
// value a documented precondition violation, not something this type
// defends against. It exists only so a `static Locked<T>` compiles.
unsafe impl<T> Sync for Locked<T> {}

impl<T> Locked<T> {
    pub const fn new(inner: T) -> Self {
        Self {
            inner: UnsafeCell::new(inner),
        }
    }

    /// Obtain a mutable reference to the wrapped value.
    ///
    /// # Safety
    /// The caller must ensure no other reference (mutable or shared) to the
    /// wrapped value is alive for the duration of use, and that no other
    /// thread calls this concurrently. This crate upholds that only by
    /// documentation, per the single-threaded Non-goal.
    #[allow(clippy::mut_from_ref)]
    pub fn lock(&self) -> &mut T {
        unsafe { &mut *self.inner.get() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_exposes_mutable_access() {
        let cell = Locked::new(0u32);
        *cell.lock() += 5;
        assert_eq!(*cell.lock(), 5);
    }
}
