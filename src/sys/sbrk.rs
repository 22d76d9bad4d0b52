// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! `sbrk(2)`-backed [`Grower`] for real process use.

use crate::grow::Grower;

/// Grows the process data segment via `sbrk(2)`.
///
/// There is exactly one program break per process; constructing more than
/// one `SbrkGrower` and using them concurrently (or alongside the system
/// `malloc`, which also moves the break) violates the single-owner
/// assumption §5 of the design describes.
#[derive(Debug, Default)]
pub struct SbrkGrower {
    _private: (),
}

impl SbrkGrower {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

/// `sbrk` signals failure by returning `(void*)-1`.
const SBRK_FAILED: isize = -1;

impl Grower for SbrkGrower {
    fn extend(&self, delta: isize) -> Option<usize> {
        let prev = unsafe { libc::sbrk(delta) };
        if prev as isize == SBRK_FAILED {
            None
        } else {
            Some(prev as usize)
        }
    }

    fn query(&self) -> Option<usize> {
        self.extend(0)
    }
}
