// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Error codes for the allocation engine.
//!
//! The raw [`crate::allocate`]/[`crate::free`] pair keeps the historical
//! malloc contract of returning null on failure and touching a single
//! process-global signal. [`Heap`](crate::heap::Heap)'s own methods surface
//! the same three failure kinds as a typed [`AllocError`] instead.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// The three failure kinds the engine can produce.
///
/// Only [`AllocError::OutOfMemory`] is a condition the top-level API signals
/// to ordinary callers; [`AllocError::InvalidArgument`] is silent at the raw
/// pointer-level API (it returns null without touching the error signal) and
/// [`AllocError::Invariant`] indicates a programming error the design
/// handles by assertion, not by recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The OS break could not be extended even after the full geometric
    /// back-off sequence.
    OutOfMemory,
    /// The requested size was zero or could not be represented.
    InvalidArgument,
    /// A structural invariant was violated (corrupt header/footer, missing
    /// sentinel, free-list linkage error, a post-growth fit retry that came
    /// up empty). This is a programming error, not a user error.
    Invariant(&'static str),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::OutOfMemory => write!(f, "heap extension exhausted"),
            AllocError::InvalidArgument => write!(f, "invalid allocation size"),
            AllocError::Invariant(msg) => write!(f, "allocator invariant violated: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocError {}

/// Process-global out-of-memory signal, matching the spec's description of
/// the top-level operation as "the only place the global error signal is
/// touched". Invalid-argument failures deliberately do not set this.
pub static OUT_OF_MEMORY: AtomicBool = AtomicBool::new(false);

/// Read and clear the process-global out-of-memory signal.
///
/// Mirrors the `errno`-style contract the spec describes: a caller that gets
/// a null pointer back from `allocate` can check this to disambiguate a
/// zero-byte request (never sets the signal) from true exhaustion.
pub fn had_out_of_memory() -> bool {
    OUT_OF_MEMORY.swap(false, Ordering::AcqRel)
}

pub(crate) fn signal_out_of_memory() {
    OUT_OF_MEMORY.store(true, Ordering::Release);
}
