// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Concrete [`Grower`](crate::grow::Grower) implementations.
//!
//! The engine in [`crate::grow`] never names a syscall; this module is
//! where the out-of-scope OS collaborator actually gets wired up, for a
//! crate that wants to be runnable end to end rather than purely abstract.

#[cfg(feature = "sbrk-backend")]
mod sbrk;
#[cfg(feature = "sbrk-backend")]
pub use sbrk::SbrkGrower;

#[cfg(feature = "std")]
mod mock;
#[cfg(feature = "std")]
pub use mock::MockGrower;
