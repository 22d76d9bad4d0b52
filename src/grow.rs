// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Heap growth: one-shot sentinel planting, then geometric-back-off
//! extension of the process break.
//!
//! The OS break-adjustment primitive is abstracted behind [`Grower`] so the
//! engine never names a concrete syscall; §10.3 of the expanded design
//! ships a real `sbrk`-backed implementation and a deterministic mock for
//! tests.

use crate::block::{round_up_8, write_tag, Block, SENTINEL};
use crate::error::AllocError;
use tracing::{debug, instrument, warn};

/// The OS heap-extension primitive, abstracted to a trait.
///
/// Both methods return `None` on failure, the distinguishable failure
/// sentinel the spec describes as `(void*)-1`.
pub trait Grower {
    /// Advance the break by `delta` bytes and return the break's value
    /// *before* the change.
    fn extend(&self, delta: isize) -> Option<usize>;
    /// Return the current break without changing it.
    fn query(&self) -> Option<usize>;
}

/// Six halving attempts, then 2x and 1x the request, before giving up.
const BACKOFF_ATTEMPTS: usize = 6;

const SMALL_CLASS_BASE: usize = 65_536;
const LARGE_CLASS_BASE: usize = 8 * 1024 * 1024;

/// One-shot sentinel planting plus the geometric-back-off growth policy.
pub struct HeapGrower {
    initialized: bool,
}

impl HeapGrower {
    pub const fn new() -> Self {
        Self { initialized: false }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Plant the low and high sentinels on first use. A no-op on every
    /// subsequent call.
    #[instrument(level = "debug", skip(self, grower))]
    pub fn ensure_sentinels<G: Grower>(&mut self, grower: &G) -> Result<(), AllocError> {
        if self.initialized {
            return Ok(());
        }
        let brk = grower.query().ok_or(AllocError::OutOfMemory)?;
        let aligned = round_up_8(brk);
        if aligned != brk {
            grower
                .extend((aligned - brk) as isize)
                .ok_or(AllocError::OutOfMemory)?;
        }
        let low = grower.extend(2 * crate::block::TAG_SIZE as isize).ok_or(AllocError::OutOfMemory)?;
        debug_assert_eq!(low, aligned, "extend() must return the pre-change break");
        unsafe {
            write_tag(low, SENTINEL);
            write_tag(low + crate::block::TAG_SIZE, SENTINEL);
        }
        self.initialized = true;
        debug!(low_sentinel = low, "planted heap sentinels");
        Ok(())
    }

    /// Extend the heap to satisfy a request of `need` bytes for class
    /// `class`, returning the new block inserted at that extension.
    ///
    /// The caller is expected to insert the returned block into
    /// `class`'s free list (not necessarily the class its size would
    /// naturally classify to), so the immediately-following fit retry
    /// finds it without cross-class escalation.
    #[instrument(level = "debug", skip(self, grower))]
    pub fn grow<G: Grower>(
        &mut self,
        grower: &G,
        class: usize,
        need: usize,
    ) -> Result<Block, AllocError> {
        self.ensure_sentinels(grower)?;

        let base = base_request(class, need);
        let mut divisor = 1usize;
        for _ in 0..BACKOFF_ATTEMPTS {
            if let Some(block) = try_extend(grower, base / divisor.max(1)) {
                return Ok(block);
            }
            divisor *= 2;
        }
        if let Some(block) = try_extend(grower, 2 * need) {
            return Ok(block);
        }
        if let Some(block) = try_extend(grower, need) {
            return Ok(block);
        }
        warn!(need, class, "heap growth exhausted");
        Err(AllocError::OutOfMemory)
    }
}

impl Default for HeapGrower {
    fn default() -> Self {
        Self::new()
    }
}

fn base_request(class: usize, need: usize) -> usize {
    match class {
        0..=4 => SMALL_CLASS_BASE,
        5..=9 => LARGE_CLASS_BASE,
        _ => 128 * need,
    }
}

/// Request `amount` additional bytes and, on success, lay out the new
/// block spanning `[old_brk - 8, new_brk - 8)` with a fresh end sentinel
/// at `new_brk - 8`.
fn try_extend<G: Grower>(grower: &G, amount: usize) -> Option<Block> {
    if amount == 0 {
        return None;
    }
    let old_brk = grower.extend(amount as isize)?;
    let new_brk = old_brk + amount;
    let header = old_brk - crate::block::TAG_SIZE;
    let size = new_brk - header - crate::block::TAG_SIZE;
    let block = Block::at(header);
    unsafe {
        block.write_tags(size, false);
        write_tag(new_brk - crate::block::TAG_SIZE, SENTINEL);
    }
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// A fixed-capacity in-process arena standing in for the process
    /// break, so growth back-off can be exercised deterministically.
    struct CappedGrower {
        buf: Vec<u8>,
        brk: Cell<usize>,
        limit: usize,
    }

    impl CappedGrower {
        fn new(limit: usize) -> Self {
            let buf = vec![0u8; limit];
            let base = buf.as_ptr() as usize;
            Self {
                buf,
                brk: Cell::new(base),
                limit,
            }
        }

        fn base(&self) -> usize {
            self.buf.as_ptr() as usize
        }
    }

    impl Grower for CappedGrower {
        fn extend(&self, delta: isize) -> Option<usize> {
            let current = self.brk.get();
            let next = (current as isize + delta) as usize;
            if next > self.base() + self.limit || delta < 0 {
                return None;
            }
            self.brk.set(next);
            Some(current)
        }

        fn query(&self) -> Option<usize> {
            Some(self.brk.get())
        }
    }

    #[test]
    fn ensure_sentinels_is_idempotent() {
        let grower = CappedGrower::new(1 << 20);
        let mut hg = HeapGrower::new();
        hg.ensure_sentinels(&grower).unwrap();
        assert!(hg.is_initialized());
        let brk_after_first = grower.brk.get();
        hg.ensure_sentinels(&grower).unwrap();
        assert_eq!(grower.brk.get(), brk_after_first);
    }

    #[test]
    fn grow_backs_off_until_it_fits_the_capped_arena() {
        let grower = CappedGrower::new(100_000);
        let mut hg = HeapGrower::new();
        let block = hg.grow(&grower, 0, 64).expect("small request must succeed under backoff");
        assert!(unsafe { block.size() } >= 64);
    }

    #[test]
    fn grow_fails_cleanly_when_even_the_bare_request_does_not_fit() {
        let grower = CappedGrower::new(8);
        let mut hg = HeapGrower::new();
        assert_eq!(hg.grow(&grower, 0, 4096), Err(AllocError::OutOfMemory));
    }
}
