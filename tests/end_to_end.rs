// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Black-box integration tests against the public `Heap`/`Grower` API,
//! independent of the unit tests living alongside each component.

use classheap::heap::Heap;
use classheap::sys::MockGrower;

/// Installs a `tracing` subscriber so the `debug!`/`warn!` spans emitted by
/// `HeapGrower` (sentinel planting, back-off exhaustion) are visible with
/// `cargo test -- --nocapture` instead of going nowhere. Idempotent: only
/// the first test to run this wins the global subscriber, the rest no-op.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn fresh_heap() -> Heap<MockGrower> {
    init_tracing();
    Heap::new(MockGrower::new(4 * 1024 * 1024))
}

#[test]
fn repeated_alloc_free_cycles_never_panic_or_leak_addresses() {
    let mut heap = fresh_heap();
    let mut live = Vec::new();

    for round in 0..20 {
        for i in 0..32 {
            let size = 8 + (i * 7 + round * 3) % 512;
            if let Some(p) = heap.allocate(size as isize) {
                assert_eq!(p % 8, 0);
                live.push(p);
            }
        }
        while live.len() > 8 {
            let p = live.pop().unwrap();
            unsafe { heap.free(p) };
        }
    }

    for p in live {
        unsafe { heap.free(p) };
    }
}

#[test]
fn a_heap_with_no_room_for_sentinels_reports_exhaustion_not_a_panic() {
    init_tracing();
    let mut heap = Heap::new(MockGrower::new(4));
    assert!(heap.allocate(8).is_none());
    assert!(classheap::error::had_out_of_memory());
}

#[test]
fn allocations_never_alias() {
    let mut heap = fresh_heap();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let p = heap.allocate(32).expect("small allocations should not exhaust a 4 MiB heap");
        assert!(seen.insert(p), "allocate returned an address already in use");
    }
}
