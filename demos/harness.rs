// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Interactive demonstration harness.
//!
//! Takes a single positional argument — a byte count — and applies it as
//! an `RLIMIT_DATA` ceiling on the process data segment before exercising
//! the allocator, the same shape as the original test program this
//! allocator's design is drawn from. Not part of the library's public
//! interface; this is a standalone binary for manual exercise only.

use classheap::heap::Heap;
use classheap::sys::SbrkGrower;
use std::env;
use std::process::ExitCode;

fn set_data_segment_limit(bytes: u64) -> bool {
    let limit = libc::rlimit {
        rlim_cur: bytes as libc::rlim_t,
        rlim_max: bytes as libc::rlim_t,
    };
    unsafe { libc::setrlimit(libc::RLIMIT_DATA, &limit) == 0 }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(limit_arg) = args.get(1) else {
        eprintln!("usage: {} <data-segment-byte-limit>", args[0]);
        return ExitCode::FAILURE;
    };
    let Ok(limit) = limit_arg.parse::<u64>() else {
        eprintln!("expected an integer byte count, got {limit_arg:?}");
        return ExitCode::FAILURE;
    };
    if !set_data_segment_limit(limit) {
        eprintln!("setrlimit(RLIMIT_DATA, {limit}) failed");
        return ExitCode::FAILURE;
    }

    let mut heap = Heap::new(SbrkGrower::new());

    let Some(big) = heap.allocate(1024 * 1024) else {
        println!("1 MiB allocation returned NULL under a {limit}-byte data limit");
        return ExitCode::FAILURE;
    };
    println!("1 MiB allocation succeeded at {big:#x}");

    match heap.allocate(10 * core::mem::size_of::<u64>() as isize) {
        Some(small) => {
            println!("second allocation succeeded at {small:#x}");
            unsafe { heap.free(small) };
        }
        None => {
            println!("second allocation returned NULL");
            return ExitCode::FAILURE;
        }
    }

    unsafe { heap.free(big) };
    ExitCode::SUCCESS
}
