// This file is part of fabric-tools, a set of utilities to drive FPGA-attached peripherals from Linux user space.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// fabric-tools is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// fabric-tools is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

//! Start/done protocol of the day 1 accelerator.
//!
//! The accelerator reads its input from block RAM and is controlled through a small
//! AXI-Lite register block:
//!
//! | offset | register | access | meaning                          |
//! |--------|----------|--------|----------------------------------|
//! | `0x00` | START    | write  | rising edge starts a computation |
//! | `0x04` | SIZE     | write  | number of deltas in BRAM         |
//! | `0x08` | DONE     | read   | bit 0 set once results are valid |
//! | `0x0C` | PART1    | read   | signed result of part 1          |
//! | `0x10` | PART2    | read   | signed result of part 2          |
//!
//! One invocation walks Idle -> Start-Pulsed -> Polling-Done -> Done -> Result-Read. START is
//! pulsed (1 then 0) and DONE bit 0 is then polled in a tight loop. The time between the
//! pulse and the first observation of the done bit is the invocation's latency. PART1 and
//! PART2 are read once DONE is set, without re-checking it.
//!
//! The poll is bounded by a timeout so that a stalled peripheral surfaces as
//! [`FabricError::Timeout`] instead of hanging the process. A timeout of `None` restores the
//! unbounded spin.

use fabric_io::error::FabricError;
use fabric_io::registers::{RegisterBlock, WORD_SIZE};
use log::{debug, error, info, trace, warn};
use std::sync::atomic::{Ordering, fence};
use std::time::{Duration, Instant};

/// Accelerator control register offsets.
pub mod regs {
    /// Start trigger, pulsed 1 then 0
    pub const START: usize = 0x00;
    /// Element count of the staged input
    pub const SIZE: usize = 0x04;
    /// Completion status
    pub const DONE: usize = 0x08;
    /// Part 1 result
    pub const PART1: usize = 0x0C;
    /// Part 2 result
    pub const PART2: usize = 0x10;

    /// Completion bit of the DONE register
    pub const DONE_BIT: u32 = 1 << 0;
}

/// Default bound on the DONE poll.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// Number of DONE reads between two looks at the clock while waiting with a timeout.
const POLLS_PER_DEADLINE_CHECK: u32 = 1024;

/// Default delay between staging the input and touching the control registers.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Outcome of one accelerator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Computation {
    /// Time from the start pulse to the observed done bit.
    pub duration: Duration,
    pub part1: i32,
    pub part2: i32,
}

/// Copy `deltas` word by word to the start of `bram`.
///
/// The capacity is checked first; nothing is written when the input does not fit.
///
/// # Returns: `Result<(), FabricError>`
/// * `Ok(())` - Every delta was written
/// * `Err(FabricError::Capacity)` - The input is larger than the region
pub fn stage<R: RegisterBlock>(bram: &mut R, deltas: &[i32]) -> Result<(), FabricError> {
    let required = deltas.len() * WORD_SIZE;
    debug!(
        "BRAM size: {} bytes, array size to copy: {required} bytes",
        bram.len()
    );
    if required > bram.len() {
        return Err(FabricError::Capacity {
            required,
            available: bram.len(),
        });
    }

    info!("Copying {} deltas to BRAM", deltas.len());
    for (index, delta) in deltas.iter().enumerate() {
        bram.write_signed(index * WORD_SIZE, *delta)?;
    }
    info!("Array copied successfully");
    Ok(())
}

/// Wait for `delay`, then issue a full memory fence.
///
/// Called between staging the input and programming the control registers. Neither the
/// delay nor the fence is known to be required by the hardware; the delay is kept
/// configurable until the design exposes an explicit ready flag.
pub fn settle(delay: Duration) {
    if !delay.is_zero() {
        debug!("Settling for {delay:?}");
        std::thread::sleep(delay);
    }
    fence(Ordering::SeqCst);
}

/// Driver for the accelerator's control registers.
#[derive(Debug)]
pub struct Accelerator<R> {
    ctrl: R,
    timeout: Option<Duration>,
}

impl<R: RegisterBlock> Accelerator<R> {
    /// Wrap a control register block, bounding the DONE poll by [`DEFAULT_POLL_TIMEOUT`].
    pub fn new(ctrl: R) -> Self {
        Accelerator {
            ctrl,
            timeout: Some(DEFAULT_POLL_TIMEOUT),
        }
    }

    /// Bound the DONE poll by `timeout`, or spin without bound for `None`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Give back the control register block.
    pub fn into_inner(self) -> R {
        self.ctrl
    }

    /// Program the number of staged deltas.
    pub fn set_size(&mut self, count: u32) -> Result<(), FabricError> {
        info!("Setting SIZE register to: {count}");
        self.ctrl.write_word(regs::SIZE, count)
    }

    /// Pulse START, wait for DONE and read both results.
    ///
    /// # Returns: `Result<Computation, FabricError>`
    /// * `Ok(Computation)` - Latency and results of this invocation
    /// * `Err(FabricError::Timeout)` - DONE was not set within the timeout
    /// * `Err(FabricError::Offset)` - The control block is too small
    pub fn run_once(&mut self) -> Result<Computation, FabricError> {
        let started = Instant::now();
        self.ctrl.write_word(regs::START, 1)?;
        self.ctrl.write_word(regs::START, 0)?;

        let duration = self.wait_done(started)?;

        let part1 = self.ctrl.read_signed(regs::PART1)?;
        let part2 = self.ctrl.read_signed(regs::PART2)?;
        trace!("Computation took {duration:?}: part1={part1} part2={part2}");
        Ok(Computation {
            duration,
            part1,
            part2,
        })
    }

    fn wait_done(&self, started: Instant) -> Result<Duration, FabricError> {
        let mut polls: u32 = 0;
        loop {
            if self.ctrl.read_word(regs::DONE)? & regs::DONE_BIT != 0 {
                return Ok(started.elapsed());
            }
            polls = polls.wrapping_add(1);
            if let Some(timeout) = self.timeout {
                if polls % POLLS_PER_DEADLINE_CHECK == 0 {
                    let waited = started.elapsed();
                    if waited > timeout {
                        return Err(FabricError::Timeout {
                            register: regs::DONE,
                            waited,
                        });
                    }
                }
            }
            std::hint::spin_loop();
        }
    }

    /// Run `iterations` invocations back to back.
    ///
    /// The first failure is logged with its iteration index and returned; the remaining
    /// iterations are not run. Results differing from the first iteration's are logged.
    pub fn run(&mut self, iterations: usize) -> Result<Vec<Computation>, FabricError> {
        info!("Starting {iterations} computation iterations");
        let mut computations: Vec<Computation> = Vec::new();
        for iteration in 0..iterations {
            let computation = self.run_once().inspect_err(|e| {
                error!("Error on iteration {iteration}: {e}");
            })?;
            if let Some(first) = computations.first() {
                if (first.part1, first.part2) != (computation.part1, computation.part2) {
                    warn!(
                        "Iteration {iteration} returned part1={} part2={}, iteration 0 returned part1={} part2={}",
                        computation.part1, computation.part2, first.part1, first.part2
                    );
                }
            }
            computations.push(computation);
        }
        info!("All iterations completed successfully");
        Ok(computations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabric_io::registers::MemoryRegion;
    use googletest::prelude::*;

    #[gtest]
    fn stages_deltas_from_offset_zero() {
        let mut bram = MemoryRegion::new(16);
        stage(&mut bram, &[5, -3]).unwrap();
        assert_eq!(bram.words(), &[5, 0xFFFF_FFFD, 0, 0]);
    }

    #[gtest]
    fn input_filling_the_region_exactly_fits() {
        let mut bram = MemoryRegion::new(8);
        expect_that!(&stage(&mut bram, &[1, 2]), ok(anything()));
    }

    #[gtest]
    fn oversized_input_is_rejected_before_writing() {
        let mut bram = MemoryRegion::new(8);
        expect_that!(
            &stage(&mut bram, &[1, 2, 3]),
            err(displays_as(contains_substring(
                "FabricError::Capacity: 12 bytes do not fit into a 8 byte region"
            )))
        );
        assert_eq!(bram.words(), &[0, 0]);
    }

    #[gtest]
    fn pulse_leaves_start_low() {
        let mut ctrl = MemoryRegion::new(0x14);
        ctrl.write_word(regs::DONE, 1).unwrap();
        let mut accelerator = Accelerator::new(ctrl);
        accelerator.run_once().unwrap();
        assert_eq!(accelerator.into_inner().read_word(regs::START).unwrap(), 0);
    }

    /// Never completes and counts how often DONE is read.
    struct CountingCtrl {
        done_reads: std::cell::Cell<u32>,
    }

    impl RegisterBlock for CountingCtrl {
        fn len(&self) -> usize {
            0x14
        }

        fn read_word(&self, offset: usize) -> Result<u32, FabricError> {
            if offset == regs::DONE {
                self.done_reads.set(self.done_reads.get() + 1);
            }
            Ok(0)
        }

        fn write_word(&mut self, _offset: usize, _value: u32) -> Result<(), FabricError> {
            Ok(())
        }
    }

    #[gtest]
    fn deadline_is_checked_once_per_batch_of_polls() {
        let mut ctrl = CountingCtrl {
            done_reads: std::cell::Cell::new(0),
        };
        let result = Accelerator::new(&mut ctrl)
            .with_timeout(Some(Duration::ZERO))
            .run_once();
        expect_that!(
            &result,
            err(displays_as(contains_substring("FabricError::Timeout")))
        );
        assert_eq!(ctrl.done_reads.get(), POLLS_PER_DEADLINE_CHECK);
    }

    #[gtest]
    fn stalled_peripheral_times_out() {
        let ctrl = MemoryRegion::new(0x14);
        let mut accelerator = Accelerator::new(ctrl).with_timeout(Some(Duration::from_millis(5)));
        expect_that!(
            &accelerator.run_once(),
            err(displays_as(contains_substring("FabricError::Timeout: Register 0x8")))
        );
    }
}
