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

//! Advent of Code day 1 on an FPGA accelerator.
//!
//! The input deltas are staged into block RAM, the element count is programmed into the
//! accelerator, and the accelerator is then triggered repeatedly while each invocation is
//! timed. See [`accelerator`] for the register protocol.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use bram_accelerator::{RunConfig, solve};
//! # use fabric_io::uio::UioDevice;
//! # use std::path::Path;
//! # fn example() -> Result<(), fabric_io::error::FabricError> {
//! let deltas = bram_accelerator::input::read_deltas(Path::new("input.txt"))?;
//! let mut bram = UioDevice::new(5).map()?;
//! let ctrl = UioDevice::new(4).map()?;
//! let report = solve(&deltas, &mut bram, ctrl, &RunConfig::default())?;
//! println!("Part 1: {} | Part 2: {} | {}", report.part1, report.part2, report.latency);
//! # Ok(())
//! # }
//! ```

pub mod accelerator;
pub mod input;
pub mod stats;

use crate::accelerator::{
    Accelerator, Computation, DEFAULT_POLL_TIMEOUT, DEFAULT_SETTLE_DELAY, settle, stage,
};
use crate::stats::LatencySummary;
use fabric_io::error::FabricError;
use fabric_io::registers::RegisterBlock;
use log::info;
use std::time::Duration;

/// Number of timed invocations per run.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Largest number of invocations accepted for one run; every invocation keeps its sample.
pub const MAX_ITERATIONS: usize = 1_000_000;

/// Parameters of one accelerator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub iterations: usize,
    /// Delay between staging the input and programming the control registers.
    pub settle: Duration,
    /// Bound on each DONE poll; `None` spins until the done bit is set.
    pub timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            iterations: DEFAULT_ITERATIONS,
            settle: DEFAULT_SETTLE_DELAY,
            timeout: Some(DEFAULT_POLL_TIMEOUT),
        }
    }
}

/// Results of a run: the first iteration's answers and the latency of all iterations.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub part1: i32,
    pub part2: i32,
    pub latency: LatencySummary,
    pub computations: Vec<Computation>,
}

/// Stage `deltas` into `bram` and run the accelerator behind `ctrl` as configured.
///
/// # Returns: `Result<RunReport, FabricError>`
/// * `Ok(RunReport)` - Answers and latency summary
/// * `Err(FabricError::Argument)` - `iterations` is zero or above [`MAX_ITERATIONS`]
/// * `Err(FabricError::Capacity)` - The deltas do not fit into `bram`
/// * `Err(FabricError::Timeout)` - An invocation did not complete in time
pub fn solve<B, C>(
    deltas: &[i32],
    bram: &mut B,
    ctrl: C,
    config: &RunConfig,
) -> Result<RunReport, FabricError>
where
    B: RegisterBlock,
    C: RegisterBlock,
{
    if config.iterations == 0 {
        return Err(FabricError::Argument(
            "At least one iteration is required".into(),
        ));
    }
    if config.iterations > MAX_ITERATIONS {
        return Err(FabricError::Argument(format!(
            "{} iterations exceed the limit of {MAX_ITERATIONS}",
            config.iterations
        )));
    }
    let count = u32::try_from(deltas.len()).map_err(|_| {
        FabricError::Argument(format!("{} deltas exceed the SIZE register", deltas.len()))
    })?;

    stage(bram, deltas)?;
    settle(config.settle);

    let mut accelerator = Accelerator::new(ctrl).with_timeout(config.timeout);
    accelerator.set_size(count)?;
    let computations = accelerator.run(config.iterations)?;

    let durations: Vec<Duration> = computations.iter().map(|c| c.duration).collect();
    let (Some(first), Some(latency)) = (
        computations.first(),
        LatencySummary::from_samples(&durations),
    ) else {
        return Err(FabricError::Argument(
            "At least one iteration is required".into(),
        ));
    };
    info!(
        "{} iterations took {:?} in total",
        latency.count, latency.total
    );

    Ok(RunReport {
        part1: first.part1,
        part2: first.part2,
        latency,
        computations,
    })
}
