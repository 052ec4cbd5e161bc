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

//! Latency statistics over repeated accelerator invocations.

use std::fmt;
use std::time::Duration;

/// Count, total, extremes and mean of a latency sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    pub count: usize,
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
    /// Mean latency, rounded down to whole nanoseconds.
    pub average: Duration,
}

impl LatencySummary {
    /// Summarise `samples`. Returns `None` for an empty sample.
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let min = *samples.iter().min()?;
        let max = *samples.iter().max()?;
        let total: Duration = samples.iter().sum();
        let mean_nanos = total.as_nanos() / samples.len() as u128;
        let average = Duration::from_nanos(u64::try_from(mean_nanos).unwrap_or(u64::MAX));
        Some(LatencySummary {
            count: samples.len(),
            total,
            min,
            max,
            average,
        })
    }
}

fn micros(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}

impl fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Min: {:.3} μs | Max: {:.3} μs | Avg: {:.3} μs",
            micros(self.min),
            micros(self.max),
            micros(self.average)
        )
    }
}
