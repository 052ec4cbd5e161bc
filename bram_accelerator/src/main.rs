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

//! bram-accelerator - solve Advent of Code day 1 on the FPGA and time the accelerator.
//!
//! ```bash
//! bram-accelerator input.txt
//! bram-accelerator --ctrl-uio 4 --bram-uio 5 --iterations 100 --timeout-ms 0 input.txt
//! ```

use bram_accelerator::accelerator::{DEFAULT_POLL_TIMEOUT, DEFAULT_SETTLE_DELAY};
use bram_accelerator::input::read_deltas;
use bram_accelerator::{DEFAULT_ITERATIONS, RunConfig, solve};
use clap::Parser;
use fabric_io::args::{decimal_u32, decimal_u64, parse_or_exit};
use fabric_io::uio::UioDevice;
use log::{debug, info};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CTRL_UIO: u32 = 4;
const DEFAULT_BRAM_UIO: u32 = 5;

#[derive(Parser, Debug)]
#[command(name = "bram-accelerator", version)]
#[command(about = "Stage day 1 input into block RAM and time the FPGA accelerator")]
struct Cli {
    /// Puzzle input, one rotation (`R<n>` or `L<n>`) per line
    input_file: PathBuf,
    /// Index of the UIO device holding the control registers
    #[arg(long, default_value_t = DEFAULT_CTRL_UIO, value_parser = decimal_u32)]
    ctrl_uio: u32,
    /// Index of the UIO device mapping the block RAM
    #[arg(long, default_value_t = DEFAULT_BRAM_UIO, value_parser = decimal_u32)]
    bram_uio: u32,
    /// Number of timed accelerator invocations
    #[arg(long, default_value_t = DEFAULT_ITERATIONS as u32, value_parser = decimal_u32)]
    iterations: u32,
    /// Delay in milliseconds between staging the input and starting the accelerator
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY.as_millis() as u64, value_parser = decimal_u64)]
    settle_ms: u64,
    /// Bound in milliseconds on waiting for completion; 0 waits forever
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT.as_millis() as u64, value_parser = decimal_u64)]
    timeout_ms: u64,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            iterations: self.iterations as usize,
            settle: Duration::from_millis(self.settle_ms),
            timeout: (self.timeout_ms != 0).then(|| Duration::from_millis(self.timeout_ms)),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli: Cli = parse_or_exit();
    debug!("parsed cli command with {cli:?}");

    let deltas = read_deltas(&cli.input_file)?;

    let bram_device = UioDevice::new(cli.bram_uio);
    info!("Opening BRAM device: {:?}", bram_device.device_path());
    let mut bram = bram_device.map()?;

    let ctrl_device = UioDevice::new(cli.ctrl_uio);
    info!("Opening control device: {:?}", ctrl_device.device_path());
    let ctrl = ctrl_device.map()?;

    let report = solve(&deltas, &mut bram, ctrl, &cli.run_config())?;

    println!("=== Day 1 ===");
    println!(
        "Part 1: {} | Part 2: {} | {}",
        report.part1, report.part2, report.latency
    );
    Ok(())
}
