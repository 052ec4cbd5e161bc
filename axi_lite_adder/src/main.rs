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

//! axi-lite-adder - add two numbers on an AXI-Lite adder exposed through UIO.
//!
//! ```bash
//! axi-lite-adder 0 5 3
//! RUST_LOG=trace axi-lite-adder 0 5 3
//! ```

use axi_lite_adder::add;
use clap::Parser;
use fabric_io::args::{decimal_u32, parse_or_exit};
use fabric_io::registers::RegisterBlock;
use fabric_io::uio::UioDevice;
use log::debug;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "axi-lite-adder", version)]
#[command(about = "Add two numbers on an AXI-Lite adder exposed through UIO")]
#[command(after_help = "Example: axi-lite-adder 0 5 3   (uses /dev/uio0)")]
struct Cli {
    /// Index N of the UIO device /dev/uioN
    #[arg(value_parser = decimal_u32)]
    uio_device: u32,
    /// First operand
    #[arg(value_parser = decimal_u32)]
    value_a: u32,
    /// Second operand
    #[arg(value_parser = decimal_u32)]
    value_b: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli: Cli = parse_or_exit();
    debug!("parsed cli command with {cli:?}");

    let mut region = UioDevice::new(cli.uio_device).map()?;
    println!("size of UIO Memory: {:#x}", region.len());

    let report = add(&mut region, cli.value_a, cli.value_b)?;
    println!("Wrote {} to register A", report.a);
    println!("Wrote {} to register B", report.b);
    println!("{report}");
    Ok(())
}
