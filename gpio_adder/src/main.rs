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

//! gpio-adder - add two numbers on an adder wired to three 32-line GPIO chips.
//!
//! ```bash
//! # operands on /dev/gpiochip1 and /dev/gpiochip2, sum on /dev/gpiochip3
//! gpio-adder 1 2 3 5 3
//! ```

use clap::Parser;
use fabric_io::args::{decimal_u32, parse_or_exit};
use fabric_io::gpio::GpioChip;
use gpio_adder::add;
use log::debug;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "gpio-adder", version)]
#[command(about = "Add two numbers on an adder wired to three 32-line GPIO chips")]
struct Cli {
    /// Index of the chip driven with operand A (/dev/gpiochipN)
    #[arg(value_parser = decimal_u32)]
    chip_a: u32,
    /// Index of the chip driven with operand B
    #[arg(value_parser = decimal_u32)]
    chip_b: u32,
    /// Index of the chip the sum is read from
    #[arg(value_parser = decimal_u32)]
    chip_c: u32,
    /// First operand
    #[arg(value_parser = decimal_u32)]
    value_a: u32,
    /// Second operand
    #[arg(value_parser = decimal_u32)]
    value_b: u32,
    /// Consumer label attached to the line requests
    #[arg(long, default_value = fabric_io::config::GPIO_CONSUMER)]
    consumer: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli: Cli = parse_or_exit();
    debug!("parsed cli command with {cli:?}");

    let chip_a = GpioChip::new(cli.chip_a).with_consumer(&cli.consumer);
    let chip_b = GpioChip::new(cli.chip_b).with_consumer(&cli.consumer);
    let chip_c = GpioChip::new(cli.chip_c).with_consumer(&cli.consumer);

    println!("Writing {} to chip_a and {} to chip_b", cli.value_a, cli.value_b);
    let report = add(&chip_a, &chip_b, &chip_c, cli.value_a, cli.value_b)?;
    println!("Read from chip_c");
    println!("{report}");
    Ok(())
}
