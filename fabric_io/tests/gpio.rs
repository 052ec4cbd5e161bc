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

use fabric_io::error::FabricError;
use fabric_io::gpio::{GpioChip, LineBus, require_bus_width};
use googletest::prelude::*;
use std::path::Path;

const MISSING_CHIP: &str = "/nonexistent/gpiochip99";

fn assert_gpio_error_on_missing_chip<T: std::fmt::Debug>(result: &Result<T, FabricError>) {
    match result {
        Err(FabricError::Gpio { chip, .. }) => assert_eq!(chip, Path::new(MISSING_CHIP)),
        other => panic!("expected FabricError::Gpio for {MISSING_CHIP}, got {other:?}"),
    }
    expect_that!(
        result,
        err(displays_as(all!(
            contains_substring("FabricError::Gpio"),
            contains_substring(MISSING_CHIP)
        )))
    );
}

#[gtest]
fn missing_chip_line_count_fails() {
    let chip = GpioChip::with_path(MISSING_CHIP);
    assert_gpio_error_on_missing_chip(&chip.num_lines());
}

#[gtest]
fn missing_chip_cannot_be_driven() {
    let chip = GpioChip::with_path(MISSING_CHIP);
    // The output request is released as soon as it is dropped.
    assert_gpio_error_on_missing_chip(&chip.drive(5).map(drop));
}

#[gtest]
fn missing_chip_cannot_be_sampled() {
    let chip = GpioChip::with_path(MISSING_CHIP);
    assert_gpio_error_on_missing_chip(&chip.sample());
}

#[gtest]
fn missing_chip_fails_the_width_check() {
    let chip = GpioChip::with_path(MISSING_CHIP).with_consumer("width-check");
    assert_gpio_error_on_missing_chip(&require_bus_width(&chip));
}
