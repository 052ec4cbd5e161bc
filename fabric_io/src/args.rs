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

//! Command-line helpers shared by the tools.
//!
//! Positional values are plain base-10 integers; anything else is an
//! [`FabricError::Argument`]. Usage errors terminate the process with exit code 1.

use crate::error::FabricError;
use clap::Parser;
use std::str::FromStr;

/// Exit code for malformed command lines.
pub const USAGE_EXIT_CODE: i32 = 1;

fn parse_decimal<T: FromStr>(arg: &str) -> Result<T, FabricError> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FabricError::Argument(format!("Invalid argument: {arg}")));
    }
    arg.parse()
        .map_err(|_| FabricError::Argument(format!("Invalid argument: {arg}")))
}

/// Parse an unsigned base-10 32-bit value, e.g. an operand.
pub fn decimal_u32(arg: &str) -> Result<u32, FabricError> {
    parse_decimal(arg)
}

/// Parse an unsigned base-10 64-bit value, e.g. a duration in milliseconds.
pub fn decimal_u64(arg: &str) -> Result<u64, FabricError> {
    parse_decimal(arg)
}

/// Parse the command line, exiting with [`USAGE_EXIT_CODE`] on usage errors.
///
/// `--help` and `--version` still exit successfully.
pub fn parse_or_exit<C: Parser>() -> C {
    match C::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;
    use rstest::*;

    #[gtest]
    #[rstest]
    #[case::zero("0", 0)]
    #[case::small("42", 42)]
    #[case::max("4294967295", u32::MAX)]
    #[case::leading_zeros("007", 7)]
    fn accepts_decimal(#[case] arg: &str, #[case] expected: u32) {
        assert_eq!(decimal_u32(arg).unwrap(), expected);
    }

    #[gtest]
    #[rstest]
    #[case::empty("")]
    #[case::hex("0x10")]
    #[case::negative("-1")]
    #[case::plus_sign("+1")]
    #[case::trailing_garbage("12abc")]
    #[case::overflow("4294967296")]
    fn rejects_non_decimal(#[case] arg: &str) {
        expect_that!(
            &decimal_u32(arg),
            err(displays_as(contains_substring("FabricError::Argument: Invalid argument")))
        );
    }
}
