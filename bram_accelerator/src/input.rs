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

//! Input file parsing.
//!
//! The puzzle input holds one rotation per line: a direction character followed directly
//! by a decimal magnitude, e.g. `R5` or `L12`. Right rotations become positive deltas and
//! left rotations negative ones. Empty lines are skipped.

use fabric_io::error::FabricError;
use fabric_io::system_io::fs_read;
use log::debug;
use std::path::Path;

/// Parse every non-empty line of `contents` into a signed delta.
///
/// # Returns: `Result<Vec<i32>, FabricError>`
/// * `Ok(Vec<i32>)` - The deltas in file order
/// * `Err(FabricError::Argument)` - A line does not start with `R` or `L`, or its magnitude
///   is not a decimal number that fits in 32 bits
pub fn parse_deltas(contents: &str) -> Result<Vec<i32>, FabricError> {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| parse_line(number, line))
        .collect()
}

fn parse_line(number: usize, line: &str) -> Result<i32, FabricError> {
    let mut chars = line.chars();
    let sign = match chars.next() {
        Some('R') => 1,
        Some('L') => -1,
        _ => {
            return Err(FabricError::Argument(format!(
                "Invalid direction in file at line {number}: {line}"
            )));
        }
    };

    let magnitude = chars.as_str();
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FabricError::Argument(format!(
            "Invalid magnitude in file at line {number}: {line}"
        )));
    }
    magnitude
        .parse::<i32>()
        .map(|value| sign * value)
        .map_err(|e| {
            FabricError::Argument(format!(
                "Magnitude out of range at line {number}: {line}: {e}"
            ))
        })
}

/// Read and parse the input file at `path`.
///
/// # Returns: `Result<Vec<i32>, FabricError>`
/// * `Ok(Vec<i32>)` - The deltas in file order
/// * `Err(FabricError::IORead)` - The file could not be read
/// * `Err(FabricError::Argument)` - A line is malformed
pub fn read_deltas(path: &Path) -> Result<Vec<i32>, FabricError> {
    let deltas = parse_deltas(&fs_read(path)?)?;
    debug!("Parsed {} deltas from {path:?}", deltas.len());
    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;
    use rstest::*;

    #[gtest]
    #[rstest]
    #[case::right_then_left("R5\nL3\n", vec![5, -3])]
    #[case::no_trailing_newline("L68\nR48", vec![-68, 48])]
    #[case::crlf("R1\r\nL2\r\n", vec![1, -2])]
    #[case::trailing_whitespace("R5 \nL3\t\n", vec![5, -3])]
    #[case::whitespace_only_line("R1\n  \nL1\n", vec![1, -1])]
    #[case::blank_lines("\nR7\n\nL0\n", vec![7, 0])]
    #[case::empty("", vec![])]
    #[case::large("R2147483647", vec![i32::MAX])]
    fn parses_rotations(#[case] contents: &str, #[case] expected: Vec<i32>) {
        assert_eq!(parse_deltas(contents).unwrap(), expected);
    }

    #[gtest]
    #[rstest]
    #[case::unknown_direction("R5\nX3\n", "Invalid direction in file at line 2: X3")]
    #[case::lowercase("r5", "Invalid direction")]
    #[case::leading_space(" R5", "Invalid direction")]
    #[case::missing_magnitude("L", "Invalid magnitude")]
    #[case::signed_magnitude("R-5", "Invalid magnitude")]
    #[case::trailing_garbage("R5x", "Invalid magnitude")]
    #[case::overflow("L2147483648", "Magnitude out of range")]
    fn rejects_malformed_lines(#[case] contents: &str, #[case] message: &str) {
        expect_that!(
            &parse_deltas(contents),
            err(displays_as(all!(
                contains_substring("FabricError::Argument"),
                contains_substring(message)
            )))
        );
    }
}
