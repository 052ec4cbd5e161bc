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

//! GPIO line buses.
//!
//! A bus is one GPIO chip whose 32 lines carry the bits of a 32-bit word, least
//! significant bit first: bit *i* is line offset *i*. Buses are either driven (outputs)
//! or sampled (inputs) through the [`LineBus`] trait.
//!
//! Line requests are scoped. [`LineBus::drive`] returns a hold value that keeps the lines
//! requested as outputs until it is dropped, while [`LineBus::sample`] requests the lines
//! as inputs, reads them and releases them before returning.
//!
//! [`GpioChip`] implements the trait over the Linux GPIO character device (`/dev/gpiochip<N>`).

use crate::config;
use crate::error::FabricError;
use gpiocdev::Request;
use gpiocdev::chip::Chip;
use gpiocdev::line::{Offset, Value, Values};
use log::trace;
use std::path::{Path, PathBuf};

/// Number of bits carried by one bus.
pub const BUS_WIDTH: usize = config::GPIO_LINE_COUNT as usize;

/// Spread `word` over line levels, bit *i* on line *i*.
pub fn word_to_levels(word: u32) -> [bool; BUS_WIDTH] {
    std::array::from_fn(|bit| word & (1 << bit) != 0)
}

/// Collect line levels into a word, line *i* into bit *i*. Lines past the bus width are ignored.
pub fn levels_to_word(levels: &[bool]) -> u32 {
    levels
        .iter()
        .take(BUS_WIDTH)
        .enumerate()
        .filter(|(_, level)| **level)
        .fold(0, |word, (bit, _)| word | (1 << bit))
}

/// Collect a single read of all bus lines into a word. Lines missing from `values` read as low.
pub fn snapshot_to_word(values: &Values) -> u32 {
    let levels: Vec<bool> = (0..config::GPIO_LINE_COUNT)
        .map(|offset| values.get(offset) == Some(Value::Active))
        .collect();
    levels_to_word(&levels)
}

/// A fixed-width bundle of GPIO lines on one chip.
pub trait LineBus {
    /// Keeps driven lines requested as outputs while alive.
    type Hold;

    /// Path identifying the chip, used in error reports.
    fn path(&self) -> &Path;

    /// Number of lines the chip exposes.
    fn num_lines(&self) -> Result<u32, FabricError>;

    /// Request every line as an output carrying the bits of `word`.
    fn drive(&self, word: u32) -> Result<Self::Hold, FabricError>;

    /// Request every line as an input and read the bus as a word in one snapshot.
    fn sample(&self) -> Result<u32, FabricError>;
}

/// Fail with `FabricError::LineCount` unless `bus` exposes exactly 32 lines.
pub fn require_bus_width<B: LineBus>(bus: &B) -> Result<(), FabricError> {
    let lines = bus.num_lines()?;
    if lines != config::GPIO_LINE_COUNT {
        return Err(FabricError::LineCount {
            chip: bus.path().into(),
            lines,
        });
    }
    Ok(())
}

/// A GPIO chip reached through its character device.
#[derive(Debug, Clone)]
pub struct GpioChip {
    path: PathBuf,
    consumer: String,
}

impl GpioChip {
    /// The chip at `/dev/gpiochip<index>`.
    pub fn new(index: u32) -> Self {
        Self::with_path(format!("{}{index}", config::GPIO_CHIP_PREFIX))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        GpioChip {
            path: path.into(),
            consumer: config::GPIO_CONSUMER.to_owned(),
        }
    }

    /// Label line requests with `consumer` instead of the default.
    pub fn with_consumer(mut self, consumer: impl Into<String>) -> Self {
        self.consumer = consumer.into();
        self
    }

    fn gpio_error(&self, e: gpiocdev::Error) -> FabricError {
        FabricError::Gpio {
            chip: self.path.clone(),
            e,
        }
    }
}

impl LineBus for GpioChip {
    type Hold = Request;

    fn path(&self) -> &Path {
        &self.path
    }

    fn num_lines(&self) -> Result<u32, FabricError> {
        let info = Chip::from_path(&self.path)
            .and_then(|chip| chip.info())
            .map_err(|e| self.gpio_error(e))?;
        trace!("{:?} has {} lines", self.path, info.num_lines);
        Ok(info.num_lines)
    }

    fn drive(&self, word: u32) -> Result<Request, FabricError> {
        trace!("Driving {word:#010x} onto {:?}", self.path);
        let mut builder = Request::builder();
        builder
            .on_chip(self.path.as_path())
            .with_consumer(self.consumer.as_str());
        for (offset, level) in word_to_levels(word).into_iter().enumerate() {
            let value = if level { Value::Active } else { Value::Inactive };
            builder.with_line(offset as Offset).as_output(value);
        }
        builder.request().map_err(|e| self.gpio_error(e))
    }

    fn sample(&self) -> Result<u32, FabricError> {
        let offsets: Vec<Offset> = (0..config::GPIO_LINE_COUNT).collect();
        let request = Request::builder()
            .on_chip(self.path.as_path())
            .with_consumer(self.consumer.as_str())
            .with_lines(&offsets)
            .as_input()
            .request()
            .map_err(|e| self.gpio_error(e))?;

        let mut values = Values::from_offsets(&offsets);
        request
            .values(&mut values)
            .map_err(|e| self.gpio_error(e))?;
        let word = snapshot_to_word(&values);
        trace!("Sampled {word:#010x} from {:?}", self.path);
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;
    use rstest::*;

    #[gtest]
    #[rstest]
    #[case::zero(0)]
    #[case::one(1)]
    #[case::msb(0x8000_0000)]
    #[case::alternating(0xAAAA_5555)]
    #[case::all_ones(u32::MAX)]
    fn driven_pattern_reads_back_unchanged(#[case] word: u32) {
        assert_eq!(levels_to_word(&word_to_levels(word)), word);
    }

    #[gtest]
    fn bit_zero_is_line_zero() {
        let levels = word_to_levels(0b101);
        assert!(levels[0]);
        assert!(!levels[1]);
        assert!(levels[2]);
        assert!(levels[3..].iter().all(|level| !level));
    }

    #[gtest]
    fn extra_lines_are_ignored() {
        let mut levels = vec![false; 40];
        levels[1] = true;
        levels[35] = true;
        assert_eq!(levels_to_word(&levels), 2);
    }

    #[gtest]
    #[rstest]
    #[case::zero(0)]
    #[case::low_and_high_bits(0x8000_0001)]
    #[case::all_ones(u32::MAX)]
    fn snapshot_holds_every_line(#[case] word: u32) {
        let offsets: Vec<Offset> = (0..config::GPIO_LINE_COUNT).collect();
        let mut values = Values::from_offsets(&offsets);
        for (offset, level) in word_to_levels(word).into_iter().enumerate() {
            let value = if level { Value::Active } else { Value::Inactive };
            values.set(offset as Offset, value);
        }
        assert_eq!(snapshot_to_word(&values), word);
    }

    #[gtest]
    fn lines_missing_from_snapshot_read_low() {
        let mut values = Values::from_offsets(&[0, 1]);
        values.set(0, Value::Active);
        values.set(1, Value::Active);
        assert_eq!(snapshot_to_word(&values), 0b11);
    }

    #[gtest]
    fn chip_path_follows_index() {
        assert_eq!(GpioChip::new(3).path(), Path::new("/dev/gpiochip3"));
    }
}
