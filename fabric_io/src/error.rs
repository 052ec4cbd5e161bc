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

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FabricError {
    #[error("FabricError::Argument: {0}")]
    Argument(String),
    #[error("FabricError::IORead: An IO error occurred when reading from {file:?}: {e}")]
    IORead { file: PathBuf, e: std::io::Error },
    #[error("FabricError::IOOpen: An IO error occurred when opening device {file:?}: {e}")]
    IOOpen { file: PathBuf, e: std::io::Error },
    #[error("FabricError::MapSize: {file:?} does not hold a usable hexadecimal size: {value:?}")]
    MapSize { file: PathBuf, value: String },
    #[error("FabricError::Mmap: Failed to map {file:?}: {e}")]
    Mmap { file: PathBuf, e: std::io::Error },
    #[error(
        "FabricError::Offset: Register offset {offset:#x} is misaligned or outside a {len:#x} byte region"
    )]
    Offset { offset: usize, len: usize },
    #[error("FabricError::Capacity: {required} bytes do not fit into a {available} byte region")]
    Capacity { required: usize, available: usize },
    #[error("FabricError::LineCount: {chip:?} has {lines} lines but exactly 32 are required")]
    LineCount { chip: PathBuf, lines: u32 },
    #[error("FabricError::Gpio: A GPIO error occurred on {chip:?}: {e}")]
    Gpio { chip: PathBuf, e: gpiocdev::Error },
    #[error(
        "FabricError::Timeout: Register {register:#x} did not signal completion within {waited:?}"
    )]
    Timeout { register: usize, waited: Duration },
}
