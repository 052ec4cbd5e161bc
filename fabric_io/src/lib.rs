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

//! Shared plumbing for the fabric-tools utilities.
//!
//! The tools drive FPGA-attached peripherals from Linux user space. This crate carries
//! what they have in common:
//! - [`uio`] - Mapping a UIO device's register region after reading its size from sysfs
//! - [`registers`] - Volatile, word-aligned register access behind the [`registers::RegisterBlock`] trait
//! - [`gpio`] - 32-line GPIO buses carrying a word LSB-first
//! - [`args`] - Base-10 argument parsing and usage-error handling
//! - [`error`] - The [`error::FabricError`] type returned by every fallible operation
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (`trace`, `debug`, `info`, `warn`, `error`
//!   or `off`). The tools default to `info`

pub mod args;
pub mod config;
pub mod error;
pub mod gpio;
pub mod registers;
pub mod system_io;
pub mod uio;
