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

//! Error Wrapping File System I/O Helpers
//!
//! Thin wrappers around the standard library file operations used by the tools, with
//! trace logging and conversion to [`FabricError`] variants that carry the offending path.
//!
//! Includes: reading text files (sysfs attributes, input files) and opening device nodes
//! for memory mapping.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use fabric_io::system_io::{fs_read, open_device};
//! # use std::path::Path;
//!
//! # fn example() -> Result<(), fabric_io::error::FabricError> {
//! let size = fs_read(Path::new("/sys/class/uio/uio0/maps/map0/size"))?;
//! let device = open_device(Path::new("/dev/uio0"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::FabricError;
use log::trace;
use rustix::fs::OFlags;
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

/// Read the contents of a file to a String.
///
/// # Arguments
///
/// * `file_path` - Path to the file to read
///
/// # Returns: `Result<String, FabricError>`
/// * `Ok(String)` - The complete contents of the file
/// * `Err(FabricError::IORead)` - If the file cannot be read (doesn't exist, permissions, etc.)
pub fn fs_read(file_path: &Path) -> Result<String, FabricError> {
    trace!("Attempting to read from {file_path:?}");
    let mut buf: String = String::new();
    let result = OpenOptions::new()
        .read(true)
        .open(file_path)
        .and_then(|mut f| f.read_to_string(&mut buf));

    match result {
        Ok(_) => {
            trace!("Reading done");
            Ok(buf)
        }
        Err(e) => Err(FabricError::IORead {
            file: file_path.into(),
            e,
        }),
    }
}

/// Open a device node for read/write access with synchronous writes.
///
/// UIO character devices are opened this way before their register region is mapped.
/// The returned `File` owns the descriptor, so dropping it closes the device.
///
/// # Arguments
///
/// * `device_path` - Path to the device node (e.g. `/dev/uio4`)
///
/// # Returns: `Result<File, FabricError>`
/// * `Ok(File)` - The open device
/// * `Err(FabricError::IOOpen)` - If the device cannot be opened
pub fn open_device(device_path: &Path) -> Result<File, FabricError> {
    trace!("Attempting to open device {device_path:?}");
    #[allow(clippy::cast_possible_wrap)]
    let sync_flag = OFlags::SYNC.bits() as i32;
    let result = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(sync_flag)
        .open(device_path);

    match result {
        Ok(file) => {
            trace!("Opened {device_path:?}");
            Ok(file)
        }
        Err(e) => Err(FabricError::IOOpen {
            file: device_path.into(),
            e,
        }),
    }
}
