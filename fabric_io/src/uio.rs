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

//! UIO device mapping.
//!
//! A UIO device exposes its register region through two kernel interfaces: the character
//! device `/dev/uio<N>`, which is mapped into the process, and the sysfs attribute
//! `/sys/class/uio/uio<N>/maps/map0/size`, which holds the byte length of the region as
//! hexadecimal text. The size is always read from sysfs before mapping.
//!
//! # A sysfs map of a uio device.
//!
//! ```text
//! root@zynq:~# tree /sys/class/uio/uio4/maps
//! /sys/class/uio/uio4/maps
//! └── map0
//!     ├── addr
//!     ├── name
//!     ├── offset
//!     └── size
//! root@zynq:~# cat /sys/class/uio/uio4/maps/map0/size
//! 0x00010000
//! ```
//!
//! The resulting [`MappedRegion`] owns both the mapping and the descriptor. Dropping it
//! unmaps the region and then closes the device, on success and error paths alike.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use fabric_io::uio::UioDevice;
//! # use fabric_io::registers::RegisterBlock;
//! # fn example() -> Result<(), fabric_io::error::FabricError> {
//! let mut region = UioDevice::new(0).map()?;
//! region.write_word(0x00, 5)?;
//! let value = region.read_word(0x08)?;
//! # Ok(())
//! # }
//! ```

use crate::config;
use crate::error::FabricError;
use crate::registers::{RegisterBlock, WORD_SIZE, check_word_offset};
use crate::system_io::{fs_read, open_device};
use log::{debug, error, trace};
use rustix::mm::{MapFlags, ProtFlags, mmap, munmap};
use std::fs::File;
use std::os::fd::AsFd;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

/// Location of a UIO device and its map size attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UioDevice {
    device_path: PathBuf,
    size_path: PathBuf,
}

impl UioDevice {
    /// Resolve the device node and size attribute of `/dev/uio<index>`.
    ///
    /// Nothing is opened here; errors surface when the device is mapped.
    pub fn new(index: u32) -> Self {
        UioDevice {
            device_path: PathBuf::from(format!("{}{index}", config::UIO_DEVICE_PREFIX)),
            size_path: Path::new(config::UIO_CLASS_DIR)
                .join(format!("uio{index}"))
                .join(config::UIO_MAP0_SIZE),
        }
    }

    /// Use explicit paths for the device node and its size attribute.
    pub fn with_paths(device_path: impl Into<PathBuf>, size_path: impl Into<PathBuf>) -> Self {
        UioDevice {
            device_path: device_path.into(),
            size_path: size_path.into(),
        }
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    pub fn size_path(&self) -> &Path {
        &self.size_path
    }

    /// Read the byte length of the device's first memory map from sysfs.
    ///
    /// # Returns: `Result<usize, FabricError>`
    /// * `Ok(usize)` - Size of the region in bytes
    /// * `Err(FabricError::IORead)` - The size attribute could not be read
    /// * `Err(FabricError::MapSize)` - The attribute is not a non-zero hexadecimal number
    pub fn map_size(&self) -> Result<usize, FabricError> {
        let contents = fs_read(&self.size_path)?;
        parse_map_size(&self.size_path, &contents)
    }

    /// Open the device, read its size and map the whole region read/write and shared.
    ///
    /// The device is opened before the size is read. If reading the size or mapping fails,
    /// the open descriptor is closed before the error is returned.
    ///
    /// # Returns: `Result<MappedRegion, FabricError>`
    /// * `Ok(MappedRegion)` - The mapped register region
    /// * `Err(FabricError::IOOpen)` - The device node could not be opened
    /// * `Err(FabricError::IORead)` / `Err(FabricError::MapSize)` - The size is unavailable
    /// * `Err(FabricError::Mmap)` - The kernel refused the mapping
    pub fn map(&self) -> Result<MappedRegion, FabricError> {
        let file = open_device(&self.device_path)?;
        let size = self.map_size()?;
        debug!("Size of {:?}: {size:#x} bytes", self.device_path);
        MappedRegion::new(file, &self.device_path, size)
    }
}

/// Parse the hexadecimal contents of a map size attribute (format: "0x...", or undecorated).
pub(crate) fn parse_map_size(file: &Path, contents: &str) -> Result<usize, FabricError> {
    let trimmed = contents.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    match usize::from_str_radix(digits, 16) {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(FabricError::MapSize {
            file: file.into(),
            value: trimmed.to_owned(),
        }),
    }
}

/// A device register region mapped into the process.
///
/// All accesses are volatile 32-bit reads and writes so that the compiler neither caches
/// nor reorders them.
pub struct MappedRegion {
    ptr: NonNull<u32>,
    len: usize,
    path: PathBuf,
    // Closed after the region is unmapped in `drop`.
    _file: File,
}

impl std::fmt::Debug for MappedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedRegion")
            .field("ptr", &format_args!("{:p}", self.ptr))
            .field("len", &self.len)
            .field("path", &self.path)
            .finish()
    }
}

impl MappedRegion {
    fn new(file: File, path: &Path, len: usize) -> Result<Self, FabricError> {
        // SAFETY: the descriptor is open for reading and writing and stays open for the
        // lifetime of the mapping because `file` is stored alongside the pointer. `len` is
        // non-zero (checked by `parse_map_size`). The mapping is released in `drop`.
        let addr = unsafe {
            mmap(
                std::ptr::null_mut(),
                len,
                ProtFlags::READ | ProtFlags::WRITE,
                MapFlags::SHARED,
                file.as_fd(),
                0,
            )
        }
        .map_err(|e| FabricError::Mmap {
            file: path.into(),
            e: e.into(),
        })?;

        let ptr = NonNull::new(addr.cast::<u32>()).ok_or_else(|| FabricError::Mmap {
            file: path.into(),
            e: std::io::Error::other("mmap returned a null pointer"),
        })?;
        debug!("Mapped {path:?} ({len:#x} bytes at {ptr:p})");

        Ok(MappedRegion {
            ptr,
            len,
            path: path.into(),
            _file: file,
        })
    }

    /// The device node this region was mapped from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegisterBlock for MappedRegion {
    fn len(&self) -> usize {
        self.len
    }

    fn read_word(&self, offset: usize) -> Result<u32, FabricError> {
        check_word_offset(offset, self.len)?;
        // SAFETY: the offset is word aligned and the word lies inside the mapping
        // (checked above). mmap returns page aligned memory, so the pointer is aligned.
        let value = unsafe { self.ptr.as_ptr().add(offset / WORD_SIZE).read_volatile() };
        trace!("Read {value:#x} @ {offset:#x} of {:?}", self.path);
        Ok(value)
    }

    fn write_word(&mut self, offset: usize, value: u32) -> Result<(), FabricError> {
        check_word_offset(offset, self.len)?;
        trace!("Write {value:#x} @ {offset:#x} of {:?}", self.path);
        // SAFETY: see `read_word`. `&mut self` gives exclusive access to the mapping.
        unsafe { self.ptr.as_ptr().add(offset / WORD_SIZE).write_volatile(value) };
        Ok(())
    }
}

impl Drop for MappedRegion {
    fn drop(&mut self) {
        debug!("Unmapping {:?} ({:#x} bytes)", self.path, self.len);
        // SAFETY: `ptr` and `len` are exactly what a successful mmap returned and the
        // region is not accessed after this point.
        if let Err(e) = unsafe { munmap(self.ptr.as_ptr().cast(), self.len) } {
            error!("munmap of {:?} failed: {e}", self.path);
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
    #[case::prefixed("0x00010000\n", 0x10000)]
    #[case::upper_prefix("0X1000", 0x1000)]
    #[case::undecorated("2000", 0x2000)]
    #[case::whitespace("  0x4 \n", 4)]
    fn parses_hex_sizes(#[case] contents: &str, #[case] expected: usize) {
        let size = parse_map_size(Path::new("size"), contents);
        assert_eq!(size.unwrap(), expected);
    }

    #[gtest]
    #[rstest]
    #[case::empty("")]
    #[case::zero("0x0")]
    #[case::not_hex("0xzz")]
    #[case::decimal_suffix("4096 bytes")]
    fn rejects_bad_sizes(#[case] contents: &str) {
        expect_that!(
            &parse_map_size(Path::new("size"), contents),
            err(displays_as(contains_substring("FabricError::MapSize")))
        );
    }

    #[gtest]
    fn resolves_device_and_size_paths_from_index() {
        let device = UioDevice::new(4);
        assert_eq!(device.device_path(), Path::new("/dev/uio4"));
        assert_eq!(
            device.size_path(),
            Path::new("/sys/class/uio/uio4/maps/map0/size")
        );
    }
}
