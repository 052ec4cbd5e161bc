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

//! Word-addressed register access.
//!
//! Hardware registers are reached through the [`RegisterBlock`] trait, a narrow
//! `read_word`/`write_word` interface over a region of known byte length. The UIO backed
//! [`MappedRegion`](crate::uio::MappedRegion) performs volatile accesses on device memory;
//! [`MemoryRegion`] keeps the words in process memory and stands in for hardware in
//! simulations.
//!
//! Every access is 32 bits wide at a byte offset that must be a multiple of 4 and lie
//! entirely inside the region. Violations are reported as [`FabricError::Offset`] and the
//! access is not performed.

use crate::error::FabricError;
use log::trace;

/// Width of one register in bytes.
pub const WORD_SIZE: usize = size_of::<u32>();

/// A block of 32-bit registers addressed by byte offset.
pub trait RegisterBlock {
    /// Size of the block in bytes.
    fn len(&self) -> usize;

    /// Read the 32-bit word at `offset`.
    ///
    /// # Returns: `Result<u32, FabricError>`
    /// * `Ok(u32)` - The current register value
    /// * `Err(FabricError::Offset)` - `offset` is misaligned or out of range
    fn read_word(&self, offset: usize) -> Result<u32, FabricError>;

    /// Write the 32-bit word `value` at `offset`.
    ///
    /// # Returns: `Result<(), FabricError>`
    /// * `Ok(())` - The write was issued
    /// * `Err(FabricError::Offset)` - `offset` is misaligned or out of range
    fn write_word(&mut self, offset: usize, value: u32) -> Result<(), FabricError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the word at `offset` reinterpreted as a two's complement signed value.
    fn read_signed(&self, offset: usize) -> Result<i32, FabricError> {
        self.read_word(offset).map(|word| word as i32)
    }

    /// Write a signed value at `offset` as its two's complement bit pattern.
    fn write_signed(&mut self, offset: usize, value: i32) -> Result<(), FabricError> {
        self.write_word(offset, value as u32)
    }
}

impl<R: RegisterBlock + ?Sized> RegisterBlock for &mut R {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn read_word(&self, offset: usize) -> Result<u32, FabricError> {
        (**self).read_word(offset)
    }

    fn write_word(&mut self, offset: usize, value: u32) -> Result<(), FabricError> {
        (**self).write_word(offset, value)
    }
}

/// Check that a word access at `offset` is aligned and fits in a region of `len` bytes.
///
/// # Returns: `Result<(), FabricError>`
/// * `Ok(())` - The access is valid
/// * `Err(FabricError::Offset)` - The access is misaligned or would leave the region
pub fn check_word_offset(offset: usize, len: usize) -> Result<(), FabricError> {
    let in_range = offset
        .checked_add(WORD_SIZE)
        .is_some_and(|end| end <= len);
    if offset % WORD_SIZE != 0 || !in_range {
        return Err(FabricError::Offset { offset, len });
    }
    Ok(())
}

/// Register block held in process memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    words: Vec<u32>,
}

impl MemoryRegion {
    /// Create a zeroed region of `len` bytes. A trailing partial word is not addressable.
    pub fn new(len: usize) -> Self {
        MemoryRegion {
            words: vec![0; len / WORD_SIZE],
        }
    }

    /// The current contents, one entry per register.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl RegisterBlock for MemoryRegion {
    fn len(&self) -> usize {
        self.words.len() * WORD_SIZE
    }

    fn read_word(&self, offset: usize) -> Result<u32, FabricError> {
        check_word_offset(offset, self.len())?;
        let value = self.words[offset / WORD_SIZE];
        trace!("Read {value:#x} @ {offset:#x}");
        Ok(value)
    }

    fn write_word(&mut self, offset: usize, value: u32) -> Result<(), FabricError> {
        check_word_offset(offset, self.len())?;
        trace!("Write {value:#x} @ {offset:#x}");
        self.words[offset / WORD_SIZE] = value;
        Ok(())
    }
}
