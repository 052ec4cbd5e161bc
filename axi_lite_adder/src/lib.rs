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

//! Register-level adder on an AXI-Lite peripheral.
//!
//! The peripheral exposes two operand registers and a sum register. The sum is computed
//! combinationally in the fabric, so it is valid as soon as both operands are written and
//! no handshake or done flag is involved.

use fabric_io::error::FabricError;
use fabric_io::registers::RegisterBlock;
use log::info;

/// AXI-Lite adder register offsets.
pub mod regs {
    /// Operand A (write)
    pub const A: usize = 0x00;
    /// Operand B (write)
    pub const B: usize = 0x04;
    /// Sum (read-only)
    pub const C: usize = 0x08;
}

/// Operands written to the adder and the sum read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdderReport {
    pub a: u32,
    pub b: u32,
    pub sum: u32,
}

impl std::fmt::Display for AdderReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Computed result: {} + {} = {}", self.a, self.b, self.sum)
    }
}

/// Write `a` and `b` to the operand registers and read the sum.
///
/// # Returns: `Result<AdderReport, FabricError>`
/// * `Ok(AdderReport)` - The operands and the value of the sum register
/// * `Err(FabricError::Offset)` - The region is too small to hold the adder registers
pub fn add<R: RegisterBlock>(regs: &mut R, a: u32, b: u32) -> Result<AdderReport, FabricError> {
    info!(
        "Writing {a} to register at offset {:#x} and {b} to register at offset {:#x}",
        regs::A,
        regs::B
    );
    regs.write_word(regs::A, a)?;
    regs.write_word(regs::B, b)?;
    info!("Wrote {a} to register A and {b} to register B");

    let sum = regs.read_word(regs::C)?;
    info!("Read {sum} from register C");
    Ok(AdderReport { a, b, sum })
}
