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

//! Adder wired to three GPIO buses.
//!
//! Operand A and operand B are driven onto two 32-line chips configured as outputs; the
//! sum is sampled from a third chip configured as inputs. Each bus carries its word
//! least significant bit first.

use fabric_io::error::FabricError;
use fabric_io::gpio::{LineBus, require_bus_width};
use log::info;

/// Operands driven onto the buses and the sum sampled back.
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

/// Drive `a` onto `bus_a` and `b` onto `bus_b`, then sample the sum from `bus_c`.
///
/// All three buses are checked for exactly 32 lines before any line is requested. Both
/// output requests stay alive while the sum is sampled and are released on return.
///
/// # Returns: `Result<AdderReport, FabricError>`
/// * `Ok(AdderReport)` - The operands and the sampled sum
/// * `Err(FabricError::LineCount)` - A chip does not expose exactly 32 lines
/// * `Err(FabricError::Gpio)` - A chip could not be opened or its lines requested
pub fn add<A, B, C>(
    bus_a: &A,
    bus_b: &B,
    bus_c: &C,
    a: u32,
    b: u32,
) -> Result<AdderReport, FabricError>
where
    A: LineBus,
    B: LineBus,
    C: LineBus,
{
    require_bus_width(bus_a)?;
    require_bus_width(bus_b)?;
    require_bus_width(bus_c)?;

    info!(
        "Writing {a} to {:?} and {b} to {:?}",
        bus_a.path(),
        bus_b.path()
    );
    let _hold_a = bus_a.drive(a)?;
    info!("Wrote {a} to {:?}", bus_a.path());
    let _hold_b = bus_b.drive(b)?;
    info!("Wrote {b} to {:?}", bus_b.path());

    let sum = bus_c.sample()?;
    info!("Read {sum} from {:?}", bus_c.path());
    Ok(AdderReport { a, b, sum })
}
