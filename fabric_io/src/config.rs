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

/// The prefix of UIO character devices. The device index is appended, giving e.g. `/dev/uio4`.
pub static UIO_DEVICE_PREFIX: &str = "/dev/uio";

/// The driver-decided location of uio objects. Typically `/sys/class/uio/`.
pub static UIO_CLASS_DIR: &str = "/sys/class/uio/";

/// Location of the size attribute of the first memory map, relative to `UIO_CLASS_DIR/uio<N>/`.
pub static UIO_MAP0_SIZE: &str = "maps/map0/size";

/// The prefix of GPIO character devices. The chip index is appended, giving e.g. `/dev/gpiochip0`.
pub static GPIO_CHIP_PREFIX: &str = "/dev/gpiochip";

/// Number of lines every GPIO bus must expose, one per bit of a 32-bit word.
pub const GPIO_LINE_COUNT: u32 = 32;

/// Consumer label attached to GPIO line requests, visible in `gpioinfo`.
pub static GPIO_CONSUMER: &str = "fabric-tools";
