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

use fabric_io::error::FabricError;
use fabric_io::registers::RegisterBlock;
use fabric_io::uio::UioDevice;
use googletest::prelude::*;
use rstest::*;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// A regular file standing in for the device node, plus a fake sysfs size attribute.
struct FakeUio {
    _dir: TempDir,
    device: NamedTempFile,
    size: std::path::PathBuf,
}

fn fake_uio(device_len: u64, size_contents: &str) -> FakeUio {
    let dir = TempDir::new().expect("failed to create temp dir");
    let device = NamedTempFile::new().expect("failed to create backing file");
    device
        .as_file()
        .set_len(device_len)
        .expect("failed to size backing file");
    let size = dir.path().join("size");
    fs::File::create(&size)
        .and_then(|mut f| f.write_all(size_contents.as_bytes()))
        .expect("failed to write size attribute");
    FakeUio {
        _dir: dir,
        device,
        size,
    }
}

#[gtest]
fn maps_region_with_size_from_attribute() {
    let fake = fake_uio(0x1000, "0x00001000\n");
    let region = UioDevice::with_paths(fake.device.path(), &fake.size)
        .map()
        .expect("mapping failed");
    assert_eq!(region.len(), 0x1000);
    assert_eq!(region.path(), fake.device.path());
}

#[gtest]
fn words_reach_the_backing_device() {
    let fake = fake_uio(0x1000, "0x1000");
    {
        let mut region = UioDevice::with_paths(fake.device.path(), &fake.size)
            .map()
            .expect("mapping failed");
        region.write_word(0x00, 5).unwrap();
        region.write_word(0x04, 3).unwrap();
        region.write_signed(0x08, -3).unwrap();
        assert_eq!(region.read_word(0x04).unwrap(), 3);
        assert_eq!(region.read_signed(0x08).unwrap(), -3);
    }

    let bytes = fs::read(fake.device.path()).expect("failed to read back device");
    let words: Vec<u32> = bytes[..12]
        .chunks_exact(4)
        .map(|chunk| u32::from_ne_bytes(chunk.try_into().unwrap()))
        .collect();
    assert_eq!(words, vec![5, 3, 0xFFFF_FFFD]);
}

#[gtest]
#[rstest]
#[case::misaligned(0x02)]
#[case::past_end(0x1000)]
fn rejects_out_of_region_access(#[case] offset: usize) {
    let fake = fake_uio(0x1000, "0x1000");
    let mut region = UioDevice::with_paths(fake.device.path(), &fake.size)
        .map()
        .expect("mapping failed");
    expect_that!(
        &region.read_word(offset),
        err(displays_as(contains_substring("FabricError::Offset")))
    );
    expect_that!(
        &region.write_word(offset, 1),
        err(displays_as(contains_substring("FabricError::Offset")))
    );
}

#[gtest]
fn missing_device_is_an_open_error() {
    let fake = fake_uio(0x1000, "0x1000");
    let result = UioDevice::with_paths("/nonexistent/uio99", &fake.size).map();
    expect_that!(
        &result,
        err(displays_as(contains_substring("FabricError::IOOpen")))
    );
}

#[gtest]
fn missing_size_attribute_is_a_read_error() {
    let fake = fake_uio(0x1000, "0x1000");
    let result = UioDevice::with_paths(fake.device.path(), "/nonexistent/size").map();
    assert!(matches!(result, Err(FabricError::IORead { .. })));
}

#[gtest]
#[rstest]
#[case::garbage("not a size")]
#[case::zero("0x0")]
fn unusable_size_attribute_is_rejected(#[case] contents: &str) {
    let fake = fake_uio(0x1000, contents);
    let result = UioDevice::with_paths(fake.device.path(), &fake.size).map();
    expect_that!(
        &result,
        err(displays_as(contains_substring("FabricError::MapSize")))
    );
}

#[gtest]
fn device_without_mmap_support_is_a_mapping_error() {
    let fake = fake_uio(0x1000, "0x1000");
    let result = UioDevice::with_paths("/dev/null", &fake.size).map();
    expect_that!(
        &result,
        err(displays_as(contains_substring("FabricError::Mmap")))
    );
}
