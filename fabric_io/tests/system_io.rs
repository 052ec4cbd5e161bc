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
use fabric_io::system_io::{fs_read, open_device};
use googletest::prelude::*;
use rstest::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[gtest]
#[rstest]
#[case::not_found(
    "bad_input",
    err(displays_as(contains_substring("No such file or directory")))
)]
#[case::is_dir("/etc/", err(displays_as(contains_substring("Is a directory"))))]
fn test_fs_read_failures<M: for<'a> Matcher<&'a std::result::Result<String, FabricError>>>(
    #[case] path_str: &str,
    #[case] condition: M,
) {
    let r = fs_read(Path::new(path_str));
    expect_that!(&r, condition);
}

#[gtest]
fn test_fs_read_contents() {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    write!(file, "R5\nL3\n").expect("failed to write temp file");
    assert_eq!(fs_read(file.path()).unwrap(), "R5\nL3\n");
}

#[gtest]
fn test_open_device_failure_names_the_device() {
    let r = open_device(Path::new("/nonexistent/uio0"));
    expect_that!(
        &r,
        err(displays_as(contains_substring("/nonexistent/uio0")))
    );
}
