// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Grouping devices by backend library.
//!
//! The fit predictor evaluates one library at a time: a model is never
//! split across, say, a CUDA card and a Vulkan card in one plan. The
//! groups produced here are mutually exclusive and exhaustive over the
//! input, and group order follows the first appearance of each library
//! in the input — the predictor tries them in exactly that order.

use crate::{DeviceInfo, DeviceLibrary};

/// Splits a device list into per-library groups.
///
/// Order is preserved twice over: groups appear in first-seen library
/// order, and devices keep their relative order within each group.
pub fn group_by_library(devices: &[DeviceInfo]) -> Vec<Vec<DeviceInfo>> {
    let mut order: Vec<DeviceLibrary> = Vec::new();
    let mut groups: Vec<Vec<DeviceInfo>> = Vec::new();

    for device in devices {
        match order.iter().position(|lib| *lib == device.library) {
            Some(idx) => groups[idx].push(device.clone()),
            None => {
                order.push(device.library);
                groups.push(vec![device.clone()]);
            }
        }
    }

    groups
}
