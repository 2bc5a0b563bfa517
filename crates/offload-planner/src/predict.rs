// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The fit predictor.
//!
//! Looks for a complete fit across the supplied devices so the caller
//! can decide whether currently loaded models must be evicted to make
//! room. Library groupings are tried in the order the devices were
//! enumerated and the first fitting one wins; no cross-library
//! tie-break is applied.

use device_inventory::{group_by_library, DeviceInfo};
use model_meta::{ModelDescription, Projector};

use crate::{estimate_layer_placement, PlacementOptions, RequestedLayers};

/// The predictor's verdict for one model against one device set.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct FitPrediction {
    /// True if some library grouping holds the requested layer count.
    pub fits: bool,
    /// Device-resident bytes for the fitting grouping, or the last
    /// grouping evaluated when nothing fits — an approximate sizing
    /// hint for the caller's eviction policy, not a guarantee.
    pub estimated_vram: u64,
}

/// Predicts whether the model loads completely onto some library
/// grouping of `devices`.
///
/// "Completely" means all transformer blocks plus the head under
/// [`RequestedLayers::Auto`], or the explicit count under
/// [`RequestedLayers::Exact`]; either way at least one layer must land
/// on a device.
pub fn predicts_full_fit(
    devices: &[DeviceInfo],
    model: &dyn ModelDescription,
    projectors: &[Projector],
    options: &PlacementOptions,
) -> FitPrediction {
    let needed = match options.requested_layers {
        RequestedLayers::Auto => model.hyperparams().block_count as usize + 1,
        RequestedLayers::Exact(count) => count,
    };

    let mut estimated_vram = 0;
    for group in group_by_library(devices) {
        let estimate = estimate_layer_placement(&group, model, projectors, options);
        estimated_vram = estimate.vram_size;
        if estimate.layers > 0 && estimate.layers >= needed {
            return FitPrediction {
                fits: true,
                estimated_vram,
            };
        }
    }

    FitPrediction {
        fits: false,
        estimated_vram,
    }
}
