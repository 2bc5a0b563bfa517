// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime options for a placement estimate.

/// How many layers the caller wants placed on devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedLayers {
    /// Use all available device space.
    Auto,
    /// Place at most this many layers; the rest stay host-resident.
    Exact(usize),
}

impl RequestedLayers {
    /// Maps the conventional signed layer-count knob, where any
    /// negative value means "auto".
    pub fn from_sentinel(count: i64) -> Self {
        if count < 0 {
            Self::Auto
        } else {
            Self::Exact(count as usize)
        }
    }
}

impl Default for RequestedLayers {
    fn default() -> Self {
        Self::Auto
    }
}

/// Options for a single placement estimate.
///
/// Assumed validated upstream; the planner does not second-guess the
/// context length or batch size it is handed.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct PlacementOptions {
    /// Requested context length in tokens.
    pub context_length: u64,
    /// Batch size in tokens. Graph sizing clamps this to the context
    /// length.
    pub batch_size: u64,
    /// Layer-count target.
    #[serde(default)]
    pub requested_layers: RequestedLayers,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            context_length: 2048,
            batch_size: 512,
            requested_layers: RequestedLayers::Auto,
        }
    }
}
