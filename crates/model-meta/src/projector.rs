// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Auxiliary projector components.
//!
//! A projector (e.g. the vision tower of a multimodal model) is not
//! part of the repeating weight graph: its weights are loaded in full
//! on the first device of the group, ahead of any transformer blocks.

/// An auxiliary component loaded alongside the main model.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Projector {
    /// Identifier used in diagnostics.
    pub name: String,
    /// Weight bytes, charged in full to the first device.
    pub weight_bytes: u64,
    /// Multimodal projectors need room for image embeddings and force
    /// the effective context length up to at least 2048.
    pub multimodal: bool,
}

impl Projector {
    /// Creates a multimodal projector (the common case).
    pub fn multimodal(name: impl Into<String>, weight_bytes: u64) -> Self {
        Self {
            name: name.into(),
            weight_bytes,
            multimodal: true,
        }
    }
}

/// Minimum context length any multimodal projector imposes.
pub(crate) const MULTIMODAL_CONTEXT_FLOOR: u64 = 2048;

impl Projector {
    /// The context-length floor this projector imposes, if any.
    pub fn context_floor(&self) -> Option<u64> {
        self.multimodal.then_some(MULTIMODAL_CONTEXT_FLOOR)
    }
}
