// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Diagnostic rendering of a [`MemoryEstimate`].
//!
//! Observability only: nothing here feeds back into the plan. The
//! structured record breaks the estimate into the three quantities an
//! operator actually tunes against — weights, KV cache, and graph
//! scratch — per device.

use device_inventory::human_bytes;

use crate::MemoryEstimate;

impl MemoryEstimate {
    /// Emits the estimate as one structured log record.
    pub fn log(&self) {
        tracing::info!(
            library = %self.library,
            layers.requested = ?self.layers_requested,
            layers.model = self.layers_model,
            layers.offload = self.layers,
            layers.split = %self.tensor_split,
            memory.available = ?self.available_list,
            memory.required.full = %human_bytes(self.total_size),
            memory.required.partial = %human_bytes(self.vram_size),
            memory.required.kv = %human_bytes(self.kv),
            memory.required.allocations = ?self.allocations_list,
            memory.weights.total = %human_bytes(self.weights_repeating + self.weights_head),
            memory.weights.repeating = %human_bytes(self.weights_repeating),
            memory.weights.nonrepeating = %human_bytes(self.weights_head),
            memory.graph.full = %human_bytes(self.graph_full_offload),
            memory.graph.partial = %human_bytes(self.graph_partial_offload),
            "offload estimate",
        );
    }

    /// Returns a one-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "offload to {}: {}/{} layers, {} of {} on device (graph {}, kv {}){}",
            self.library,
            self.layers,
            self.layers_model,
            human_bytes(self.vram_size),
            human_bytes(self.total_size),
            human_bytes(self.graph),
            human_bytes(self.kv),
            if self.tensor_split.is_empty() {
                String::new()
            } else {
                format!(", split {}", self.tensor_split)
            },
        )
    }
}
