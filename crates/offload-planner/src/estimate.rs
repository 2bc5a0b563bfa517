// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The layer placement estimator.
//!
//! Given one device group (all devices sharing a backend library) and a
//! model description, predicts how many transformer layers fit on which
//! device, sizes the KV cache and compute-graph buffers, and reports
//! how many bytes spill back to host memory.
//!
//! # Placement policy
//!
//! Blocks are assigned round-robin over the devices that still have
//! room: block `i` goes to `eligible[i mod k]` where `k` is the current
//! eligible-set size. A device that cannot hold the current block is
//! removed from the set and the same block is retried against the
//! shrunken set, so devices drop out the instant they fill while load
//! stays spread across the rest. The non-repeating head is placed as
//! one extra unit after the blocks.
//!
//! # Degradation
//!
//! There are no hard failures here. A model missing its block-0 size
//! gets a zero representative size and a warning; an unknown graph size
//! falls back to `GQA * kv / 6`; a group with no usable device (or a
//! CPU-only group) comes back as a zero-offload estimate the caller
//! reads as "fully host-resident".

use device_inventory::{human_bytes, DeviceInfo, DeviceLibrary};
use model_meta::{ModelDescription, Projector};

use crate::{PlacementOptions, RequestedLayers};

/// The predicted memory plan for one device group.
///
/// Constructed once per estimation call and never mutated afterwards;
/// the caller consumes it to make a load/evict/fallback decision.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MemoryEstimate {
    /// Number of layers predicted to fit on the group, counting the
    /// head as one layer. Zero for CPU-only or infeasible groups.
    pub layers: usize,

    /// Graph buffer size charged to each participating device.
    pub graph: u64,

    /// Bytes required on devices for the placed layers only. Always the
    /// sum of `gpu_sizes`.
    pub vram_size: u64,

    /// Bytes required to hold the whole model, overflowed layers
    /// included. Equals `vram_size` exactly when everything was placed.
    pub total_size: u64,

    /// Comma-joined per-device layer counts for multi-device groups;
    /// empty for a single device.
    pub tensor_split: String,

    /// Per-device byte allocations, one entry per device in group
    /// order. Empty when nothing was placed.
    pub gpu_sizes: Vec<u64>,

    // Diagnostic fields, rendered by `log()` and `summary()` only.
    pub(crate) library: DeviceLibrary,
    pub(crate) layers_requested: RequestedLayers,
    pub(crate) layers_model: usize,
    pub(crate) available_list: Vec<String>,
    pub(crate) kv: u64,
    pub(crate) allocations_list: Vec<String>,
    pub(crate) weights_repeating: u64,
    pub(crate) weights_head: u64,
    pub(crate) graph_full_offload: u64,
    pub(crate) graph_partial_offload: u64,
}

/// Predicts layer placement for one device group.
///
/// All `devices` must share one backend library. CPU-only groups are a
/// degenerate case that always yields a zero-layer, zero-VRAM estimate
/// without error: everything runs off-device.
pub fn estimate_layer_placement(
    devices: &[DeviceInfo],
    model: &dyn ModelDescription,
    projectors: &[Projector],
    options: &PlacementOptions,
) -> MemoryEstimate {
    let library = devices
        .first()
        .map(|d| d.library)
        .unwrap_or(DeviceLibrary::Cpu);

    let available_list: Vec<String> = devices
        .iter()
        .map(|d| human_bytes(d.free_memory))
        .collect();
    tracing::debug!(
        library = %library,
        device_count = devices.len(),
        available = ?available_list,
        "evaluating device group",
    );

    let sizing = Sizing::compute(devices, model, projectors, options, library);
    let mut placement = Placement::new(devices, model, sizing, options.requested_layers);

    placement.filter_devices();
    placement.place_blocks();
    placement.place_head();
    placement.charge_graph();
    placement.finish(library, available_list)
}

/// Fixed sizing figures derived before any placement happens.
struct Sizing {
    /// Projector bytes charged to the first eligible device.
    head_room: u64,
    /// Representative per-layer size: block 0 plus the KV share.
    layer_size: u64,
    /// Total KV cache bytes at the effective context length.
    kv: u64,
    /// KV cache share attributed to one block.
    kv_per_block: u64,
    /// Graph scratch size for a partial offload.
    graph_partial: u64,
    /// Graph scratch size when every layer is offloaded.
    graph_full: u64,
    /// Combined bytes of the non-repeating head tensors.
    head_bytes: u64,
}

impl Sizing {
    fn compute(
        devices: &[DeviceInfo],
        model: &dyn ModelDescription,
        projectors: &[Projector],
        options: &PlacementOptions,
        library: DeviceLibrary,
    ) -> Self {
        let mut context_length = options.context_length;
        let mut head_room = 0u64;
        for projector in projectors {
            head_room += projector.weight_bytes;
            if let Some(floor) = projector.context_floor() {
                context_length = context_length.max(floor);
            }
        }

        let mut layer_size = match model.block_weight_bytes(0) {
            Some(bytes) => bytes,
            None => {
                tracing::warn!(model = model.name(), "model missing block 0 weight size");
                0
            }
        };

        let hyperparams = model.hyperparams();
        let kv = hyperparams.kv_cache_bytes(context_length);
        let kv_per_block = hyperparams.kv_bytes_per_block(context_length);
        layer_size += kv_per_block;

        let batch = context_length.min(options.batch_size);
        let (mut graph_partial, mut graph_full) = model.graph_sizes(context_length, batch);
        if graph_partial == 0 {
            graph_partial = hyperparams.gqa() * kv / 6;
        }
        if graph_full == 0 {
            graph_full = graph_partial;
        }
        if library.is_unified_memory() {
            // Same physical memory either way; no partial-offload penalty.
            graph_partial = graph_full;
        } else if devices.len() > 1 {
            // A full graph is never safe to assume once weights are
            // split across devices.
            graph_full = graph_partial;
        }

        Self {
            head_room,
            layer_size,
            kv,
            kv_per_block,
            graph_partial,
            graph_full,
            head_bytes: model.head_weight_bytes(),
        }
    }

    /// The graph reservation every placement decision must leave room for.
    fn graph_reserve(&self) -> u64 {
        self.graph_partial.max(self.graph_full)
    }
}

/// The in-flight estimation state: one instance per call, owned by the
/// pipeline stages, discarded after `finish`.
struct Placement<'a> {
    devices: &'a [DeviceInfo],
    model: &'a dyn ModelDescription,
    sizing: Sizing,
    requested: RequestedLayers,
    block_count: usize,

    /// Indices into `devices` that can still accept layers.
    eligible: Vec<usize>,
    /// Running byte allocation per device (parallel to `devices`).
    allocations: Vec<u64>,
    /// Layers placed per device (parallel to `devices`).
    layer_counts: Vec<usize>,
    /// Total layers placed, head included.
    placed: usize,
    /// Bytes of repeating weights, placed or not (diagnostics).
    weights_repeating: u64,
    /// Bytes that did not fit on any device.
    overflow: u64,
    /// True once every block and the head found a device.
    fully_loaded: bool,
}

impl<'a> Placement<'a> {
    fn new(
        devices: &'a [DeviceInfo],
        model: &'a dyn ModelDescription,
        sizing: Sizing,
        requested: RequestedLayers,
    ) -> Self {
        let block_count = model.hyperparams().block_count as usize;
        Self {
            devices,
            model,
            sizing,
            requested,
            block_count,
            eligible: Vec::new(),
            allocations: vec![0; devices.len()],
            layer_counts: vec![0; devices.len()],
            placed: 0,
            weights_repeating: 0,
            overflow: 0,
            fully_loaded: false,
        }
    }

    /// Drops devices that cannot hold the graph, their own reservation,
    /// and two layers (one placed, one of slack); pre-charges the rest.
    fn filter_devices(&mut self) {
        let graph_reserve = self.sizing.graph_reserve();
        for (i, device) in self.devices.iter().enumerate() {
            let first_device_overhead = if self.eligible.is_empty() {
                self.sizing.head_room
            } else {
                0
            };
            let needed = first_device_overhead
                + graph_reserve
                + device.minimum_memory
                + 2 * self.sizing.layer_size;
            if device.free_memory < needed {
                tracing::debug!(
                    device = %device.id,
                    free = %human_bytes(device.free_memory),
                    needed = %human_bytes(needed),
                    "device has too little memory to place any layers",
                );
                continue;
            }
            self.eligible.push(i);
            self.allocations[i] += device.minimum_memory + self.sizing.layer_size;
        }

        if let Some(&first) = self.eligible.first() {
            self.allocations[first] += self.sizing.head_room;
        }
    }

    /// Round-robin placement of every transformer block.
    fn place_blocks(&mut self) {
        for block in 0..self.block_count {
            // Models with uneven blocks report per-block sizes; the
            // representative size carries over the gaps.
            if let Some(bytes) = self.model.block_weight_bytes(block) {
                self.sizing.layer_size = bytes + self.sizing.kv_per_block;
            }
            self.weights_repeating += self.sizing.layer_size;

            if let RequestedLayers::Exact(cap) = self.requested {
                if self.placed >= cap {
                    // Past the caller's target: keep sizing the blocks
                    // for overflow accounting but stop placing.
                    continue;
                }
            }

            self.place_unit(block, self.sizing.layer_size, true);
        }

        if self.placed >= self.block_count {
            self.fully_loaded = true;
        } else {
            for _ in self.placed..self.block_count {
                self.overflow += self.sizing.layer_size;
            }
        }
    }

    /// Places the non-repeating head as one extra unit, if the caller's
    /// target leaves room for it.
    fn place_head(&mut self) {
        if self.sizing.head_bytes == 0 {
            return;
        }
        match self.requested {
            RequestedLayers::Auto => {}
            RequestedLayers::Exact(cap) if self.placed < cap => {}
            RequestedLayers::Exact(_) => return,
        }

        let before = self.placed;
        self.place_unit(before, self.sizing.head_bytes, false);

        if self.placed == before {
            self.fully_loaded = false;
            self.overflow += self.sizing.head_bytes;
        }
    }

    /// One round-robin placement attempt: rotate over the eligible set
    /// at `index mod k`, optionally shrinking the set on failure and
    /// retrying the same unit until it lands or nothing is left.
    fn place_unit(&mut self, index: usize, bytes: u64, shrink_on_failure: bool) {
        let graph_reserve = self.sizing.graph_reserve();
        let mut remaining = self.eligible.len();
        while remaining > 0 {
            let slot = index % remaining;
            let device_index = self.eligible[slot];
            let used = self.allocations[device_index] + graph_reserve;
            if self.devices[device_index].free_memory > used + bytes {
                self.allocations[device_index] += bytes;
                self.layer_counts[device_index] += 1;
                self.placed += 1;
                return;
            }
            if shrink_on_failure {
                self.eligible.remove(slot);
            }
            remaining -= 1;
        }
    }

    /// Charges the graph buffer once per device that received layers:
    /// the full-offload size if everything was placed, else the partial
    /// size.
    fn charge_graph(&mut self) {
        let graph = if self.fully_loaded {
            self.sizing.graph_full
        } else {
            self.sizing.graph_partial
        };
        for i in 0..self.devices.len() {
            if self.layer_counts[i] > 0 {
                self.allocations[i] += graph;
            }
        }
    }

    fn finish(self, library: DeviceLibrary, available_list: Vec<String>) -> MemoryEstimate {
        let vram_size: u64 = self.allocations.iter().sum();
        let total_size = vram_size + self.overflow;

        let tensor_split = if self.devices.len() > 1 {
            self.layer_counts
                .iter()
                .map(|count| count.to_string())
                .collect::<Vec<_>>()
                .join(",")
        } else {
            String::new()
        };
        let allocations_list = self.allocations.iter().map(|a| human_bytes(*a)).collect();

        let mut estimate = MemoryEstimate {
            layers: 0,
            graph: 0,
            vram_size: 0,
            total_size,
            tensor_split: String::new(),
            gpu_sizes: Vec::new(),

            library,
            layers_requested: self.requested,
            layers_model: self.block_count + 1,
            available_list,
            kv: self.sizing.kv,
            allocations_list,
            weights_repeating: self.weights_repeating,
            weights_head: self.sizing.head_bytes,
            graph_full_offload: self.sizing.graph_full,
            graph_partial_offload: self.sizing.graph_partial,
        };

        if library.is_cpu() {
            return estimate;
        }
        if self.placed == 0 {
            tracing::debug!("insufficient device memory to place any model layers");
            return estimate;
        }

        estimate.layers = self.placed;
        estimate.graph = if self.fully_loaded {
            self.sizing.graph_full
        } else {
            self.sizing.graph_partial
        };
        estimate.vram_size = vram_size;
        estimate.tensor_split = tensor_split;
        estimate.gpu_sizes = self.allocations;
        estimate
    }
}
