// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # offload-planner
//!
//! Decides how many transformer layers of a model can be placed on
//! which accelerator, how large the KV cache and compute-graph buffers
//! will be, and whether the model fits entirely in device memory or
//! spills back to the host.
//!
//! # Key Components
//!
//! - [`estimate_layer_placement`] — the layer placement estimator: one
//!   device group (single backend library) in, a full [`MemoryEstimate`]
//!   out. Never fails; missing metadata degrades to documented fallbacks
//!   and infeasible placements come back as zero-offload estimates.
//! - [`predicts_full_fit`] — the fit predictor: tries each library
//!   grouping in turn and reports whether the model loads completely,
//!   plus an estimated resident footprint. The caller feeds that signal
//!   into its own admission/eviction policy.
//! - [`MemoryEstimate`] — the immutable plan: placed layer count, graph
//!   buffer size, per-device allocations, tensor split, and overflow.
//!
//! # Concurrency
//!
//! Both operations are pure, synchronous computations over immutable
//! inputs. Free-memory figures are read once at call entry; a caller
//! that wants a current plan re-probes its devices immediately before
//! calling, and serialises planning against concurrent evictions
//! itself.
//!
//! # Example
//! ```
//! use device_inventory::{DeviceInfo, DeviceLibrary};
//! use model_meta::{Hyperparams, ModelProfile};
//! use offload_planner::{predicts_full_fit, PlacementOptions};
//!
//! let model = ModelProfile::builder("tiny")
//!     .uniform_blocks(8, 64 << 20)
//!     .output_bytes(32 << 20)
//!     .hyperparams(Hyperparams {
//!         block_count: 8,
//!         embedding_head_count_k: 64,
//!         embedding_head_count_v: 64,
//!         head_count: 16,
//!         head_count_kv: 8,
//!     })
//!     .build()
//!     .unwrap();
//!
//! let devices = vec![DeviceInfo::new("cuda:0", DeviceLibrary::Cuda, 8 << 30, 256 << 20)];
//! let fit = predicts_full_fit(&devices, &model, &[], &PlacementOptions::default());
//! assert!(fit.fits);
//! ```

mod estimate;
mod options;
mod predict;
mod report;

pub use estimate::{estimate_layer_placement, MemoryEstimate};
pub use options::{PlacementOptions, RequestedLayers};
pub use predict::{predicts_full_fit, FitPrediction};
