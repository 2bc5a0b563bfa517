// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-meta
//!
//! Read-only descriptions of a large-language-model weight graph, as
//! consumed by the offload planner.
//!
//! Model file parsing lives elsewhere in the system; this crate defines
//! the narrow interface the planner sees — ordered per-block weight
//! sizes, the non-repeating head tensors, architecture hyperparameters,
//! and a graph-scratch-size query.
//!
//! # Key Components
//!
//! - [`ModelDescription`] — the trait the planner consumes. Implemented
//!   by whatever owns the parsed model file.
//! - [`ModelProfile`] — a concrete implementation built from explicit
//!   byte sizes, used by tooling and tests.
//! - [`Hyperparams`] — block count and KV-head geometry, with the
//!   derived KV-cache and GQA figures.
//! - [`Projector`] — an auxiliary component (e.g. a vision projector)
//!   that costs fixed bytes on the first device.
//!
//! # Example
//! ```
//! use model_meta::{Hyperparams, ModelDescription, ModelProfile};
//!
//! let profile = ModelProfile::builder("tiny")
//!     .blocks(vec![64 << 20; 8])
//!     .output_norm_bytes(1 << 20)
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
//! assert_eq!(profile.block_weight_bytes(0), Some(64 << 20));
//! assert_eq!(profile.head_weight_bytes(), (1 << 20) + (32 << 20));
//! ```

mod error;
mod hparams;
mod profile;
mod projector;

pub use error::ModelMetaError;
pub use hparams::Hyperparams;
pub use profile::{GraphSizer, ModelDescription, ModelProfile, ModelProfileBuilder};
pub use projector::Projector;
