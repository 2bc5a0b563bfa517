// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The model description consumed by the offload planner.
//!
//! [`ModelDescription`] is the seam between the planner and whatever
//! component owns the parsed model file: the planner asks only for
//! per-block weight sizes, the head tensors, hyperparameters, and
//! compute-graph scratch sizes. [`ModelProfile`] is the bundled concrete
//! implementation, built from explicit byte sizes through a validating
//! builder.

use crate::{Hyperparams, ModelMetaError};

/// Compute-graph scratch sizes as a function of context and batch.
///
/// Returns `(partial_offload, full_offload)` in bytes. A backend that
/// cannot size its graph returns zeroes and the planner substitutes an
/// approximation.
pub type GraphSizer = fn(context_length: u64, batch_size: u64) -> (u64, u64);

/// Read-only view of a model's weight graph.
///
/// All methods are cheap accessors over already-parsed metadata; the
/// planner calls them repeatedly inside its placement loop.
pub trait ModelDescription {
    /// Human-readable model name, used only in diagnostics.
    fn name(&self) -> &str;

    /// Architecture hyperparameters.
    fn hyperparams(&self) -> &Hyperparams;

    /// Weight bytes of transformer block `index`, if the model file
    /// recorded that block. Models with uniform blocks may only know
    /// block 0.
    fn block_weight_bytes(&self, index: usize) -> Option<u64>;

    /// Combined bytes of the non-repeating head: output normalization
    /// plus output projection, falling back to the token embedding when
    /// the model reuses it as the output matrix. Zero if the model has
    /// no distinct head tensors.
    fn head_weight_bytes(&self) -> u64;

    /// `(partial, full)` graph scratch sizes at the given context and
    /// batch. `(0, 0)` means unknown.
    fn graph_sizes(&self, context_length: u64, batch_size: u64) -> (u64, u64);
}

/// A concrete [`ModelDescription`] built from explicit byte sizes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelProfile {
    name: String,
    blocks: Vec<u64>,
    output_norm_bytes: u64,
    output_bytes: Option<u64>,
    token_embedding_bytes: u64,
    hyperparams: Hyperparams,
    #[serde(skip)]
    graph_sizer: Option<GraphSizer>,
}

impl ModelProfile {
    /// Starts building a profile for the named model.
    pub fn builder(name: impl Into<String>) -> ModelProfileBuilder {
        ModelProfileBuilder {
            name: name.into(),
            blocks: Vec::new(),
            output_norm_bytes: 0,
            output_bytes: None,
            token_embedding_bytes: 0,
            hyperparams: None,
            graph_sizer: None,
        }
    }

    /// Total weight bytes across all blocks plus the head.
    pub fn total_weight_bytes(&self) -> u64 {
        self.blocks.iter().sum::<u64>() + self.head_weight_bytes()
    }
}

impl ModelDescription for ModelProfile {
    fn name(&self) -> &str {
        &self.name
    }

    fn hyperparams(&self) -> &Hyperparams {
        &self.hyperparams
    }

    fn block_weight_bytes(&self, index: usize) -> Option<u64> {
        self.blocks.get(index).copied()
    }

    fn head_weight_bytes(&self) -> u64 {
        self.output_norm_bytes + self.output_bytes.unwrap_or(self.token_embedding_bytes)
    }

    fn graph_sizes(&self, context_length: u64, batch_size: u64) -> (u64, u64) {
        match self.graph_sizer {
            Some(sizer) => sizer(context_length, batch_size),
            None => (0, 0),
        }
    }
}

/// Builder for [`ModelProfile`]; `build()` validates the result.
#[derive(Debug, Clone)]
pub struct ModelProfileBuilder {
    name: String,
    blocks: Vec<u64>,
    output_norm_bytes: u64,
    output_bytes: Option<u64>,
    token_embedding_bytes: u64,
    hyperparams: Option<Hyperparams>,
    graph_sizer: Option<GraphSizer>,
}

impl ModelProfileBuilder {
    /// Sets the ordered per-block weight sizes in bytes.
    pub fn blocks(mut self, blocks: Vec<u64>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Sets a uniform per-block weight size repeated `count` times.
    pub fn uniform_blocks(mut self, count: usize, bytes: u64) -> Self {
        self.blocks = vec![bytes; count];
        self
    }

    /// Sets the output-normalization tensor size in bytes.
    pub fn output_norm_bytes(mut self, bytes: u64) -> Self {
        self.output_norm_bytes = bytes;
        self
    }

    /// Sets the output-projection tensor size in bytes.
    pub fn output_bytes(mut self, bytes: u64) -> Self {
        self.output_bytes = Some(bytes);
        self
    }

    /// Sets the token-embedding tensor size, used as the output
    /// projection when the model declares none of its own.
    pub fn token_embedding_bytes(mut self, bytes: u64) -> Self {
        self.token_embedding_bytes = bytes;
        self
    }

    /// Sets the architecture hyperparameters.
    pub fn hyperparams(mut self, hyperparams: Hyperparams) -> Self {
        self.hyperparams = Some(hyperparams);
        self
    }

    /// Installs a graph-scratch sizing function.
    pub fn graph_sizer(mut self, sizer: GraphSizer) -> Self {
        self.graph_sizer = Some(sizer);
        self
    }

    /// Validates and builds the profile.
    ///
    /// # Checks
    /// - At least one block.
    /// - The block list length matches the hyperparameter block count.
    /// - KV head geometry is usable (`head_count_kv > 0`).
    pub fn build(self) -> Result<ModelProfile, ModelMetaError> {
        if self.blocks.is_empty() {
            return Err(ModelMetaError::NoBlocks(self.name));
        }

        let hyperparams = self.hyperparams.unwrap_or_else(|| {
            tracing::warn!(model = %self.name, "no hyperparams supplied, defaulting geometry");
            Hyperparams {
                block_count: self.blocks.len() as u64,
                embedding_head_count_k: 0,
                embedding_head_count_v: 0,
                head_count: 1,
                head_count_kv: 1,
            }
        });

        if hyperparams.block_count as usize != self.blocks.len() {
            return Err(ModelMetaError::BlockCountMismatch {
                model: self.name,
                declared: hyperparams.block_count,
                supplied: self.blocks.len(),
            });
        }

        if hyperparams.head_count_kv == 0 {
            return Err(ModelMetaError::InvalidHyperparams {
                model: self.name,
                detail: "head_count_kv must be nonzero".into(),
            });
        }

        Ok(ModelProfile {
            name: self.name,
            blocks: self.blocks,
            output_norm_bytes: self.output_norm_bytes,
            output_bytes: self.output_bytes,
            token_embedding_bytes: self.token_embedding_bytes,
            hyperparams,
            graph_sizer: self.graph_sizer,
        })
    }
}
