// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model descriptions.

/// Errors that can occur when constructing a model description.
#[derive(Debug, thiserror::Error)]
pub enum ModelMetaError {
    /// The profile declares no transformer blocks.
    #[error("model '{0}' has no transformer blocks")]
    NoBlocks(String),

    /// The hyperparameter block count disagrees with the number of
    /// per-block sizes supplied.
    #[error("model '{model}': hyperparams declare {declared} blocks but {supplied} sizes were supplied")]
    BlockCountMismatch {
        model: String,
        declared: u64,
        supplied: usize,
    },

    /// KV-head geometry that would make the cache size undefined.
    #[error("model '{model}': {detail}")]
    InvalidHyperparams { model: String, detail: String },
}
