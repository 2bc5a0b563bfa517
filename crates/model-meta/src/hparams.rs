// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Architecture hyperparameters and the figures derived from them.
//!
//! The planner needs exactly the geometry that sizes the key/value
//! cache: block count, per-head K/V embedding widths, and the KV head
//! count. The grouped-query factor (GQA) additionally feeds the
//! fallback graph-size approximation.

/// Transformer architecture hyperparameters relevant to memory sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hyperparams {
    /// Number of repeated transformer blocks.
    pub block_count: u64,
    /// Per-head key embedding width.
    pub embedding_head_count_k: u64,
    /// Per-head value embedding width.
    pub embedding_head_count_v: u64,
    /// Attention head count.
    pub head_count: u64,
    /// Key/value head count (< `head_count` under grouped-query attention).
    pub head_count_kv: u64,
}

impl Hyperparams {
    /// Grouped-query attention factor: query heads per KV head.
    pub fn gqa(&self) -> u64 {
        if self.head_count_kv == 0 {
            return 0;
        }
        self.head_count / self.head_count_kv
    }

    /// Total key/value cache size in bytes for the given context length.
    ///
    /// Two buffers (key and value), stored at half precision:
    /// `2 * ctx * block_count * (head_dim_k + head_dim_v) * head_count_kv`.
    pub fn kv_cache_bytes(&self, context_length: u64) -> u64 {
        2 * context_length
            * self.block_count
            * (self.embedding_head_count_k + self.embedding_head_count_v)
            * self.head_count_kv
    }

    /// KV-cache share attributed to a single block.
    pub fn kv_bytes_per_block(&self, context_length: u64) -> u64 {
        if self.block_count == 0 {
            return 0;
        }
        self.kv_cache_bytes(context_length) / self.block_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llama7b_like() -> Hyperparams {
        Hyperparams {
            block_count: 32,
            embedding_head_count_k: 128,
            embedding_head_count_v: 128,
            head_count: 32,
            head_count_kv: 32,
        }
    }

    #[test]
    fn test_kv_cache_bytes() {
        let hp = llama7b_like();
        // 2 * 2048 * 32 * (128 + 128) * 32 = 1_073_741_824
        assert_eq!(hp.kv_cache_bytes(2048), 1 << 30);
    }

    #[test]
    fn test_kv_per_block() {
        let hp = llama7b_like();
        assert_eq!(hp.kv_bytes_per_block(2048), (1 << 30) / 32);
    }

    #[test]
    fn test_gqa_factor() {
        let mut hp = llama7b_like();
        assert_eq!(hp.gqa(), 1);
        hp.head_count_kv = 8;
        assert_eq!(hp.gqa(), 4);
    }

    #[test]
    fn test_gqa_zero_kv_heads() {
        let mut hp = llama7b_like();
        hp.head_count_kv = 0;
        assert_eq!(hp.gqa(), 0);
        assert_eq!(hp.kv_cache_bytes(2048), 0);
    }

    #[test]
    fn test_kv_scales_with_context() {
        let hp = llama7b_like();
        assert_eq!(hp.kv_cache_bytes(4096), 2 * hp.kv_cache_bytes(2048));
    }
}
