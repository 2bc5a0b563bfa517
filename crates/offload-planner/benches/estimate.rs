// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the layer placement estimator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use device_inventory::{DeviceInfo, DeviceLibrary};
use model_meta::{Hyperparams, ModelProfile};
use offload_planner::{estimate_layer_placement, PlacementOptions};

const MIB: u64 = 1 << 20;

fn large_model() -> ModelProfile {
    ModelProfile::builder("bench-80b")
        .uniform_blocks(80, 220 * MIB)
        .output_norm_bytes(MIB)
        .output_bytes(120 * MIB)
        .hyperparams(Hyperparams {
            block_count: 80,
            embedding_head_count_k: 128,
            embedding_head_count_v: 128,
            head_count: 64,
            head_count_kv: 8,
        })
        .build()
        .unwrap()
}

fn devices(count: usize) -> Vec<DeviceInfo> {
    (0..count)
        .map(|i| DeviceInfo::new(format!("cuda:{i}"), DeviceLibrary::Cuda, 24 << 30, 256 * MIB))
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let model = large_model();
    let options = PlacementOptions::default();

    for device_count in [1usize, 2, 4] {
        let group = devices(device_count);
        c.bench_function(&format!("estimate_80_blocks_{device_count}_devices"), |b| {
            b.iter(|| {
                estimate_layer_placement(
                    black_box(&group),
                    black_box(&model),
                    &[],
                    black_box(&options),
                )
            })
        });
    }
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
