// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! End-to-end placement scenarios exercising the estimator and the
//! predictor together through the public API.

use device_inventory::{DeviceInfo, DeviceLibrary};
use model_meta::{Hyperparams, ModelProfile, Projector};
use offload_planner::{
    estimate_layer_placement, predicts_full_fit, PlacementOptions, RequestedLayers,
};

const MIB: u64 = 1 << 20;

fn llama_like(block_count: u64, block_mib: u64) -> ModelProfile {
    ModelProfile::builder("llama-like")
        .uniform_blocks(block_count as usize, block_mib * MIB)
        .output_norm_bytes(MIB)
        .output_bytes(50 * MIB)
        .hyperparams(Hyperparams {
            block_count,
            embedding_head_count_k: 128,
            embedding_head_count_v: 128,
            head_count: 32,
            head_count_kv: 8,
        })
        .build()
        .unwrap()
}

fn cuda(id: &str, free_mib: u64) -> DeviceInfo {
    DeviceInfo::new(id, DeviceLibrary::Cuda, free_mib * MIB, 200 * MIB)
}

#[test]
fn full_pipeline_single_gpu_fit() {
    let model = llama_like(32, 100);
    let devices = vec![cuda("cuda:0", 24_000)];
    let options = PlacementOptions::default();

    let estimate = estimate_layer_placement(&devices, &model, &[], &options);
    assert_eq!(estimate.layers, 33);
    assert_eq!(estimate.vram_size, estimate.total_size);
    assert_eq!(estimate.gpu_sizes.iter().sum::<u64>(), estimate.vram_size);
    assert!(estimate.tensor_split.is_empty());

    let fit = predicts_full_fit(&devices, &model, &[], &options);
    assert!(fit.fits);
    assert_eq!(fit.estimated_vram, estimate.vram_size);
}

#[test]
fn partial_offload_reports_overflow() {
    let model = llama_like(32, 100);
    let devices = vec![cuda("cuda:0", 3000)];
    let options = PlacementOptions::default();

    let estimate = estimate_layer_placement(&devices, &model, &[], &options);
    assert!(estimate.layers > 0);
    assert!(estimate.layers < 33);
    assert!(estimate.vram_size < estimate.total_size);

    let fit = predicts_full_fit(&devices, &model, &[], &options);
    assert!(!fit.fits);
}

#[test]
fn tensor_split_across_four_gpus() {
    let model = llama_like(32, 100);
    let devices: Vec<DeviceInfo> = (0..4).map(|i| cuda(&format!("cuda:{i}"), 8000)).collect();

    let estimate =
        estimate_layer_placement(&devices, &model, &[], &PlacementOptions::default());
    let split: Vec<usize> = estimate
        .tensor_split
        .split(',')
        .map(|s| s.parse().unwrap())
        .collect();
    assert_eq!(split.len(), 4);
    assert_eq!(split.iter().sum::<usize>(), estimate.layers);
    assert_eq!(estimate.layers, 33);

    // Round-robin keeps identical devices within one layer of each other,
    // aside from the head landing somewhere.
    let min = split.iter().min().unwrap();
    let max = split.iter().max().unwrap();
    assert!(max - min <= 1);
}

#[test]
fn mixed_library_inventory_picks_fitting_group() {
    let model = llama_like(16, 50);
    let devices = vec![
        DeviceInfo::new("cpu", DeviceLibrary::Cpu, 64 << 30, 0),
        cuda("cuda:0", 12_000),
    ];
    let fit = predicts_full_fit(&devices, &model, &[], &PlacementOptions::default());
    assert!(fit.fits);
    assert!(fit.estimated_vram > 0);
}

#[test]
fn projector_and_context_floor_shrink_placement() {
    let model = llama_like(32, 100);
    let device = cuda("cuda:0", 4800);
    let options = PlacementOptions {
        context_length: 512,
        ..PlacementOptions::default()
    };

    let bare = estimate_layer_placement(&[device.clone()], &model, &[], &options);
    let with_projector = estimate_layer_placement(
        &[device],
        &model,
        &[Projector::multimodal("vision-tower", 900 * MIB)],
        &options,
    );

    // Projector weights plus the floored (larger) KV cache cost layers.
    assert_eq!(bare.layers, 33);
    assert!(with_projector.layers < bare.layers);
}

#[test]
fn explicit_request_caps_placement() {
    let model = llama_like(32, 10);
    let devices = vec![cuda("cuda:0", 16_000)];

    for requested in [1usize, 8, 16, 33] {
        let options = PlacementOptions {
            requested_layers: RequestedLayers::Exact(requested),
            ..PlacementOptions::default()
        };
        let estimate = estimate_layer_placement(&devices, &model, &[], &options);
        assert_eq!(estimate.layers, requested);

        let fit = predicts_full_fit(&devices, &model, &[], &options);
        assert!(fit.fits);
    }
}

#[test]
fn estimate_is_deterministic() {
    let model = llama_like(32, 100);
    let devices = vec![cuda("cuda:0", 2200), cuda("cuda:1", 2200)];
    let options = PlacementOptions::default();

    let a = estimate_layer_placement(&devices, &model, &[], &options);
    let b = estimate_layer_placement(&devices, &model, &[], &options);
    assert_eq!(a.layers, b.layers);
    assert_eq!(a.vram_size, b.vram_size);
    assert_eq!(a.total_size, b.total_size);
    assert_eq!(a.tensor_split, b.tensor_split);
    assert_eq!(a.gpu_sizes, b.gpu_sizes);
}

#[test]
fn summary_renders_through_public_api() {
    let model = llama_like(16, 50);
    let estimate = estimate_layer_placement(
        &[cuda("cuda:0", 12_000)],
        &model,
        &[],
        &PlacementOptions::default(),
    );
    let s = estimate.summary();
    assert!(s.contains("cuda"));
    assert!(s.contains("layers"));
}
