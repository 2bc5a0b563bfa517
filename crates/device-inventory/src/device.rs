// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device descriptors consumed by the offload planner.
//!
//! A [`DeviceInfo`] is a snapshot, not a live handle: the free-memory
//! figure is whatever the enumeration layer read at probe time. The
//! planner never mutates a device record.

use crate::DeviceError;

/// The backend library a device is driven by.
///
/// Devices are only ever grouped and compared within one library; a
/// single planning call never mixes libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceLibrary {
    /// Host CPU. A degenerate "device": the planner never offloads to it.
    Cpu,
    /// NVIDIA CUDA.
    Cuda,
    /// AMD ROCm/HIP.
    Rocm,
    /// Apple Metal (unified memory).
    Metal,
    /// Vulkan compute.
    Vulkan,
    /// Intel oneAPI / SYCL.
    OneApi,
}

impl DeviceLibrary {
    /// Parses a library tag from an enumeration string.
    ///
    /// Accepts the canonical snake_case names and common aliases
    /// (`"hip"`, `"sycl"`).
    pub fn from_str_loose(s: &str) -> Result<Self, DeviceError> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            "rocm" | "hip" => Ok(Self::Rocm),
            "metal" => Ok(Self::Metal),
            "vulkan" => Ok(Self::Vulkan),
            "oneapi" | "one_api" | "sycl" => Ok(Self::OneApi),
            other => Err(DeviceError::UnknownLibrary(other.to_string())),
        }
    }

    /// Returns the canonical lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
            Self::Rocm => "rocm",
            Self::Metal => "metal",
            Self::Vulkan => "vulkan",
            Self::OneApi => "oneapi",
        }
    }

    /// Returns `true` for the host-CPU pseudo-library.
    pub fn is_cpu(&self) -> bool {
        matches!(self, Self::Cpu)
    }

    /// Returns `true` for unified-memory backends.
    ///
    /// On a unified-memory device the compute graph lives in the same
    /// physical memory whether the offload is partial or full, so there
    /// is no partial-offload graph penalty.
    pub fn is_unified_memory(&self) -> bool {
        matches!(self, Self::Metal)
    }
}

impl std::fmt::Display for DeviceLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-in-time description of one compute device.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeviceInfo {
    /// Stable identifier from the enumeration layer (e.g. `"cuda:0"`).
    pub id: String,
    /// Backend library driving this device.
    pub library: DeviceLibrary,
    /// Free memory in bytes at probe time.
    pub free_memory: u64,
    /// Bytes the backend reserves on this device regardless of workload
    /// (context structures, CUDA primary context, etc.).
    pub minimum_memory: u64,
}

impl DeviceInfo {
    /// Creates a device record.
    pub fn new(
        id: impl Into<String>,
        library: DeviceLibrary,
        free_memory: u64,
        minimum_memory: u64,
    ) -> Self {
        Self {
            id: id.into(),
            library,
            free_memory,
            minimum_memory,
        }
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "{} [{}]: {} free, {} reserved",
            self.id,
            self.library,
            crate::human_bytes(self.free_memory),
            crate::human_bytes(self.minimum_memory),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_loose() {
        assert_eq!(DeviceLibrary::from_str_loose("cuda").unwrap(), DeviceLibrary::Cuda);
        assert_eq!(DeviceLibrary::from_str_loose("HIP").unwrap(), DeviceLibrary::Rocm);
        assert_eq!(DeviceLibrary::from_str_loose("Metal").unwrap(), DeviceLibrary::Metal);
        assert_eq!(DeviceLibrary::from_str_loose("sycl").unwrap(), DeviceLibrary::OneApi);
        assert!(DeviceLibrary::from_str_loose("webgpu").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for lib in [
            DeviceLibrary::Cpu,
            DeviceLibrary::Cuda,
            DeviceLibrary::Rocm,
            DeviceLibrary::Metal,
            DeviceLibrary::Vulkan,
            DeviceLibrary::OneApi,
        ] {
            let s = format!("{lib}");
            assert_eq!(DeviceLibrary::from_str_loose(&s).unwrap(), lib);
        }
    }

    #[test]
    fn test_unified_memory() {
        assert!(DeviceLibrary::Metal.is_unified_memory());
        assert!(!DeviceLibrary::Cuda.is_unified_memory());
        assert!(!DeviceLibrary::Cpu.is_unified_memory());
    }

    #[test]
    fn test_is_cpu() {
        assert!(DeviceLibrary::Cpu.is_cpu());
        assert!(!DeviceLibrary::Vulkan.is_cpu());
    }

    #[test]
    fn test_summary() {
        let d = DeviceInfo::new("cuda:0", DeviceLibrary::Cuda, 8 << 30, 256 << 20);
        let s = d.summary();
        assert!(s.contains("cuda:0"));
        assert!(s.contains("8.0 GiB"));
        assert!(s.contains("256.0 MiB"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let d = DeviceInfo::new("rocm:1", DeviceLibrary::Rocm, 1024, 64);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"rocm\""));
        let back: DeviceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, d.id);
        assert_eq!(back.library, d.library);
        assert_eq!(back.free_memory, d.free_memory);
    }
}
