// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # device-inventory
//!
//! Read-only descriptions of the compute devices available to the
//! offload planner.
//!
//! This crate does **not** probe hardware. Device enumeration and
//! free-memory sampling live elsewhere in the system; the planner only
//! consumes the resulting [`DeviceInfo`] records. Free-memory figures
//! are a point-in-time reading — the caller re-probes immediately
//! before planning if it wants an up-to-date answer.
//!
//! # Key Components
//!
//! - [`DeviceInfo`] — one accelerator: identity, backend library, free
//!   memory, and the backend's minimum reservation.
//! - [`DeviceLibrary`] — the backend tag used to group devices. A
//!   planning call only ever sees devices of a single library.
//! - [`group_by_library`] — splits a mixed device list into per-library
//!   groups, preserving first-seen order.
//! - [`human_bytes`] — binary-unit rendering for log output.
//!
//! # Example
//! ```
//! use device_inventory::{group_by_library, DeviceInfo, DeviceLibrary};
//!
//! let devices = vec![
//!     DeviceInfo::new("cuda:0", DeviceLibrary::Cuda, 8 << 30, 256 << 20),
//!     DeviceInfo::new("cuda:1", DeviceLibrary::Cuda, 8 << 30, 256 << 20),
//!     DeviceInfo::new("cpu", DeviceLibrary::Cpu, 32 << 30, 0),
//! ];
//! let groups = group_by_library(&devices);
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].len(), 2);
//! ```

mod bytes;
mod device;
mod error;
mod group;

pub use bytes::human_bytes;
pub use device::{DeviceInfo, DeviceLibrary};
pub use error::DeviceError;
pub use group::group_by_library;
