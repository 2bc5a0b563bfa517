// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the device inventory.

/// Errors that can occur while interpreting device enumeration data.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The enumeration layer reported a backend library this build does
    /// not recognise.
    #[error("unknown device library '{0}'")]
    UnknownLibrary(String),
}
