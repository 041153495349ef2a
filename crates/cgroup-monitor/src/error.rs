// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for cgroup monitoring.

/// Errors that can occur when reading the cgroup v2 hierarchy.
///
/// These stay internal to the component that produced them: every public
/// percentage-returning operation absorbs the error and reports 0 instead,
/// since a monitoring signal must degrade rather than abort its caller.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Failed to read a cgroup pseudo-file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// The expected cgroup path does not exist (e.g., a cgroup v1 host,
    /// or no unified hierarchy mounted).
    #[error("cgroup path not found: {path} — is cgroup v2 mounted?")]
    NotAvailable { path: String },

    /// Invalid monitor configuration.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
