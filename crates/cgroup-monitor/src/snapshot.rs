// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Aggregate usage snapshot.
//!
//! A [`Snapshot`] combines the CPU and memory readings into a single
//! struct. It is the primary interface for callers making backpressure or
//! scaling decisions based on their own consumption.

/// A point-in-time reading of CPU and memory consumption relative to the
/// cgroup's configured limits.
///
/// Every field independently defaults to 0 when its limit or reading is
/// unavailable, so a partially readable hierarchy still produces a usable
/// snapshot.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct Snapshot {
    /// CPU usage as a percentage of the limit since the previous sample.
    ///
    /// 0 on the first sample and when no CPU limit is set. Can exceed 100
    /// when the cgroup bursts above its nominal quota.
    pub cpu_percent: f64,

    /// Configured CPU limit in whole-core units (e.g. 0.5, 1.0, 2.0).
    /// 0 when no limit is set.
    pub cpu_limit_cores: f64,

    /// Memory usage as a percentage of the limit (0-100).
    /// 0 when no limit is set.
    pub memory_percent: f64,

    /// Current memory usage in bytes.
    pub memory_bytes: u64,

    /// Configured memory limit in bytes. 0 when no limit is set.
    pub memory_limit_bytes: u64,
}

impl Snapshot {
    /// Returns `true` if a CPU bandwidth limit is configured — i.e.
    /// whether `cpu_percent` carries a meaningful signal, as opposed to a
    /// 0 that merely means "unlimited".
    pub fn has_cpu_limit(&self) -> bool {
        self.cpu_limit_cores > 0.0
    }

    /// Returns `true` if a memory limit is configured.
    pub fn has_memory_limit(&self) -> bool {
        self.memory_limit_bytes > 0
    }

    /// Returns a one-line summary suitable for logging or CLI display.
    ///
    /// # Example output
    /// ```text
    /// CPU 42.3% of 0.50 cores, memory 25.0% (268435456 of 1073741824 bytes)
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "CPU {:.1}% of {:.2} cores, memory {:.1}% ({} of {} bytes)",
            self.cpu_percent,
            self.cpu_limit_cores,
            self.memory_percent,
            self.memory_bytes,
            self.memory_limit_bytes,
        )
    }
}
