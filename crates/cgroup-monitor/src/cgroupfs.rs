// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! cgroup v2 pseudo-file access.
//!
//! Every monitored value lives as a small text file under the unified
//! hierarchy, mounted at `/sys/fs/cgroup` on modern distributions and
//! Kubernetes v1.25+. Reads are plain blocking `std::fs` calls — each file
//! is a handful of bytes served from kernel memory, so a read normally
//! completes in well under a millisecond.

use crate::MonitorError;
use std::path::Path;

/// Default mount point of the cgroup v2 unified hierarchy.
pub(crate) const DEFAULT_CGROUP_ROOT: &str = "/sys/fs/cgroup";

/// Sentinel the kernel writes in limit files when no limit is configured.
pub(crate) const UNLIMITED: &str = "max";

/// CPU bandwidth limit file: `"<quota> <period>"` or `"max <period>"`,
/// both values in microseconds.
pub(crate) const CPU_MAX: &str = "cpu.max";

/// CPU accounting file: newline-separated `key value` pairs, containing
/// the cumulative `usage_usec` counter.
pub(crate) const CPU_STAT: &str = "cpu.stat";

/// Memory limit file: `"<bytes>"` or `"max"`.
pub(crate) const MEMORY_MAX: &str = "memory.max";

/// Current memory usage file: `"<bytes>"`.
pub(crate) const MEMORY_CURRENT: &str = "memory.current";

/// Marker file whose presence signals a usable cgroup v2 hierarchy.
pub(crate) const CONTROLLERS_FILE: &str = "cgroup.controllers";

/// Reads a cgroup pseudo-file and returns its trimmed content.
pub(crate) fn read_file(path: &Path) -> Result<String, MonitorError> {
    if !path.exists() {
        return Err(MonitorError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| MonitorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })
}

/// Returns `true` if `root` holds a cgroup v2 hierarchy, determined by
/// the presence of its `cgroup.controllers` marker file.
pub(crate) fn controllers_present(root: &Path) -> bool {
    root.join(CONTROLLERS_FILE).exists()
}
