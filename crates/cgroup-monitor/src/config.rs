// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Monitor configuration loaded from TOML or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! cgroup_root = "/sys/fs/cgroup"
//! ```

use crate::cgroupfs::DEFAULT_CGROUP_ROOT;
use crate::MonitorError;
use std::path::{Path, PathBuf};

/// Configuration for a [`Monitor`](crate::Monitor).
///
/// The only knob is the hierarchy root: production code keeps the default
/// mount point, tests and non-standard hosts point it elsewhere. The root
/// is fixed at construction time; there is no dynamic reconfiguration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MonitorConfig {
    /// Root of the cgroup v2 unified hierarchy to read from.
    #[serde(default = "default_root")]
    pub cgroup_root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_CGROUP_ROOT)
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cgroup_root: default_root(),
        }
    }
}

impl MonitorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, MonitorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, MonitorError> {
        toml::from_str(toml_str)
            .map_err(|e| MonitorError::ConfigError(format!("TOML parse error: {e}")))
    }
}
