// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cgroup-monitor
//!
//! Lets a containerised process read its own cgroup v2 resource usage as
//! percentages of the limits imposed on it — not host-wide figures.
//!
//! Built for workloads that need to react to their own consumption:
//! backpressure triggers, autoscaling signals, self-reported utilisation
//! metrics. Reads directly from the unified hierarchy mounted at
//! `/sys/fs/cgroup`, the default on modern distributions and
//! Kubernetes v1.25+.
//!
//! # Monitored Values
//! - **CPU** — percentage of the `cpu.max` bandwidth limit consumed since
//!   the previous sample, plus the limit in whole-core units. Needs two
//!   samples; the first call returns 0 and establishes the baseline.
//! - **Memory** — `memory.current` as a percentage of `memory.max`,
//!   stateless.
//!
//! # Graceful Degradation
//! A monitoring signal must not take down the workload it watches. Every
//! public operation degrades to 0 instead of failing: missing files,
//! malformed content, and absent limits all read as zeros, and swallowed
//! read errors are logged at debug level.
//!
//! # Example
//! ```no_run
//! use cgroup_monitor::Monitor;
//!
//! if !cgroup_monitor::available() {
//!     eprintln!("cgroup v2 not available");
//!     return;
//! }
//!
//! let monitor = Monitor::new();
//! monitor.snapshot(); // first sample establishes the CPU baseline
//! std::thread::sleep(std::time::Duration::from_millis(100));
//!
//! let usage = monitor.snapshot();
//! println!("{}", usage.summary());
//! ```

mod cgroupfs;
mod config;
mod cpu;
mod error;
mod memory;
mod monitor;
mod snapshot;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use monitor::Monitor;
pub use snapshot::Snapshot;

use std::path::Path;

/// Returns `true` if the cgroup v2 unified hierarchy is mounted at the
/// default location, `/sys/fs/cgroup`.
pub fn available() -> bool {
    available_at(cgroupfs::DEFAULT_CGROUP_ROOT)
}

/// Returns `true` if `root` holds a usable cgroup v2 hierarchy.
///
/// A pure existence check of the `cgroup.controllers` marker file; no
/// monitor state is involved.
pub fn available_at(root: impl AsRef<Path>) -> bool {
    cgroupfs::controllers_present(root.as_ref())
}
