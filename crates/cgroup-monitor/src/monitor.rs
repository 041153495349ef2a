// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The stateful monitor: session-lock ownership and file orchestration.
//!
//! [`Monitor`] resolves the pseudo-file paths under its configured root,
//! feeds the raw payloads to the parsers in [`cpu`](crate::cpu) and
//! [`memory`](crate::memory), and owns the mutex around the CPU sampler
//! state. Read errors never escape the public operations — fields degrade
//! to 0 and the error is logged at debug level.

use crate::cgroupfs::{self, CPU_MAX, CPU_STAT, MEMORY_CURRENT, MEMORY_MAX};
use crate::cpu::{self, CpuReading, CpuSampler};
use crate::memory::{self, MemoryReading};
use crate::{MonitorConfig, MonitorError, Snapshot};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Tracks one cgroup's resource usage over time.
///
/// The CPU percentage needs a delta between two samples, so the monitor
/// keeps the previous (counter, timestamp) pair behind a mutex.
/// [`snapshot`](Monitor::snapshot) and [`cpu_percent`](Monitor::cpu_percent)
/// serialise on that lock for their entire duration;
/// [`memory_percent`](Monitor::memory_percent) is stateless and runs
/// unserialised. Separate monitors are fully independent.
///
/// # Example
/// ```no_run
/// use cgroup_monitor::Monitor;
///
/// let monitor = Monitor::new();
/// monitor.snapshot(); // first call establishes the CPU baseline
/// std::thread::sleep(std::time::Duration::from_millis(100));
/// println!("{}", monitor.snapshot().summary());
/// ```
pub struct Monitor {
    root: PathBuf,
    sampler: Mutex<CpuSampler>,
}

impl Monitor {
    /// Creates a monitor reading from the default hierarchy root,
    /// `/sys/fs/cgroup`.
    pub fn new() -> Self {
        Self::with_root(cgroupfs::DEFAULT_CGROUP_ROOT)
    }

    /// Creates a monitor reading from a custom hierarchy root (useful for
    /// tests and non-standard mounts).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sampler: Mutex::new(CpuSampler::new()),
        }
    }

    /// Creates a monitor from a [`MonitorConfig`].
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::with_root(config.cgroup_root.clone())
    }

    /// Returns the hierarchy root this monitor reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads current CPU and memory usage as one [`Snapshot`].
    ///
    /// Never fails: a sub-read error leaves the affected fields at 0. The
    /// CPU percentage is 0 on the first call, which only establishes the
    /// baseline.
    pub fn snapshot(&self) -> Snapshot {
        let mut sampler = self.lock_sampler();
        let mut snapshot = Snapshot::default();

        match self.read_cpu(&mut sampler) {
            Ok(reading) => {
                snapshot.cpu_percent = reading.percent;
                snapshot.cpu_limit_cores = reading.limit_cores;
            }
            Err(err) => tracing::debug!("CPU read failed, reporting zeros: {err}"),
        }

        match self.read_memory() {
            Ok(reading) => {
                snapshot.memory_percent = reading.percent;
                snapshot.memory_bytes = reading.current_bytes;
                snapshot.memory_limit_bytes = reading.limit_bytes;
            }
            Err(err) => tracing::debug!("memory read failed, reporting zeros: {err}"),
        }

        snapshot
    }

    /// Returns current CPU usage as a percentage of the limit.
    ///
    /// Returns 0 on the first call (the sample only establishes the
    /// baseline), when no CPU limit is set, or when the hierarchy is
    /// unreadable.
    pub fn cpu_percent(&self) -> f64 {
        let mut sampler = self.lock_sampler();
        match self.read_cpu(&mut sampler) {
            Ok(reading) => reading.percent,
            Err(err) => {
                tracing::debug!("CPU read failed, reporting 0%: {err}");
                0.0
            }
        }
    }

    /// Returns current memory usage as a percentage of the limit.
    ///
    /// Returns 0 when no memory limit is set or the hierarchy is
    /// unreadable. Stateless — runs concurrently with CPU sampling.
    pub fn memory_percent(&self) -> f64 {
        match self.read_memory() {
            Ok(reading) => reading.percent,
            Err(err) => {
                tracing::debug!("memory read failed, reporting 0%: {err}");
                0.0
            }
        }
    }

    fn lock_sampler(&self) -> MutexGuard<'_, CpuSampler> {
        // A poisoned lock means another caller panicked mid-sample; the
        // (counter, timestamp) pair is only ever written together, so the
        // state is still a valid baseline.
        match self.sampler.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Samples CPU usage against the limit. The session lock must be held
    /// by the caller.
    fn read_cpu(&self, sampler: &mut CpuSampler) -> Result<CpuReading, MonitorError> {
        let cpu_max = cgroupfs::read_file(&self.root.join(CPU_MAX))?;
        let limit_cores = cpu::parse_limit_cores(&cpu_max);
        if limit_cores <= 0.0 {
            // Unlimited: a percentage of "no limit" is meaningless.
            return Ok(CpuReading::default());
        }

        let cpu_stat = match cgroupfs::read_file(&self.root.join(CPU_STAT)) {
            Ok(content) => content,
            Err(err) => {
                // The limit is already known; surface it even though the
                // counter is unreadable.
                tracing::debug!("{CPU_STAT} unreadable, reporting limit only: {err}");
                return Ok(CpuReading {
                    percent: 0.0,
                    limit_cores,
                });
            }
        };

        let usage_usec = cpu::parse_usage_usec(&cpu_stat);
        let percent = sampler.sample(usage_usec, Instant::now(), limit_cores);

        Ok(CpuReading {
            percent,
            limit_cores,
        })
    }

    fn read_memory(&self) -> Result<MemoryReading, MonitorError> {
        let memory_max = cgroupfs::read_file(&self.root.join(MEMORY_MAX))?;
        let Some(limit_bytes) = memory::parse_limit_bytes(&memory_max) else {
            return Ok(MemoryReading::default());
        };

        let memory_current = match cgroupfs::read_file(&self.root.join(MEMORY_CURRENT)) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!("{MEMORY_CURRENT} unreadable, reporting limit only: {err}");
                return Ok(MemoryReading {
                    limit_bytes,
                    ..MemoryReading::default()
                });
            }
        };

        Ok(memory::reading(limit_bytes, &memory_current))
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor").field("root", &self.root).finish()
    }
}
