// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: poll the container's own usage once a second.
//!
//! Run inside any container (or cgroup-limited unit) to watch consumption
//! relative to the configured limits:
//!
//! ```bash
//! cargo run -p cgroup-monitor --example watch
//! ```

use cgroup_monitor::Monitor;
use std::time::Duration;

fn main() {
    // Initialise tracing so degraded reads are visible at debug level.
    tracing_subscriber::fmt().with_env_filter("debug").init();

    if !cgroup_monitor::available() {
        eprintln!("cgroup v2 not available on this system");
        std::process::exit(1);
    }

    let monitor = Monitor::new();

    // The first sample only establishes the CPU baseline.
    monitor.snapshot();

    for _ in 0..10 {
        std::thread::sleep(Duration::from_secs(1));
        let usage = monitor.snapshot();
        println!("{}", usage.summary());
    }
}
