// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for sampling throughput against a fixture hierarchy.
//!
//! Each operation is a couple of pseudo-file reads plus parsing; the
//! numbers here put a figure on "cheap enough to call from a hot
//! backpressure check".

use cgroup_monitor::Monitor;
use criterion::{criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    let dir = std::env::temp_dir().join("cgroup_monitor_bench");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("cgroup.controllers"), "cpu memory").unwrap();
    std::fs::write(dir.join("cpu.max"), "100000 100000").unwrap();
    std::fs::write(dir.join("cpu.stat"), "usage_usec 1000000").unwrap();
    std::fs::write(dir.join("memory.max"), "1073741824").unwrap();
    std::fs::write(dir.join("memory.current"), "536870912").unwrap();
    dir
}

fn bench_snapshot(c: &mut Criterion) {
    let monitor = Monitor::with_root(fixture());
    monitor.snapshot(); // establish the baseline
    c.bench_function("snapshot", |b| b.iter(|| monitor.snapshot()));
}

fn bench_cpu_percent(c: &mut Criterion) {
    let monitor = Monitor::with_root(fixture());
    monitor.cpu_percent();
    c.bench_function("cpu_percent", |b| b.iter(|| monitor.cpu_percent()));
}

fn bench_memory_percent(c: &mut Criterion) {
    let monitor = Monitor::with_root(fixture());
    c.bench_function("memory_percent", |b| b.iter(|| monitor.memory_percent()));
}

criterion_group!(benches, bench_snapshot, bench_cpu_percent, bench_memory_percent);
criterion_main!(benches);
