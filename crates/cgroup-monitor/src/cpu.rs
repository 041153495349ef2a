// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CPU limit parsing and delta-based utilisation sampling.
//!
//! cgroup v2 exposes the CPU bandwidth limit in `cpu.max` as
//! `"<quota> <period>"` (both in microseconds) and cumulative consumption
//! in `cpu.stat` as a `usage_usec` counter. A single counter reading says
//! nothing about the current rate, so [`CpuSampler`] keeps the previous
//! (counter, timestamp) pair and derives
//!
//! ```text
//! cores_used = usage_delta_usec / elapsed_usec
//! percent    = cores_used / limit_cores * 100
//! ```
//!
//! The first call after construction only establishes the baseline and
//! reports 0%.

use crate::cgroupfs::UNLIMITED;
use std::time::Instant;

/// One CPU reading: percentage of the limit consumed since the previous
/// sample, plus the limit itself in whole-core units.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CpuReading {
    pub(crate) percent: f64,
    pub(crate) limit_cores: f64,
}

/// Parses `cpu.max` content into a core limit (e.g. `"50000 100000"` → 0.5).
///
/// Returns 0.0 for everything that means "no limit": the `max` sentinel,
/// a quota ≤ 0, a zero or unparsable period, or a token count other than
/// two. None of these are errors — an unlimited cgroup is a normal state.
pub(crate) fn parse_limit_cores(cpu_max: &str) -> f64 {
    let fields: Vec<&str> = cpu_max.split_whitespace().collect();
    if fields.len() != 2 {
        return 0.0;
    }
    if fields[0] == UNLIMITED {
        return 0.0;
    }

    let Ok(quota) = fields[0].parse::<i64>() else {
        return 0.0;
    };
    if quota <= 0 {
        return 0.0;
    }

    let Ok(period) = fields[1].parse::<u64>() else {
        return 0.0;
    };
    if period == 0 {
        return 0.0;
    }

    // Quota and period share a unit, so the ratio is the core count.
    // It is a real fraction: "50000 100000" means half a core.
    quota as f64 / period as f64
}

/// Extracts the cumulative `usage_usec` value from `cpu.stat` content.
///
/// The file holds `key value` lines in arbitrary order. A missing or
/// malformed `usage_usec` line yields 0 rather than an error.
pub(crate) fn parse_usage_usec(cpu_stat: &str) -> u64 {
    for line in cpu_stat.lines() {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("usage_usec") {
            continue;
        }
        let (Some(value), None) = (fields.next(), fields.next()) else {
            continue;
        };
        if let Ok(usec) = value.parse::<u64>() {
            return usec;
        }
    }
    0
}

/// Two-sample session state for the CPU percentage calculation.
///
/// The counter and its timestamp are only ever written together, so a
/// sample is always computed against a consistent baseline. `has_baseline`
/// flips to `true` on the first sample and stays true for the life of the
/// sampler.
#[derive(Debug)]
pub(crate) struct CpuSampler {
    last_usage_usec: u64,
    last_sample: Instant,
    has_baseline: bool,
}

impl CpuSampler {
    pub(crate) fn new() -> Self {
        Self {
            last_usage_usec: 0,
            last_sample: Instant::now(),
            has_baseline: false,
        }
    }

    /// Advances the sampler with a fresh counter reading and returns the
    /// percentage of `limit_cores` consumed since the previous sample.
    /// Only called with a positive core limit.
    ///
    /// The first call establishes the baseline and returns 0. A counter
    /// lower than the stored one means the cgroup was reset or recreated
    /// (container restart); the sampler re-baselines and returns 0 instead
    /// of producing a bogus value from the negative delta. Two samples
    /// within the same microsecond are indistinguishable and also report 0.
    ///
    /// Bursts above the configured quota come out as more than 100% and
    /// are not clamped; callers using this as a backpressure signal want
    /// to see them.
    pub(crate) fn sample(&mut self, usage_usec: u64, now: Instant, limit_cores: f64) -> f64 {
        if !self.has_baseline {
            self.rebaseline(usage_usec, now);
            return 0.0;
        }

        // Counter went backwards: the cgroup was reset or recreated.
        if usage_usec < self.last_usage_usec {
            self.rebaseline(usage_usec, now);
            return 0.0;
        }

        let elapsed_usec = now.duration_since(self.last_sample).as_micros() as f64;
        if elapsed_usec == 0.0 {
            return 0.0;
        }

        let usage_delta = (usage_usec - self.last_usage_usec) as f64;
        let cores_used = usage_delta / elapsed_usec;
        let percent = cores_used / limit_cores * 100.0;

        self.last_usage_usec = usage_usec;
        self.last_sample = now;

        percent
    }

    fn rebaseline(&mut self, usage_usec: u64, now: Instant) {
        self.last_usage_usec = usage_usec;
        self.last_sample = now;
        self.has_baseline = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_limit_one_core() {
        assert_eq!(parse_limit_cores("100000 100000"), 1.0);
    }

    #[test]
    fn test_parse_limit_fractional() {
        assert_eq!(parse_limit_cores("50000 100000"), 0.5);
        assert_eq!(parse_limit_cores("150000 100000"), 1.5);
        assert_eq!(parse_limit_cores("200000 100000"), 2.0);
    }

    #[test]
    fn test_parse_limit_unlimited() {
        assert_eq!(parse_limit_cores("max 100000"), 0.0);
    }

    #[test]
    fn test_parse_limit_negative_quota() {
        assert_eq!(parse_limit_cores("-100000 100000"), 0.0);
    }

    #[test]
    fn test_parse_limit_zero_quota() {
        assert_eq!(parse_limit_cores("0 100000"), 0.0);
    }

    #[test]
    fn test_parse_limit_zero_period() {
        assert_eq!(parse_limit_cores("100000 0"), 0.0);
    }

    #[test]
    fn test_parse_limit_malformed() {
        assert_eq!(parse_limit_cores(""), 0.0);
        assert_eq!(parse_limit_cores("100000"), 0.0);
        assert_eq!(parse_limit_cores("100000 100000 100000"), 0.0);
        assert_eq!(parse_limit_cores("abc 100000"), 0.0);
        assert_eq!(parse_limit_cores("100000 abc"), 0.0);
    }

    #[test]
    fn test_parse_usage_standard() {
        let stat = "usage_usec 12345678\nuser_usec 10000000\nsystem_usec 2345678";
        assert_eq!(parse_usage_usec(stat), 12345678);
    }

    #[test]
    fn test_parse_usage_not_first_line() {
        let stat = "nr_periods 100\nusage_usec 99999\nnr_throttled 5";
        assert_eq!(parse_usage_usec(stat), 99999);
    }

    #[test]
    fn test_parse_usage_missing() {
        let stat = "user_usec 10000000\nsystem_usec 2345678";
        assert_eq!(parse_usage_usec(stat), 0);
    }

    #[test]
    fn test_parse_usage_empty() {
        assert_eq!(parse_usage_usec(""), 0);
    }

    #[test]
    fn test_parse_usage_malformed_value() {
        assert_eq!(parse_usage_usec("usage_usec abc"), 0);
        assert_eq!(parse_usage_usec("usage_usec 1 2"), 0);
    }

    #[test]
    fn test_first_sample_is_zero() {
        let mut sampler = CpuSampler::new();
        let pct = sampler.sample(1_000_000, Instant::now(), 1.0);
        assert_eq!(pct, 0.0);
    }

    #[test]
    fn test_first_sample_zero_usage() {
        // A freshly created cgroup starts its counter at 0; that is still
        // a valid baseline.
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        assert_eq!(sampler.sample(0, t0, 1.0), 0.0);
        let pct = sampler.sample(50_000, t0 + Duration::from_millis(100), 1.0);
        assert!(pct > 0.0);
    }

    #[test]
    fn test_delta_exact() {
        // 100ms of CPU time over 100ms of wall clock against a 1-core
        // limit is exactly 100%.
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.sample(1_000_000, t0, 1.0);

        let pct = sampler.sample(1_100_000, t0 + Duration::from_millis(100), 1.0);
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_burst_not_clamped() {
        // A full core used against a half-core limit reads as 200%.
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.sample(0, t0, 0.5);

        let pct = sampler.sample(100_000, t0 + Duration::from_millis(100), 0.5);
        assert!((pct - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_counter_reset_rebaselines() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.sample(1_000_000, t0, 1.0);

        // Counter dropped: container restart. Report 0, adopt the new
        // baseline.
        let pct = sampler.sample(500, t0 + Duration::from_millis(10), 1.0);
        assert_eq!(pct, 0.0);

        // The next delta is computed from the post-reset counter.
        let pct = sampler.sample(10_500, t0 + Duration::from_millis(20), 1.0);
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_is_zero() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.sample(1_000, t0, 1.0);

        // Same instant: no division by zero, no state update.
        assert_eq!(sampler.sample(5_000, t0, 1.0), 0.0);

        // The stored baseline is still the first sample.
        let pct = sampler.sample(5_000, t0 + Duration::from_millis(10), 1.0);
        assert!((pct - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_cgroup_reads_zero() {
        let mut sampler = CpuSampler::new();
        let t0 = Instant::now();
        sampler.sample(1_000_000, t0, 1.0);

        let pct = sampler.sample(1_000_000, t0 + Duration::from_millis(50), 1.0);
        assert_eq!(pct, 0.0);
    }
}
