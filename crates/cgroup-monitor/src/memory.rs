// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Memory limit and usage reading.
//!
//! Stateless, unlike CPU sampling: `memory.current` over `memory.max` is a
//! plain ratio with no baseline involved. Both files hold a single integer
//! byte count; `memory.max` may instead hold the `max` sentinel when no
//! limit is configured.

use crate::cgroupfs::UNLIMITED;

/// One memory reading. All fields are 0 when no limit is configured.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MemoryReading {
    pub(crate) percent: f64,
    pub(crate) current_bytes: u64,
    pub(crate) limit_bytes: u64,
}

/// Parses `memory.max` content into a byte limit.
///
/// Returns `None` for the `max` sentinel or unparsable content — both mean
/// "no limit", not a failure.
pub(crate) fn parse_limit_bytes(memory_max: &str) -> Option<u64> {
    if memory_max == UNLIMITED {
        return None;
    }
    memory_max.parse::<u64>().ok()
}

/// Builds a reading from a parsed limit and raw `memory.current` content.
///
/// An unparsable usage value degrades to 0% while still surfacing the
/// limit. A limit of 0 bytes also reads as 0% — the ratio is undefined and
/// every field of the output contract defaults to 0.
pub(crate) fn reading(limit_bytes: u64, memory_current: &str) -> MemoryReading {
    let Ok(current_bytes) = memory_current.parse::<u64>() else {
        return MemoryReading {
            limit_bytes,
            ..MemoryReading::default()
        };
    };

    let percent = if limit_bytes == 0 {
        0.0
    } else {
        current_bytes as f64 / limit_bytes as f64 * 100.0
    };

    MemoryReading {
        percent,
        current_bytes,
        limit_bytes,
    }
}
