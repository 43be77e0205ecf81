// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rounds `value` toward negative infinity and converts it to `isize`.
///
/// Out-of-range values saturate and NaN maps to `0`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Line indices are intentionally isize; out-of-range values are saturated."
)]
#[inline]
pub(crate) fn floor_to_isize(value: f64) -> isize {
    let truncated = value as isize;
    // The cast truncates toward zero.
    if value < 0.0 && (truncated as f64) > value {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}

/// Rounds `value` toward positive infinity and converts it to `isize`.
///
/// Out-of-range values saturate and NaN maps to `0`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Line indices are intentionally isize; out-of-range values are saturated."
)]
#[inline]
pub(crate) fn ceil_to_isize(value: f64) -> isize {
    let truncated = value as isize;
    if value > 0.0 && (truncated as f64) < value {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}
