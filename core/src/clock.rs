// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clock formatting

/// Remaining seconds below which a clock is flagged as running low
pub const DEFAULT_LOW_TIME_THRESHOLD: u64 = 30;

/// Format seconds as `minutes:seconds`, seconds zero-padded. Fractions are
/// dropped; negative or non-finite values read as zero.
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Strictly below the threshold
pub fn is_low_time(seconds: f64, threshold: u64) -> bool {
    seconds < threshold as f64
}
