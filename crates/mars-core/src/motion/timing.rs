//! Time calculation utilities for animations
//!
//! Every function takes the current instant explicitly so callers (and
//! tests) control the clock.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) from start time and duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation is complete
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (scroll positions)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round().clamp(0.0, u16::MAX as f64) as u16
}
