//! Per-item animation driver
//!
//! Holds one track per item index. Each track animates its value toward the
//! last target it was given and reports, exactly once, when that target is
//! reached. A new target replaces the old one in place, starting from the
//! current value, and the old target is never reported.

use std::time::{Duration, Instant};

use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};
use crate::config::TransitionConfig;

#[derive(Debug, Clone, Copy)]
struct Tween {
    start: Instant,
    from: f64,
}

#[derive(Debug, Clone, Default)]
struct Track {
    value: f64,
    /// Current target; `None` while hidden
    target: Option<f64>,
    tween: Option<Tween>,
    /// The current target has not been reported as reached yet
    pending_settle: bool,
}

impl Track {
    fn is_visible(&self) -> bool {
        self.target.is_some()
    }
}

/// Animation driver for the viewpager items
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    tracks: Vec<Track>,
    duration: Duration,
    easing: EasingType,
    enabled: bool,
}

impl AnimationDriver {
    pub fn new(config: &TransitionConfig) -> Self {
        Self {
            tracks: Vec::new(),
            duration: Duration::from_millis(config.duration_ms),
            easing: config.easing,
            enabled: config.enabled && config.duration_ms > 0,
        }
    }

    /// Drop every track and create `len` hidden ones at rest
    pub fn reset(&mut self, len: usize) {
        self.tracks.clear();
        self.tracks.resize_with(len, Track::default);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Put a track at `value` immediately, visible and at rest, with nothing
    /// to report
    pub fn place(&mut self, index: usize, value: f64) {
        if let Some(track) = self.tracks.get_mut(index) {
            track.value = value;
            track.target = Some(value);
            track.tween = None;
            track.pending_settle = false;
        }
    }

    /// Retarget a track. Returns `false` when the track already heads for
    /// `target` (not a new assignment) or the index is out of range.
    pub fn set_target(&mut self, index: usize, target: f64, now: Instant) -> bool {
        let enabled = self.enabled;
        let Some(track) = self.tracks.get_mut(index) else {
            return false;
        };
        if track.target == Some(target) {
            return false;
        }

        // A track coming back from hidden enters from the neighboring slot
        // instead of crossing the whole deck
        if !track.is_visible() {
            track.value = track.value.clamp(target - 1.0, target + 1.0);
        }

        track.target = Some(target);
        track.pending_settle = true;
        if !enabled || track.value == target {
            track.value = target;
            track.tween = None;
        } else {
            track.tween = Some(Tween {
                start: now,
                from: track.value,
            });
        }
        true
    }

    /// Hide a track. Its value is kept; a pending report is dropped.
    pub fn hide(&mut self, index: usize) {
        if let Some(track) = self.tracks.get_mut(index) {
            track.target = None;
            track.tween = None;
            track.pending_settle = false;
        }
    }

    /// Current interpolated value
    pub fn value(&self, index: usize) -> Option<f64> {
        self.tracks.get(index).map(|t| t.value)
    }

    /// Current target (`None` for hidden or unknown tracks)
    pub fn target(&self, index: usize) -> Option<f64> {
        self.tracks.get(index).and_then(|t| t.target)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.tracks.get(index).is_some_and(Track::is_visible)
    }

    /// Whether any track is moving or has a report due
    pub fn is_animating(&self) -> bool {
        self.tracks
            .iter()
            .any(|t| t.tween.is_some() || t.pending_settle)
    }

    /// Advance every track to `now` and return the indices whose target was
    /// reached, in index order
    pub fn update(&mut self, now: Instant) -> Vec<usize> {
        let mut settled = Vec::new();

        for (index, track) in self.tracks.iter_mut().enumerate() {
            let Some(target) = track.target else {
                continue;
            };

            if let Some(tween) = track.tween {
                if is_complete(tween.start, self.duration, now) {
                    track.value = target;
                    track.tween = None;
                } else {
                    let t = self.easing.apply(progress(tween.start, self.duration, now));
                    track.value = lerp(tween.from, target, t);
                }
            }

            if track.tween.is_none() && track.pending_settle {
                track.pending_settle = false;
                settled.push(index);
            }
        }

        settled
    }
}
