use std::time::{Duration, Instant};

use tracing::trace;

use super::{GestureEvent, SwipeDirection};
use crate::config::GestureConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Undecided,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    origin_x: f64,
    origin_y: f64,
    start: Instant,
    axis: Axis,
    canceled: bool,
}

/// Horizontal drag recognizer with axis lock and swipe classification
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    active: Option<ActiveDrag>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Whether a press is being tracked
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start tracking a drag. A press during an active drag restarts it.
    pub fn press(&mut self, x: f64, y: f64, at: Instant) {
        self.active = Some(ActiveDrag {
            origin_x: x,
            origin_y: y,
            start: at,
            axis: Axis::Undecided,
            canceled: false,
        });
    }

    /// Pointer moved. Emits `Drag` once the gesture is locked horizontally.
    pub fn move_to(&mut self, x: f64, y: f64, _at: Instant) -> Option<GestureEvent> {
        let threshold = self.config.axis_threshold;
        let drag = self.active.as_mut()?;
        let delta_x = x - drag.origin_x;
        let delta_y = y - drag.origin_y;

        if drag.axis == Axis::Undecided && delta_x.abs().max(delta_y.abs()) >= threshold {
            drag.axis = if delta_y.abs() > delta_x.abs() {
                Axis::Vertical
            } else {
                Axis::Horizontal
            };
            trace!("drag locked to {:?}", drag.axis);
        }

        if drag.canceled || drag.axis != Axis::Horizontal {
            return None;
        }
        Some(GestureEvent::Drag { delta_x })
    }

    /// Pointer released. Emits `End` unless the drag was locked vertically.
    pub fn release(&mut self, x: f64, _y: f64, at: Instant) -> Option<GestureEvent> {
        let drag = self.active.take()?;
        if drag.axis == Axis::Vertical {
            return None;
        }

        let delta_x = x - drag.origin_x;
        let elapsed = at.saturating_duration_since(drag.start);
        let swipe = self.classify(delta_x, elapsed);

        Some(GestureEvent::End {
            delta_x,
            swipe,
            canceled: drag.canceled,
        })
    }

    /// Cancel the active drag. No more `Drag` events are emitted and the
    /// release reports `canceled: true`.
    pub fn cancel(&mut self) {
        if let Some(drag) = self.active.as_mut() {
            drag.canceled = true;
        }
    }

    fn classify(&self, delta_x: f64, elapsed: Duration) -> Option<SwipeDirection> {
        if delta_x.abs() < self.config.swipe_distance {
            return None;
        }
        if elapsed > Duration::from_millis(self.config.swipe_duration_ms) {
            return None;
        }
        let elapsed_ms = (elapsed.as_secs_f64() * 1000.0).max(1.0);
        if delta_x.abs() / elapsed_ms < self.config.swipe_velocity {
            return None;
        }
        SwipeDirection::from_delta(delta_x)
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
