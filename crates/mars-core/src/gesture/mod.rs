//! Drag gesture recognition
//!
//! Turns raw pointer press/move/release samples into [`GestureEvent`]s: a
//! running horizontal delta while dragging, and a final classification on
//! release.

mod recognizer;

pub use recognizer::GestureRecognizer;

/// Physical horizontal direction of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved toward the left edge (reveals the next item)
    Left,
    /// Finger moved toward the right edge (reveals the previous item)
    Right,
}

impl SwipeDirection {
    /// Sign of the horizontal movement: -1 for left, +1 for right
    pub fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// Direction of a horizontal delta, `None` for zero
    pub fn from_delta(delta_x: f64) -> Option<Self> {
        if delta_x < 0.0 {
            Some(Self::Left)
        } else if delta_x > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Event produced by the recognizer for a bound drag region
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Drag in progress, `delta_x` measured from the press position
    Drag { delta_x: f64 },
    /// Pointer released
    End {
        delta_x: f64,
        /// Set when the drag crossed the swipe thresholds
        swipe: Option<SwipeDirection>,
        canceled: bool,
    },
}

impl GestureEvent {
    /// A completed, non-canceled swipe, as produced by the keyboard
    pub fn swipe(direction: SwipeDirection) -> Self {
        Self::End {
            delta_x: 0.0,
            swipe: Some(direction),
            canceled: false,
        }
    }
}
