//! Post body scroll animation
//!
//! Combines the easing and timing atoms from `mars_core::motion` into a
//! scroll controller for the settled post.

use std::time::{Duration, Instant};

use mars_core::motion::timing::{is_complete, lerp_u16, progress};

use super::config::{EasingType, ScrollConfig, ScrollConfigExt};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call a `scroll_*` method to request movement, then `update()` each frame
/// to get the current interpolated scroll position.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Current scroll position (always up-to-date)
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation running or a delta waiting for the next update
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final position after the running animation
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Animate to an absolute position (instant when smooth scrolling is off)
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() || self.current_scroll == target {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current_scroll,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta (positive = down). Deltas requested between two
    /// updates are batched.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            self.current_scroll = clamp_scroll(i32::from(self.current_scroll) + delta, max_scroll);
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_down(&mut self, max_scroll: u16) {
        let lines = self.step_lines();
        self.scroll_by(lines, max_scroll);
    }

    pub fn scroll_up(&mut self, max_scroll: u16) {
        let lines = self.step_lines();
        self.scroll_by(-lines, max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = i32::from((viewport_height / 2).max(1));
        self.scroll_by(half_page, max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = i32::from((viewport_height / 2).max(1));
        self.scroll_by(-half_page, max_scroll);
    }

    pub fn scroll_full_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(i32::from(viewport_height), max_scroll);
    }

    pub fn scroll_full_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-i32::from(viewport_height), max_scroll);
    }

    /// Advance the animation to `now` and return the current position
    pub fn update(&mut self, max_scroll: u16, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let target = i32::from(self.target_scroll()) + self.pending_delta;
            let new_target = clamp_scroll(target, max_scroll);
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current_scroll,
                    to: new_target,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(anim) = &self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration, now));
                self.current_scroll = lerp_u16(anim.from, anim.to, t).min(max_scroll);
            }
        }

        self.current_scroll = self.current_scroll.min(max_scroll);
        self.current_scroll
    }

    /// Back to the top, dropping any animation
    pub fn reset(&mut self) {
        self.animation = None;
        self.current_scroll = 0;
        self.pending_delta = 0;
    }

    fn step_lines(&self) -> i32 {
        if self.config.is_smooth() {
            1
        } else {
            i32::from(self.config.scroll_lines.max(1))
        }
    }
}

fn clamp_scroll(value: i32, max_scroll: u16) -> u16 {
    u16::try_from(value.clamp(0, i32::from(max_scroll))).unwrap_or(max_scroll)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64) -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            easing: EasingType::Linear,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            scroll_lines: 3,
            ..Default::default()
        });

        animator.scroll_to(100, 200, Instant::now());
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());

        animator.scroll_down(200);
        assert_eq!(animator.current_scroll(), 103);
    }

    #[test]
    fn test_animation_progresses() {
        let mut animator = ScrollAnimator::new(smooth(100));
        let start = Instant::now();
        animator.scroll_to(100, 200, start);
        assert!(animator.is_animating());
        assert_eq!(animator.update(200, start + Duration::from_millis(50)), 50);
        assert_eq!(animator.update(200, start + Duration::from_millis(100)), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.update(200, Instant::now());
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_scroll_clamps_to_bounds() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_by(-5, 100);
        animator.update(100, Instant::now());
        assert_eq!(animator.current_scroll(), 0);
        assert!(!animator.needs_update());

        animator.scroll_by(500, 100);
        animator.update(100, Instant::now());
        assert_eq!(animator.target_scroll(), 100);
    }

    #[test]
    fn test_reset_returns_to_top() {
        let mut animator = ScrollAnimator::new(smooth(100));
        let start = Instant::now();
        animator.scroll_to(80, 200, start);
        animator.update(200, start + Duration::from_millis(40));
        animator.scroll_by(5, 200);
        animator.reset();
        assert_eq!(animator.current_scroll(), 0);
        assert!(!animator.needs_update());
    }
}
