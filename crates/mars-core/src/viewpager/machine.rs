use std::time::Instant;

use tracing::{debug, trace, warn};

use super::state::{in_window, relative_offset, ItemState, Role};
use crate::gesture::GestureEvent;
use crate::motion::AnimationDriver;
use crate::router::Router;

/// Where the deck is in its settle cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current item is also the settled one
    Idle { settled: usize },
    /// The current item is still sliding in
    Transitioning {
        current: usize,
        settled: Option<usize>,
    },
    /// The router link is not part of the deck; nothing is shown
    Detached,
}

/// Outcome of a settle notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The item became the settled one; the host resets its scroll to the top
    Applied(usize),
    /// Stale, duplicate, or for a non-current item
    Ignored,
}

/// Swipeable deck over an ordered list of links
#[derive(Debug, Clone)]
pub struct Viewpager {
    links: Vec<String>,
    /// Position of the router link in `links`, re-derived on every observation
    current: Option<usize>,
    /// Item in the resting, scrollable position
    settled: Option<usize>,
    items: Vec<ItemState>,
    dragging: bool,
}

impl Viewpager {
    /// Mount the deck on `links` with the router at `current_link`.
    /// The current item starts settled.
    pub fn mount(links: Vec<String>, current_link: &str) -> Self {
        let current = links.iter().position(|l| l == current_link);
        if current.is_none() {
            warn!("viewpager mounted on {} which is not in the deck", current_link);
        }
        let mut pager = Self {
            items: vec![ItemState::default(); links.len()],
            links,
            current,
            settled: current,
            dragging: false,
        };
        pager.recompute();
        debug!(
            "viewpager mounted with {} links at {:?}",
            pager.links.len(),
            pager.current
        );
        pager
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn settled_index(&self) -> Option<usize> {
        self.settled
    }

    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&ItemState> {
        self.items.get(index)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn phase(&self) -> Phase {
        match (self.current, self.settled) {
            (None, _) => Phase::Detached,
            (Some(current), Some(settled)) if current == settled => Phase::Idle { settled },
            (Some(current), settled) => Phase::Transitioning { current, settled },
        }
    }

    /// Indices that are mounted, in ascending order
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.visible)
            .map(|(i, _)| i)
    }

    /// Only the settled item takes gesture input
    pub fn accepts_gesture(&self, index: usize) -> bool {
        self.current.is_some() && self.settled == Some(index)
    }

    /// Observe the router link. Returns whether the current index changed.
    pub fn observe_route(&mut self, link: &str) -> bool {
        let next = self.links.iter().position(|l| l == link);
        if next == self.current {
            return false;
        }
        if next.is_none() {
            warn!("route {} left the deck, hiding all items", link);
        }
        debug!("viewpager current {:?} -> {:?}", self.current, next);
        self.current = next;
        self.recompute();
        true
    }

    /// An item's animation reached its target. Only the current item, and
    /// only while it is not yet settled, becomes settled.
    pub fn settle(&mut self, index: usize) -> Settle {
        match self.current {
            Some(current) if current == index && self.settled != Some(current) => {
                debug!("viewpager settled {:?} -> {}", self.settled, current);
                self.settled = Some(current);
                // A drag on the previous settled item can no longer end here
                self.dragging = false;
                self.recompute();
                Settle::Applied(current)
            }
            _ => {
                trace!(
                    "ignoring settle for {} (current {:?}, settled {:?})",
                    index,
                    self.current,
                    self.settled
                );
                Settle::Ignored
            }
        }
    }

    /// Handle a gesture on the item at `source`. A non-canceled swipe issues
    /// a router navigation; returns the index navigated to.
    pub fn handle_gesture<R: Router + ?Sized>(
        &mut self,
        source: usize,
        event: GestureEvent,
        router: &mut R,
    ) -> Option<usize> {
        if !self.accepts_gesture(source) {
            trace!("ignoring gesture on non-settled item {}", source);
            return None;
        }
        let current = self.current?;

        match event {
            GestureEvent::Drag { delta_x } => {
                self.dragging = true;
                for item in self.items.iter_mut().filter(|item| item.visible) {
                    item.drag_delta = delta_x;
                }
                None
            }
            GestureEvent::End { swipe, canceled, .. } => {
                self.dragging = false;
                for item in &mut self.items {
                    item.drag_delta = 0.0;
                }
                if canceled {
                    return None;
                }
                let direction = swipe?;
                let target = self.swipe_target(current, direction.sign());
                if target == current {
                    trace!("swipe absorbed at edge {}", current);
                    return None;
                }
                debug!("swipe {:?} from {} to {}", direction, current, target);
                router.navigate(&self.links[target]);
                Some(target)
            }
        }
    }

    /// Push every item's target and visibility into the driver
    pub fn sync_driver(&self, driver: &mut AnimationDriver, now: Instant) {
        if driver.len() != self.items.len() {
            self.mount_driver(driver);
            return;
        }
        for (i, item) in self.items.iter().enumerate() {
            if item.visible {
                driver.set_target(i, f64::from(item.offset), now);
            } else {
                driver.hide(i);
            }
        }
    }

    /// Reset the driver to the resting layout, with nothing animating
    pub fn mount_driver(&self, driver: &mut AnimationDriver) {
        driver.reset(self.items.len());
        let anchor = self.current.unwrap_or(0);
        for (i, item) in self.items.iter().enumerate() {
            driver.place(i, f64::from(relative_offset(i, anchor)));
            if !item.visible {
                driver.hide(i);
            }
        }
    }

    fn swipe_target(&self, current: usize, sign: i32) -> usize {
        let last = self.links.len().saturating_sub(1);
        if sign < 0 {
            (current + 1).min(last)
        } else if sign > 0 {
            current.saturating_sub(1)
        } else {
            current
        }
    }

    fn recompute(&mut self) {
        let current = self.current;
        let settled = self.settled;
        for (i, item) in self.items.iter_mut().enumerate() {
            item.drag_delta = 0.0;
            item.role = if settled == Some(i) {
                Role::Settled
            } else {
                Role::Transitioning
            };
            match current {
                Some(c) if in_window(i, c) => {
                    item.visible = true;
                    item.offset = relative_offset(i, c);
                }
                _ => item.visible = false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransitionConfig;
    use crate::gesture::SwipeDirection;
    use crate::motion::EasingType;
    use std::time::Duration;

    /// Router that records navigation calls without applying them
    #[derive(Default)]
    struct RecordingRouter {
        link: String,
        calls: Vec<String>,
    }

    impl Router for RecordingRouter {
        fn link(&self) -> &str {
            &self.link
        }

        fn navigate(&mut self, link: &str) {
            self.calls.push(link.to_string());
            self.link = link.to_string();
        }
    }

    fn links(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/p{}/", i)).collect()
    }

    fn visible(pager: &Viewpager) -> Vec<usize> {
        pager.visible_indices().collect()
    }

    fn offsets(pager: &Viewpager) -> Vec<(usize, i32)> {
        pager
            .visible_indices()
            .map(|i| (i, pager.items()[i].offset))
            .collect()
    }

    fn assert_invariants(pager: &Viewpager) {
        let expected: Vec<usize> = match pager.current_index() {
            Some(c) => (0..pager.len()).filter(|&i| i.abs_diff(c) <= 1).collect(),
            None => Vec::new(),
        };
        assert_eq!(visible(pager), expected, "windowing invariant");
        let settled = pager.items().iter().filter(|i| i.is_settled()).count();
        assert!(settled <= 1, "more than one settled item");
    }

    fn swipe_left() -> GestureEvent {
        GestureEvent::swipe(SwipeDirection::Left)
    }

    fn swipe_right() -> GestureEvent {
        GestureEvent::swipe(SwipeDirection::Right)
    }

    #[test]
    fn test_mount_scenario() {
        let pager = Viewpager::mount(links(3), "/p0/");
        assert_eq!(pager.current_index(), Some(0));
        assert_eq!(pager.settled_index(), Some(0));
        assert_eq!(offsets(&pager), vec![(0, 0), (1, 1)]);
        assert_eq!(pager.phase(), Phase::Idle { settled: 0 });
        assert!(pager.items()[0].is_settled());
        assert_invariants(&pager);
    }

    #[test]
    fn test_route_change_defers_settle() {
        let mut pager = Viewpager::mount(links(3), "/p0/");
        assert!(pager.observe_route("/p1/"));
        assert_eq!(offsets(&pager), vec![(0, -1), (1, 0), (2, 1)]);
        assert_eq!(pager.settled_index(), Some(0));
        assert_eq!(
            pager.phase(),
            Phase::Transitioning {
                current: 1,
                settled: Some(0)
            }
        );
        assert_eq!(pager.items()[1].role, Role::Transitioning);

        // The outgoing item finishing first changes nothing
        assert_eq!(pager.settle(0), Settle::Ignored);
        assert_eq!(pager.settle(1), Settle::Applied(1));
        assert_eq!(pager.settled_index(), Some(1));
        assert!(pager.items()[1].is_settled());
        assert!(!pager.items()[0].is_settled());
        assert_invariants(&pager);
    }

    #[test]
    fn test_same_route_is_not_a_change() {
        let mut pager = Viewpager::mount(links(3), "/p1/");
        assert!(!pager.observe_route("/p1/"));
    }

    #[test]
    fn test_swipe_navigates_once() {
        let mut pager = Viewpager::mount(links(3), "/p1/");
        let mut router = RecordingRouter::default();
        let event = GestureEvent::End {
            delta_x: -80.0,
            swipe: Some(SwipeDirection::Left),
            canceled: false,
        };
        assert_eq!(pager.handle_gesture(1, event, &mut router), Some(2));
        assert_eq!(router.calls, vec!["/p2/"]);
    }

    #[test]
    fn test_canceled_swipe_does_not_navigate() {
        let mut pager = Viewpager::mount(links(3), "/p1/");
        let mut router = RecordingRouter::default();
        let event = GestureEvent::End {
            delta_x: -80.0,
            swipe: Some(SwipeDirection::Left),
            canceled: true,
        };
        assert_eq!(pager.handle_gesture(1, event, &mut router), None);
        assert!(router.calls.is_empty());
    }

    #[test]
    fn test_single_item_deck_never_navigates() {
        let mut pager = Viewpager::mount(links(1), "/p0/");
        let mut router = RecordingRouter::default();
        assert_eq!(pager.handle_gesture(0, swipe_left(), &mut router), None);
        assert_eq!(pager.handle_gesture(0, swipe_right(), &mut router), None);
        assert!(router.calls.is_empty());
    }

    #[test]
    fn test_clamp_law() {
        for len in 1..5 {
            for start in 0..len {
                for event in [swipe_left(), swipe_right()] {
                    let mut pager = Viewpager::mount(links(len), &format!("/p{}/", start));
                    let mut router = RecordingRouter::default();
                    if let Some(target) = pager.handle_gesture(start, event, &mut router) {
                        assert!(target < len);
                        assert_eq!(target.abs_diff(start), 1);
                        assert_eq!(router.calls.len(), 1);
                    } else {
                        assert!(router.calls.is_empty());
                    }
                }
            }
        }

        // Edges absorb the swipe
        let mut router = RecordingRouter::default();
        let mut first = Viewpager::mount(links(3), "/p0/");
        assert_eq!(first.handle_gesture(0, swipe_right(), &mut router), None);
        let mut last = Viewpager::mount(links(3), "/p2/");
        assert_eq!(last.handle_gesture(2, swipe_left(), &mut router), None);
        assert!(router.calls.is_empty());
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut pager = Viewpager::mount(links(3), "/p0/");
        pager.observe_route("/p1/");
        assert_eq!(pager.settle(1), Settle::Applied(1));
        assert_eq!(pager.settle(1), Settle::Ignored);
        assert_eq!(pager.settled_index(), Some(1));
    }

    #[test]
    fn test_stale_settle_is_rejected() {
        let mut pager = Viewpager::mount(links(4), "/p0/");
        pager.observe_route("/p1/");
        pager.observe_route("/p2/");
        // Late completion for the superseded target
        assert_eq!(pager.settle(1), Settle::Ignored);
        assert_eq!(pager.settled_index(), Some(0));
        assert_eq!(pager.settle(2), Settle::Applied(2));
    }

    #[test]
    fn test_drag_follows_pointer_and_resets() {
        let mut pager = Viewpager::mount(links(3), "/p1/");
        let mut router = RecordingRouter::default();
        pager.handle_gesture(1, GestureEvent::Drag { delta_x: -12.5 }, &mut router);
        assert!(pager.is_dragging());
        assert!(pager
            .items()
            .iter()
            .all(|item| item.drag_delta == -12.5));

        let end = GestureEvent::End {
            delta_x: -3.0,
            swipe: None,
            canceled: false,
        };
        assert_eq!(pager.handle_gesture(1, end, &mut router), None);
        assert!(!pager.is_dragging());
        assert!(pager.items().iter().all(|item| item.drag_delta == 0.0));
        assert!(router.calls.is_empty());
    }

    #[test]
    fn test_invariants_hold_mid_drag_and_mid_settle() {
        for old_settles_first in [true, false] {
            let mut pager = Viewpager::mount(links(5), "/p2/");
            let mut router = RecordingRouter::default();
            assert_invariants(&pager);

            pager.handle_gesture(2, GestureEvent::Drag { delta_x: 7.0 }, &mut router);
            assert!(pager.is_dragging());
            assert_invariants(&pager);

            // Route moves while the pointer is still down
            assert!(pager.observe_route("/p3/"));
            assert_invariants(&pager);
            pager.handle_gesture(2, GestureEvent::Drag { delta_x: 9.0 }, &mut router);
            assert_invariants(&pager);
            assert_eq!(pager.settled_index(), Some(2));

            let order = if old_settles_first { [2, 3] } else { [3, 2] };
            for index in order {
                pager.settle(index);
                assert_invariants(&pager);
            }
            assert_eq!(pager.phase(), Phase::Idle { settled: 3 });
            assert_eq!(visible(&pager), vec![2, 3, 4]);
            assert!(!pager.is_dragging());

            // The release on the old item arrives after it lost the settled role
            let end = GestureEvent::End {
                delta_x: 9.0,
                swipe: None,
                canceled: false,
            };
            assert_eq!(pager.handle_gesture(2, end, &mut router), None);
            assert!(!pager.is_dragging());
            assert_invariants(&pager);
            assert!(router.calls.is_empty());
        }
    }

    #[test]
    fn test_transitioning_items_reject_gestures() {
        let mut pager = Viewpager::mount(links(3), "/p0/");
        pager.observe_route("/p1/");
        let mut router = RecordingRouter::default();
        assert!(!pager.accepts_gesture(1));
        assert_eq!(pager.handle_gesture(1, swipe_left(), &mut router), None);
        pager.handle_gesture(1, GestureEvent::Drag { delta_x: 5.0 }, &mut router);
        assert!(pager.items().iter().all(|item| item.drag_delta == 0.0));

        // The settled item still does, and swipes relative to the current index
        assert!(pager.accepts_gesture(0));
        assert_eq!(pager.handle_gesture(0, swipe_left(), &mut router), Some(2));
    }

    #[test]
    fn test_route_outside_deck_hides_everything() {
        let mut pager = Viewpager::mount(links(3), "/p1/");
        assert!(pager.observe_route("/about-us/"));
        assert_eq!(pager.phase(), Phase::Detached);
        assert!(visible(&pager).is_empty());

        let mut router = RecordingRouter::default();
        assert_eq!(pager.handle_gesture(1, swipe_left(), &mut router), None);
        assert_eq!(pager.settle(1), Settle::Ignored);

        // Coming back resumes from the kept settled index
        assert!(pager.observe_route("/p1/"));
        assert_eq!(pager.phase(), Phase::Idle { settled: 1 });
        assert_invariants(&pager);
    }

    #[test]
    fn test_mount_outside_deck() {
        let mut pager = Viewpager::mount(links(3), "/nope/");
        assert_eq!(pager.phase(), Phase::Detached);
        assert!(visible(&pager).is_empty());
        pager.observe_route("/p2/");
        assert_eq!(
            pager.phase(),
            Phase::Transitioning {
                current: 2,
                settled: None
            }
        );
        assert_eq!(pager.settle(2), Settle::Applied(2));
    }

    #[test]
    fn test_empty_deck() {
        let mut pager = Viewpager::mount(Vec::new(), "/");
        let mut router = RecordingRouter::default();
        assert!(pager.is_empty());
        assert_eq!(pager.phase(), Phase::Detached);
        assert_eq!(pager.handle_gesture(0, swipe_left(), &mut router), None);
        assert_eq!(pager.settle(0), Settle::Ignored);
    }

    #[test]
    fn test_invariants_hold_over_route_and_settle_sequences() {
        let len = 5;
        for a in 0..len {
            for b in 0..=len {
                for c in 0..len {
                    let mut pager = Viewpager::mount(links(len), &format!("/p{}/", a));
                    assert_invariants(&pager);
                    // b == len is a link outside the deck
                    pager.observe_route(&format!("/p{}/", b));
                    assert_invariants(&pager);
                    pager.settle(a);
                    pager.settle(b);
                    assert_invariants(&pager);
                    pager.observe_route(&format!("/p{}/", c));
                    assert_invariants(&pager);
                    pager.settle(c);
                    assert_eq!(pager.settled_index(), Some(c));
                    assert_invariants(&pager);
                }
            }
        }
    }

    #[test]
    fn test_driver_round_trip() {
        let config = TransitionConfig {
            enabled: true,
            duration_ms: 100,
            easing: EasingType::Linear,
        };
        let mut driver = AnimationDriver::new(&config);
        let mut pager = Viewpager::mount(links(3), "/p0/");
        pager.mount_driver(&mut driver);
        assert_eq!(driver.value(0), Some(0.0));
        assert_eq!(driver.value(1), Some(1.0));
        assert!(!driver.is_visible(2));
        assert!(!driver.is_animating());

        let start = Instant::now();
        pager.observe_route("/p1/");
        pager.sync_driver(&mut driver, start);
        assert_eq!(driver.target(2), Some(1.0));

        let mut applied = Vec::new();
        for index in driver.update(start + Duration::from_millis(100)) {
            if let Settle::Applied(i) = pager.settle(index) {
                applied.push(i);
            }
        }
        assert_eq!(applied, vec![1]);
        assert_eq!(pager.phase(), Phase::Idle { settled: 1 });

        // Role changes alone do not restart any animation
        pager.sync_driver(&mut driver, start + Duration::from_millis(100));
        assert!(!driver.is_animating());
    }
}
