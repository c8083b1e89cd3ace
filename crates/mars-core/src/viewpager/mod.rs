//! Swipeable post deck
//!
//! [`Viewpager`] maps the router link to an index into an ordered list of
//! links and keeps, for every index, the position it should animate to. It
//! separates the *current* index (derived from the router on every
//! observation) from the *settled* index (the item resting in place, which
//! scrolls and takes gestures). The settled index only moves when the
//! animation driver reports that the current item finished sliding in, so
//! the resting role never jumps ahead of the animation.
//!
//! Only items within one step of the current index are visible; hosts mount
//! post renderers for [`Viewpager::visible_indices`] and nothing else.
//!
//! A host loop looks like:
//!
//! ```ignore
//! if pager.observe_route(router.link()) {
//!     pager.sync_driver(&mut driver, now);
//! }
//! for index in driver.update(now) {
//!     if let Settle::Applied(_) = pager.settle(index) {
//!         scroll.reset();
//!         pager.sync_driver(&mut driver, now);
//!     }
//! }
//! ```

mod machine;
mod state;

pub use machine::{Phase, Settle, Viewpager};
pub use state::{in_window, ItemState, Role};
