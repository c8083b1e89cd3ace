//! Smooth scrolling for the post body
//!
//! - `config` - `ScrollConfig` helpers (the type lives in `mars-core`)
//! - `animation` - the scroll controller
//!
//! The settled post owns the scroll position. When a new post settles the
//! host calls [`ScrollAnimator::reset`] so it starts at the top.

pub mod animation;
pub mod config;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
