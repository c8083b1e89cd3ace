//! Animation primitives
//!
//! - `easing` - pure easing curves
//! - `timing` - progress and interpolation helpers
//! - `driver` - per-item animation driver used by the viewpager
//!
//! `easing` and `timing` are also used by the post body scroll animator in
//! `mars-tui`.

pub mod driver;
pub mod easing;
pub mod timing;

pub use driver::AnimationDriver;
pub use easing::EasingType;
