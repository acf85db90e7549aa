//! Core geometry types for the region engine
//!
//! These types provide the 2D math used for region positioning,
//! sizing, and viewport containment.

mod vec2;
mod size;
mod rect;

pub use vec2::Vec2;
pub use size::Size;
pub use rect::Rect;
