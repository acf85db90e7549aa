//! Engine-side state for the bound region
//!
//! The engine never touches the host's render tree directly. The binding
//! layer seeds a [`RegionState`] from the host element's current offsets,
//! the geometry operations mutate it, and the binding syncs it back out.

use serde::{Deserialize, Serialize};

use crate::geometry::Pivot;
use crate::math::{Rect, Vec2};

/// Unique region identifier, assigned by the embedding layer
pub type RegionId = u64;

/// Mutable box-geometry mirror for one bound region
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionState {
    /// Absolute box geometry (left/top/width/height)
    pub frame: Rect,
    /// Active 2D translation, exclusive with a freshly written frame
    pub translation: Vec2,
    /// Whether first-time absolute positioning has been applied
    pub positioned: bool,
    /// Grabbed indicator, set during center-pivot moves
    pub grabbed: bool,
    /// Pivot this region is currently stretched against, if any
    pub stretched: Option<Pivot>,
}

impl RegionState {
    /// Create a region state seeded from the host's current offsets
    pub fn seeded(frame: Rect) -> Self {
        Self {
            frame,
            translation: Vec2::ZERO,
            positioned: true,
            grabbed: false,
            stretched: None,
        }
    }

    /// Effective on-screen box: frame shifted by the active translation
    #[inline]
    pub fn visual_frame(&self) -> Rect {
        self.frame.translate(self.translation)
    }
}
