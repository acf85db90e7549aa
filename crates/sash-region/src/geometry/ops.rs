//! Region geometry operations
//!
//! Stretch, resize, and translate for one bound region, always clamped
//! against the supplied viewport. These are the operations the interaction
//! controller drives per frame; they are equally callable by an embedding
//! layer outside a drag.

use serde::{Deserialize, Serialize};

use crate::geometry::cache::{CacheEntry, TransformCache};
use crate::geometry::pivot::{is_center_pivot, Pivot};
use crate::math::{Rect, Vec2};
use crate::region::{RegionId, RegionState};

/// Result of a stretch request
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum StretchOutcome {
    /// Region was stretched to the pivot-implied rect
    Applied { frame: Rect },
    /// Region already matched the stretch target; cached geometry restored
    Restored { frame: Rect },
    /// Nothing to do (no geometry change and nothing cached to restore)
    Unchanged,
}

/// Box-geometry write request
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    /// Clamp width/height so the region never exceeds the viewport edge
    pub fit: bool,
    pub viewport: Option<Rect>,
}

/// Compute the rect a stretch against `pivot` would fill
///
/// Each affected axis runs from the viewport edge on the pivot's side to
/// the region's far edge; unaffected axes are untouched. A center or
/// absent pivot fills the whole viewport.
pub fn stretch_frame(frame: Rect, pivot: Option<Pivot>, viewport: Rect) -> Rect {
    if is_center_pivot(pivot) {
        return viewport;
    }
    let pivot = pivot.expect("non-center pivot");

    let mut target = frame;
    if pivot.affects_x() {
        if pivot.east_side() {
            target.width = viewport.right() - frame.x;
        } else {
            target.x = viewport.x;
            target.width = frame.right() - viewport.x;
        }
    }
    if pivot.affects_y() {
        if pivot.south_side() {
            target.height = viewport.bottom() - frame.y;
        } else {
            target.y = viewport.y;
            target.height = frame.bottom() - viewport.y;
        }
    }
    target
}

/// Stretch a region toward a pivot, or restore it when already stretched
///
/// The pre-stretch frame is cached before the first application. When the
/// computed frame structurally equals the current one (a repeated trigger
/// against the same extent), the cached frame is popped and re-applied
/// instead, giving a stretch/restore toggle.
pub fn stretch(
    region: &mut RegionState,
    id: RegionId,
    pivot: Option<Pivot>,
    viewport: Rect,
    cache: &mut TransformCache,
) -> StretchOutcome {
    let computed = stretch_frame(region.frame, pivot, viewport);

    if computed == region.frame {
        let Some(previous) = cache.take(id).and_then(|entry| entry.frame()) else {
            return StretchOutcome::Unchanged;
        };
        region.frame = previous;
        region.translation = Vec2::ZERO;
        region.stretched = None;
        return StretchOutcome::Restored { frame: previous };
    }

    cache.upsert(
        id,
        CacheEntry::from_frame(region.frame, pivot, viewport),
    );
    region.frame = computed;
    region.translation = Vec2::ZERO;
    region.positioned = true;
    region.stretched = Some(pivot.unwrap_or(Pivot::Center));
    StretchOutcome::Applied { frame: computed }
}

/// Recompute a maintained stretch after the viewport changed
///
/// Unlike [`stretch`] this never toggles and never touches the cache; it
/// keeps an already-stretched region glued to the new viewport extent.
pub fn restretch(region: &mut RegionState, viewport: Rect) -> Option<Rect> {
    let pivot = region.stretched?;
    let computed = stretch_frame(region.frame, Some(pivot), viewport);
    region.frame = computed;
    region.translation = Vec2::ZERO;
    Some(computed)
}

/// Write box geometry onto a region
///
/// With `fit` and a viewport, width/height are clamped so the region never
/// extends past the viewport edge relative to its position. Writing an
/// absolute box resets any active translation; transform and absolute
/// left/top are mutually exclusive.
pub fn resize(region: &mut RegionState, request: &ResizeRequest) {
    let mut frame = region.frame;

    if let Some(x) = request.x {
        frame.x = x;
    }
    if let Some(y) = request.y {
        frame.y = y;
    }
    if let Some(width) = request.width {
        frame.width = width;
    }
    if let Some(height) = request.height {
        frame.height = height;
    }

    if request.fit {
        if let Some(viewport) = request.viewport {
            frame.width = frame.width.min(viewport.right() - frame.x);
            frame.height = frame.height.min(viewport.bottom() - frame.y);
        }
    }

    region.frame = frame;
    region.translation = Vec2::ZERO;
    region.positioned = true;
}

/// Apply a 2D translation, clamped so the region stays inside the viewport
///
/// Returns the delta actually applied. Without a viewport the delta passes
/// through unclamped. When the region is larger than the viewport on an
/// axis, the far (right/bottom) edge wins.
pub fn translate(
    region: &mut RegionState,
    dx: f32,
    dy: f32,
    viewport: Option<Rect>,
) -> Vec2 {
    let applied = match viewport {
        Some(viewport) => {
            let base = region.visual_frame();
            let x_hi = viewport.right() - base.right();
            let x_lo = viewport.x - base.x;
            let y_hi = viewport.bottom() - base.bottom();
            let y_lo = viewport.y - base.y;
            Vec2::new(
                dx.min(x_hi).max(x_lo.min(x_hi)),
                dy.min(y_hi).max(y_lo.min(y_hi)),
            )
        }
        None => Vec2::new(dx, dy),
    };

    region.translation = region.translation + applied;
    applied
}
