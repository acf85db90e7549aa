//! Viewport edge detection

use serde::Serialize;

use crate::math::{Rect, Vec2};

#[inline]
fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Per-edge flag set; only edges that tripped serialize
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EdgeFlags {
    #[serde(skip_serializing_if = "is_false")]
    pub top: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub left: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub bottom: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub right: bool,
}

impl EdgeFlags {
    /// No edge tripped
    pub const NONE: EdgeFlags = EdgeFlags {
        top: false,
        left: false,
        bottom: false,
        right: false,
    };

    /// Whether any edge tripped
    #[inline]
    pub fn any(&self) -> bool {
        self.top || self.left || self.bottom || self.right
    }
}

/// Edge-proximity threshold in pixels, scaled for the device pixel ratio
#[inline]
pub fn edge_threshold(device_pixel_ratio: f32) -> f32 {
    (device_pixel_ratio * 2.0).ceil()
}

/// Which viewport edges the pointer is within `threshold` pixels of
pub fn pointer_edges(pos: Vec2, viewport: Rect, threshold: f32) -> EdgeFlags {
    EdgeFlags {
        top: pos.y <= viewport.y + threshold,
        left: pos.x <= viewport.x + threshold,
        bottom: pos.y >= viewport.bottom() - threshold,
        right: pos.x >= viewport.right() - threshold,
    }
}

/// Which viewport edges the frame crosses, after shifting it by the
/// given offsets
///
/// Returns per-edge flags rather than a single boolean so callers can
/// react to each boundary independently.
pub fn outside_viewport(frame: Rect, viewport: Rect, x_offset: f32, y_offset: f32) -> EdgeFlags {
    let shifted = frame.translate(Vec2::new(x_offset, y_offset));
    EdgeFlags {
        top: shifted.y < viewport.y,
        left: shifted.x < viewport.x,
        bottom: shifted.bottom() > viewport.bottom(),
        right: shifted.right() > viewport.right(),
    }
}

/// Whether the frame lies entirely outside the viewport
#[inline]
pub fn fully_outside(frame: Rect, viewport: Rect) -> bool {
    frame.disjoint_from(&viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    #[test]
    fn test_edge_threshold_scales_with_pixel_ratio() {
        assert!((edge_threshold(1.0) - 2.0).abs() < 0.001);
        assert!((edge_threshold(1.5) - 3.0).abs() < 0.001);
        assert!((edge_threshold(2.0) - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_pointer_edges() {
        let threshold = edge_threshold(1.0);

        let center = pointer_edges(Vec2::new(500.0, 400.0), VIEWPORT, threshold);
        assert!(!center.any());

        let near_left = pointer_edges(Vec2::new(1.0, 400.0), VIEWPORT, threshold);
        assert!(near_left.left);
        assert!(!near_left.right);

        let corner = pointer_edges(Vec2::new(999.0, 799.0), VIEWPORT, threshold);
        assert!(corner.right);
        assert!(corner.bottom);
        assert!(!corner.top);
    }

    #[test]
    fn test_outside_viewport_reports_crossed_edges() {
        let inside = outside_viewport(Rect::new(100.0, 100.0, 200.0, 150.0), VIEWPORT, 0.0, 0.0);
        assert!(!inside.any());

        let over_right = outside_viewport(Rect::new(900.0, 100.0, 200.0, 150.0), VIEWPORT, 0.0, 0.0);
        assert!(over_right.right);
        assert!(!over_right.left);

        // Offsets shift the frame before testing
        let shifted = outside_viewport(Rect::new(100.0, 100.0, 200.0, 150.0), VIEWPORT, -150.0, 0.0);
        assert!(shifted.left);
    }

    #[test]
    fn test_fully_outside() {
        assert!(fully_outside(Rect::new(-300.0, 100.0, 200.0, 150.0), VIEWPORT));
        assert!(fully_outside(Rect::new(100.0, 820.0, 200.0, 150.0), VIEWPORT));
        assert!(!fully_outside(Rect::new(-100.0, 100.0, 200.0, 150.0), VIEWPORT));
    }

    #[test]
    fn test_edge_flags_serialize_truthy_only() {
        let flags = EdgeFlags {
            left: true,
            ..EdgeFlags::NONE
        };
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"{"left":true}"#);
    }
}
