//! 2D size type

use serde::{Deserialize, Serialize};

/// Width/height pair for region dimensions
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component-wise floor against a minimum size
    #[inline]
    pub fn at_least(self, min: Size) -> Size {
        Size::new(self.width.max(min.width), self.height.max(min.height))
    }

    /// Component-wise cap against a maximum size
    #[inline]
    pub fn capped(self, max: Size) -> Size {
        Size::new(self.width.min(max.width), self.height.min(max.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_at_least() {
        let s = Size::new(100.0, 400.0).at_least(Size::new(300.0, 200.0));
        assert!((s.width - 300.0).abs() < 0.001);
        assert!((s.height - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_size_capped() {
        let s = Size::new(900.0, 150.0).capped(Size::new(800.0, 600.0));
        assert!((s.width - 800.0).abs() < 0.001);
        assert!((s.height - 150.0).abs() < 0.001);
    }
}
