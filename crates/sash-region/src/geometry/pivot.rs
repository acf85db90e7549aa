//! Resize pivot grid
//!
//! Pivots form a 3x3 grid numbered 1 (north-west) through 9 (south-east),
//! with 5 as the center. The center pivot means plain move; every other
//! pivot names the edges that follow the pointer during a resize.

use serde::{Deserialize, Serialize};

/// Directional anchor on the 3x3 pivot grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pivot {
    /// 1: north-west corner
    NorthWest,
    /// 2: north edge
    North,
    /// 3: north-east corner
    NorthEast,
    /// 4: west edge
    West,
    /// 5: center (move only)
    Center,
    /// 6: east edge
    East,
    /// 7: south-west corner
    SouthWest,
    /// 8: south edge
    South,
    /// 9: south-east corner
    SouthEast,
}

impl Pivot {
    /// Resolve a pivot from its 1-9 grid index
    pub fn from_index(index: u8) -> Option<Pivot> {
        match index {
            1 => Some(Pivot::NorthWest),
            2 => Some(Pivot::North),
            3 => Some(Pivot::NorthEast),
            4 => Some(Pivot::West),
            5 => Some(Pivot::Center),
            6 => Some(Pivot::East),
            7 => Some(Pivot::SouthWest),
            8 => Some(Pivot::South),
            9 => Some(Pivot::SouthEast),
            _ => None,
        }
    }

    /// Grid index (1-9) of this pivot
    pub fn index(self) -> u8 {
        match self {
            Pivot::NorthWest => 1,
            Pivot::North => 2,
            Pivot::NorthEast => 3,
            Pivot::West => 4,
            Pivot::Center => 5,
            Pivot::East => 6,
            Pivot::SouthWest => 7,
            Pivot::South => 8,
            Pivot::SouthEast => 9,
        }
    }

    /// Whether a resize on this pivot changes the horizontal axis
    #[inline]
    pub fn affects_x(self) -> bool {
        matches!(
            self,
            Pivot::NorthWest
                | Pivot::NorthEast
                | Pivot::West
                | Pivot::East
                | Pivot::SouthWest
                | Pivot::SouthEast
        )
    }

    /// Whether a resize on this pivot changes the vertical axis
    #[inline]
    pub fn affects_y(self) -> bool {
        matches!(
            self,
            Pivot::NorthWest
                | Pivot::North
                | Pivot::NorthEast
                | Pivot::SouthWest
                | Pivot::South
                | Pivot::SouthEast
        )
    }

    /// Whether this pivot anchors to the west (left) edge
    #[inline]
    pub fn west_side(self) -> bool {
        matches!(self, Pivot::NorthWest | Pivot::West | Pivot::SouthWest)
    }

    /// Whether this pivot anchors to the east (right) edge
    #[inline]
    pub fn east_side(self) -> bool {
        matches!(self, Pivot::NorthEast | Pivot::East | Pivot::SouthEast)
    }

    /// Whether this pivot anchors to the north (top) edge
    #[inline]
    pub fn north_side(self) -> bool {
        matches!(self, Pivot::NorthWest | Pivot::North | Pivot::NorthEast)
    }

    /// Whether this pivot anchors to the south (bottom) edge
    #[inline]
    pub fn south_side(self) -> bool {
        matches!(self, Pivot::SouthWest | Pivot::South | Pivot::SouthEast)
    }

    /// Get CSS cursor style for this pivot
    pub fn cursor(self) -> &'static str {
        match self {
            Pivot::Center => "move",
            Pivot::North | Pivot::South => "ns-resize",
            Pivot::East | Pivot::West => "ew-resize",
            Pivot::NorthEast | Pivot::SouthWest => "nesw-resize",
            Pivot::NorthWest | Pivot::SouthEast => "nwse-resize",
        }
    }
}

/// Check whether a pivot value means plain move (no resize axis)
///
/// True for the absent pivot and for the grid center; false for every
/// directional pivot.
#[inline]
pub fn is_center_pivot(pivot: Option<Pivot>) -> bool {
    matches!(pivot, None | Some(Pivot::Center))
}
