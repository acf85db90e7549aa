//! Interaction session state

use serde::Serialize;

use crate::geometry::{EdgeFlags, Pivot};
use crate::math::{Rect, Vec2};

/// Controller lifecycle phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Armed,
    Moving,
    Resizing,
    Ending,
}

/// Why a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Pointer-up or touch-end
    Release,
    /// Escape key
    Escape,
    /// Out-of-viewport abort deadline expired
    Timeout,
    /// Host flipped the disabled flag mid-drag
    Disabled,
    /// Controller teardown
    Teardown,
}

/// Ephemeral state for one in-progress drag or resize
///
/// Created on pointer-down, mutated through pointer-move, destroyed on any
/// terminal transition.
#[derive(Clone, Copy, Debug)]
pub struct Session {
    /// Pivot the session was triggered with; `None` means plain move
    pub pivot: Option<Pivot>,
    /// Pointer position at pointer-down
    pub origin: Vec2,
    /// Most recent pointer sample
    pub last_pointer: Vec2,
    /// Pointer position at the last committed geometry update
    pub frame_anchor: Vec2,
    /// Per-axis travel sign since the previous sample (-1/0/+1)
    pub velocity: (i8, i8),
    /// Edge flags from the last committed update
    pub edges: EdgeFlags,
    /// Region frame at arm time
    pub initial_frame: Rect,
    /// Deadline for the out-of-viewport abort, when armed
    pub abort_deadline_ms: Option<f64>,
    /// Which rapid trigger this session is (1 = single press)
    pub repeat_count: u32,
}

impl Session {
    /// Create a fresh session at pointer-down
    pub fn new(pivot: Option<Pivot>, origin: Vec2, initial_frame: Rect, repeat_count: u32) -> Self {
        Self {
            pivot,
            origin,
            last_pointer: origin,
            frame_anchor: origin,
            velocity: (0, 0),
            edges: EdgeFlags::NONE,
            initial_frame,
            abort_deadline_ms: None,
            repeat_count,
        }
    }
}
