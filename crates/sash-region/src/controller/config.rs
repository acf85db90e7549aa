//! Interaction tuning knobs

use crate::listener::ContextId;
use crate::math::Size;
use crate::schedule::BASE_FRAME_INTERVAL_MS;

/// Tuning for one interaction controller instance
#[derive(Clone, Debug)]
pub struct InteractionConfig {
    /// Size floor enforced during resize sessions
    pub min_size: Size,
    /// Base throttle delay; also the unit for the repeat window
    pub base_delay_ms: f64,
    /// Abort window while a pivot resize sits outside the viewport
    pub resize_abort_ms: f64,
    /// Faster failsafe for plain center-pivot moves
    pub move_abort_ms: f64,
    /// Repeat window as a multiple of the base delay
    pub repeat_window_factor: f64,
    /// Device pixel ratio; scales the frame interval and edge threshold
    pub device_pixel_ratio: f32,
    /// Emit misuse warnings
    pub verbose: bool,
    /// Context hooks bubble to, if any
    pub hook_context: Option<ContextId>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_size: Size::new(300.0, 200.0),
            base_delay_ms: BASE_FRAME_INTERVAL_MS,
            resize_abort_ms: 3000.0,
            move_abort_ms: 800.0,
            repeat_window_factor: 12.0,
            device_pixel_ratio: 1.0,
            verbose: false,
            hook_context: None,
        }
    }
}

impl InteractionConfig {
    /// Window inside which a second trigger means stretch, not drag
    #[inline]
    pub fn repeat_window_ms(&self) -> f64 {
        self.base_delay_ms * self.repeat_window_factor
    }
}
