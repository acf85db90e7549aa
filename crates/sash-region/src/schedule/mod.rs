//! Deferred-work scheduling
//!
//! Two cooperating schedulers: the throttle scheduler coalesces repeated
//! commands into one trailing run, and the frame clock gates per-frame
//! work to the display rate. Both take injected `now_ms` timestamps so the
//! engine stays deterministic under test.

mod throttle;
mod frame;

pub use throttle::{TaskHandle, ThrottleScheduler};
pub use frame::{FrameClock, BASE_FRAME_INTERVAL_MS};
