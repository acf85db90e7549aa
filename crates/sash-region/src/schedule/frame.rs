//! Frame-rate gate
//!
//! Limits per-frame work to a target interval derived from the display
//! refresh, compensating for drift by rebasing the baseline on the
//! remainder instead of resetting it.

/// Base frame interval at 60 Hz, in milliseconds
pub const BASE_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Frame-rate gate with drift-compensated baseline
#[derive(Debug)]
pub struct FrameClock {
    interval_ms: f64,
    baseline_ms: Option<f64>,
    /// Most recent outstanding frame-request id
    request: Option<u64>,
    next_request: u64,
}

impl FrameClock {
    /// Create a clock targeting the base interval scaled by the device
    /// pixel ratio
    pub fn new(device_pixel_ratio: f32) -> Self {
        let scale = if device_pixel_ratio > 0.0 {
            device_pixel_ratio as f64
        } else {
            1.0
        };
        Self {
            interval_ms: BASE_FRAME_INTERVAL_MS * scale,
            baseline_ms: None,
            request: None,
            next_request: 1,
        }
    }

    /// Target interval in milliseconds
    #[inline]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Start gating: store the baseline and issue a frame request id
    pub fn begin(&mut self, now_ms: f64) -> u64 {
        self.baseline_ms = Some(now_ms);
        let id = self.next_request;
        self.next_request += 1;
        self.request = Some(id);
        id
    }

    /// Whether a frame request is outstanding
    #[inline]
    pub fn is_active(&self) -> bool {
        self.request.is_some()
    }

    /// Gate a frame callback against the target interval
    ///
    /// Below the target the caller should re-request a frame and skip its
    /// handler. At or past the target the baseline advances by the elapsed
    /// time minus the remainder, so short and long frames average out to
    /// the target rate instead of accumulating drift.
    pub fn should_run(&mut self, now_ms: f64) -> bool {
        let Some(baseline) = self.baseline_ms else {
            return false;
        };
        let elapsed = now_ms - baseline;
        if elapsed < self.interval_ms {
            return false;
        }
        self.baseline_ms = Some(now_ms - (elapsed % self.interval_ms));
        true
    }

    /// Cancel a specific frame request, or the most recent one
    ///
    /// Unknown ids and repeated cancellation are no-ops.
    pub fn cancel(&mut self, id: Option<u64>) {
        match id {
            Some(id) => {
                if self.request == Some(id) {
                    self.request = None;
                    self.baseline_ms = None;
                }
            }
            None => {
                self.request = None;
                self.baseline_ms = None;
            }
        }
    }
}
