//! Frame clock

use crate::consts::{FRAME_MS, MAX_TICK_MS};

/// Converts monotonically increasing host timestamps (ms) into tick deltas.
///
/// The first frame and any backwards jump yield one reference frame; long
/// stalls (tab switch, debugger) are clamped rather than replayed.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() && now_ms >= last => (now_ms - last) as f32,
            _ => FRAME_MS,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        dt.min(MAX_TICK_MS)
    }

    /// Forget the previous timestamp (after a pause or focus loss)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
