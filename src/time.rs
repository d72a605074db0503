//! Fixed-timestep game clock using an accumulator pattern.
//!
//! `draw_web()` fires at ~60fps with a variable delta; the engine wants
//! discrete ticks. FrameClock converts wall-clock milliseconds into whole
//! ticks at [`TICKS_PER_SEC`], carrying the remainder, so session timing
//! is deterministic and fully testable.

/// Engine tick rate. Every duration constant in the engine is expressed
/// in these ticks (1 second = 10 ticks).
pub const TICKS_PER_SEC: u32 = 10;

/// Largest per-frame delta we honor; a backgrounded tab fast-forwards by
/// at most this much per frame instead of spiraling.
const MAX_FRAME_MS: f64 = 500.0;

pub struct FrameClock {
    ms_per_tick: f64,
    /// Milliseconds received but not yet consumed as ticks.
    accumulator: f64,
    /// Timestamp of the previous frame, None before the first.
    last_timestamp: Option<f64>,
    pub total_ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            ms_per_tick: 1000.0 / TICKS_PER_SEC as f64,
            accumulator: 0.0,
            last_timestamp: None,
            total_ticks: 0,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`); returns how
    /// many whole ticks to run this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
