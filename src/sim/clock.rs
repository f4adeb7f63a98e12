//! Frame clock
//!
//! Measures real time between frames. The simulation itself only ever
//! sees the returned `delta`.

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Clock {
    last: Instant,
    reset_at: Instant,
    delta: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last: now,
            reset_at: now,
            delta: 0.0,
        }
    }

    /// Reset the reference instant and zero the delta
    pub fn start(&mut self) {
        let now = Instant::now();
        self.last = now;
        self.reset_at = now;
        self.delta = 0.0;
    }

    /// Same as `start`; used after a pause so idle time is not simulated
    pub fn reset(&mut self) {
        self.start();
    }

    /// Seconds since the previous sample (or start)
    pub fn sample(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.delta
    }

    /// Delta computed by the last `sample`
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds since the last start/reset
    pub fn since_reset(&self) -> f32 {
        self.reset_at.elapsed().as_secs_f32()
    }
}
