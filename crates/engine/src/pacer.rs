//! Frame-rate cap for the engine loop.

use std::thread;
use std::time::{Duration, Instant};

use crate::types::ConfigError;

/// Caps the frame rate by sleeping out the rest of each frame interval.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(frame_rate_hz: u32) -> Result<Self, ConfigError> {
        if frame_rate_hz == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(Self {
            interval: Duration::from_secs(1) / frame_rate_hz,
            last_frame: None,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time still to wait when `elapsed` has passed since the last frame.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }

    /// Sleep until the next frame is due and return the seconds since the
    /// previous one.
    ///
    /// The first call does not sleep and reports one full interval.
    pub fn wait(&mut self) -> f64 {
        let Some(last) = self.last_frame else {
            self.last_frame = Some(Instant::now());
            return self.interval.as_secs_f64();
        };

        let rest = self.remaining(last.elapsed());
        if !rest.is_zero() {
            thread::sleep(rest);
        }

        let now = Instant::now();
        self.last_frame = Some(now);
        now.duration_since(last).as_secs_f64()
    }
}
