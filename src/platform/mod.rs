//! Platform abstraction layer
//!
//! Real-time frame delivery for native hosts. Browser hosts drive
//! `Game::on_frame` from `requestAnimationFrame` instead (see `web`).

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(not(target_arch = "wasm32"))]
use crate::clock::TickSource;

/// Paces frames at a target rate using the monotonic clock
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct WallClock {
    frame_interval: Duration,
    last: Instant,
    deadline: Option<Instant>,
}

#[cfg(not(target_arch = "wasm32"))]
impl WallClock {
    /// Frames at `fps`, optionally stopping after `run_for`
    pub fn new(fps: u32, run_for: Option<Duration>) -> Self {
        let now = Instant::now();
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: now,
            deadline: run_for.map(|d| now + d),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TickSource for WallClock {
    fn next_frame(&mut self) -> Option<f64> {
        let target = self.last + self.frame_interval;
        if let Some(deadline) = self.deadline {
            if target > deadline {
                return None;
            }
        }
        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        Some(dt.as_secs_f64() * 1000.0)
    }
}
