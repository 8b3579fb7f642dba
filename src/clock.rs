//! Fixed-timestep scheduling
//!
//! Frames arrive at whatever rate the host delivers them; the simulation only
//! ever advances in whole ticks of `TICK_MS`. Leftover time carries over to
//! the next frame.

use std::collections::VecDeque;

use crate::consts::{MAX_CATCH_UP_TICKS, MAX_FRAME_MS, TICK_MS};
use crate::settings::Settings;

/// Ticks decided for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steps {
    /// Ticks to run now
    pub run: u32,
    /// Whole ticks of backlog discarded by the catch-up cap
    pub dropped: u32,
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    tick_ms: f64,
    accumulator: f64,
    max_catch_up: u32,
    max_frame_ms: f64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_MS, MAX_CATCH_UP_TICKS, MAX_FRAME_MS)
    }
}

impl FixedStep {
    pub fn new(tick_ms: f64, max_catch_up: u32, max_frame_ms: f64) -> Self {
        Self {
            tick_ms,
            accumulator: 0.0,
            max_catch_up: max_catch_up.max(1),
            max_frame_ms,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(TICK_MS, settings.max_catch_up_ticks, settings.max_frame_ms)
    }

    pub fn tick_ms(&self) -> f64 {
        self.tick_ms
    }

    /// Time banked toward the next tick
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Forget banked time (after a reset or a freeze)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Bank `dt_ms` of wall time and return how many ticks are due
    pub fn advance(&mut self, dt_ms: f64) -> Steps {
        let dt = if dt_ms.is_finite() && dt_ms > 0.0 {
            dt_ms.min(self.max_frame_ms)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut run = 0;
        while self.accumulator >= self.tick_ms && run < self.max_catch_up {
            self.accumulator -= self.tick_ms;
            run += 1;
        }

        let mut dropped = 0;
        if self.accumulator >= self.tick_ms {
            let backlog = (self.accumulator / self.tick_ms).floor();
            self.accumulator -= backlog * self.tick_ms;
            dropped = backlog as u32;
            log::debug!("Frame clock dropped {} ticks of backlog", dropped);
        }

        Steps { run, dropped }
    }
}

/// Source of frame callbacks, yielding elapsed milliseconds per frame
///
/// Returning `None` ends the subscription.
pub trait TickSource {
    fn next_frame(&mut self) -> Option<f64>;
}

/// Synthetic frames with preset deltas, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    deltas: VecDeque<f64>,
}

impl ManualTicks {
    /// `frames` frames of `dt_ms` each
    pub fn fixed(dt_ms: f64, frames: usize) -> Self {
        Self {
            deltas: std::iter::repeat_n(dt_ms, frames).collect(),
        }
    }

    /// Exactly the given deltas, in order
    pub fn from_deltas(deltas: impl IntoIterator<Item = f64>) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
        }
    }

    pub fn push(&mut self, dt_ms: f64) {
        self.deltas.push_back(dt_ms);
    }

    pub fn remaining(&self) -> usize {
        self.deltas.len()
    }
}

impl TickSource for ManualTicks {
    fn next_frame(&mut self) -> Option<f64> {
        self.deltas.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_display_frame_at_60hz() {
        let mut clock = FixedStep::default();
        let mut total = 0;
        for _ in 0..600 {
            total += clock.advance(TICK_MS).run;
        }
        assert_eq!(total, 600);
    }

    #[test]
    fn test_high_refresh_rate_accumulates() {
        // 144 Hz display: ticks still land at 60 per second
        let mut clock = FixedStep::default();
        let mut total = 0;
        for _ in 0..144 {
            total += clock.advance(1000.0 / 144.0).run;
        }
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_short_frame_banks_time() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(10.0).run, 0);
        assert_eq!(clock.advance(10.0).run, 1);
        assert!((clock.accumulator() - (20.0 - TICK_MS)).abs() < 1e-9);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut clock = FixedStep::new(TICK_MS, 5, 250.0);
        // 210 ms is 12.6 ticks of backlog
        let steps = clock.advance(210.0);
        assert_eq!(steps.run, 5);
        assert_eq!(steps.dropped, 7);
        assert!(clock.accumulator() < TICK_MS);
    }

    #[test]
    fn test_stalled_host_is_clamped() {
        let mut clock = FixedStep::new(TICK_MS, 100, 260.0);
        // A backgrounded tab returning after a minute runs at most 260 ms
        let steps = clock.advance(60_000.0);
        assert_eq!(steps.run, 15);
        assert_eq!(steps.dropped, 0);
    }

    #[test]
    fn test_bad_deltas_are_ignored() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-5.0), Steps::default());
        assert_eq!(clock.advance(f64::NAN), Steps::default());
        assert_eq!(clock.advance(f64::INFINITY), Steps::default());
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_manual_ticks_drain_in_order() {
        let mut source = ManualTicks::from_deltas([1.0, 2.0]);
        source.push(3.0);
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.next_frame(), Some(1.0));
        assert_eq!(source.next_frame(), Some(2.0));
        assert_eq!(source.next_frame(), Some(3.0));
        assert_eq!(source.next_frame(), None);
    }
}
