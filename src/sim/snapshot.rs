//! Read-only view of the simulation for renderers

use glam::Vec2;
use serde::Serialize;

use super::state::{Hostile, Obstacle, Particle, Phase, Projectile, Simulation};

/// Everything a renderer needs for one frame, borrowed from the simulation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    /// Ship center
    pub ship: Vec2,
    pub projectiles: &'a [Projectile],
    pub hostiles: &'a [Hostile],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub score: u64,
    pub best: u64,
    pub phase: Phase,
    /// Convenience flag for overlays
    pub game_over: bool,
    pub tick: u64,
}

impl Simulation {
    /// Borrow the current state for drawing
    pub fn snapshot(&self, best: u64) -> Snapshot<'_> {
        Snapshot {
            ship: self.ship.pos(),
            projectiles: &self.projectiles,
            hostiles: &self.hostiles,
            obstacles: &self.obstacles,
            particles: &self.particles,
            score: self.score.current(),
            best,
            phase: self.phase,
            game_over: self.phase == Phase::GameOver,
            tick: self.time_ticks,
        }
    }
}

impl Snapshot<'_> {
    /// Serialize for hosts that consume JSON (web overlay)
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
