//! Drift Shooter - a falling-hazard arcade shooter engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game phase)
//! - `clock`: Fixed-timestep scheduling decoupled from frame delivery
//! - `game`: Session glue (input, clock, scoring, restart, detach)
//! - `input`: Input adapter producing per-tick flags
//! - `score` / `persistence`: Running score and best-score durability
//! - `settings`: Player-facing configuration

pub mod clock;
pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod score;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{FixedStep, ManualTicks, TickSource};
pub use game::{FrameReport, Game};
pub use input::{InputEvent, InputState, SharedInput};
pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use score::{Score, Scoreboard};
pub use settings::{FireMode, Settings};

/// Game configuration constants
///
/// Distances are in field units, velocities in units per tick.
pub mod consts {
    /// Simulation tick length in milliseconds (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Default cap on simulation ticks run for a single delivered frame
    pub const MAX_CATCH_UP_TICKS: u32 = 5;
    /// Frame deltas longer than this are clamped before accumulation
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Play field dimensions (origin top-left, y grows downward)
    pub const FIELD_WIDTH: f32 = 420.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Ship defaults - the ship slides along a fixed lane near the bottom
    pub const SHIP_LANE_Y: f32 = 590.0;
    pub const SHIP_WIDTH: f32 = 30.0;
    pub const SHIP_HEIGHT: f32 = 24.0;
    pub const SHIP_SPEED: f32 = 5.0;
    /// Ship center never gets closer than this to either side wall
    pub const SHIP_MARGIN: f32 = 18.0;

    /// Projectile defaults (position is the tip)
    pub const PROJECTILE_SPEED: f32 = 9.0;
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    /// Ticks between automatic shots
    pub const FIRE_COOLDOWN_TICKS: u32 = 8;

    /// Hostile (circle) parameter ranges
    pub const HOSTILE_RADIUS_MIN: f32 = 10.0;
    pub const HOSTILE_RADIUS_MAX: f32 = 18.0;
    /// Hostiles larger than this take two hits
    pub const HOSTILE_TOUGH_RADIUS: f32 = 15.0;
    pub const HOSTILE_VX: f32 = 0.6;
    pub const HOSTILE_VY_MIN: f32 = 1.2;
    pub const HOSTILE_VY_MAX: f32 = 2.6;

    /// Obstacle (rectangle) parameter ranges
    pub const OBSTACLE_WIDTH_MIN: f32 = 24.0;
    pub const OBSTACLE_WIDTH_MAX: f32 = 64.0;
    pub const OBSTACLE_HEIGHT_MIN: f32 = 16.0;
    pub const OBSTACLE_HEIGHT_MAX: f32 = 44.0;
    pub const OBSTACLE_VX: f32 = 0.9;
    pub const OBSTACLE_VY_MIN: f32 = 1.6;
    pub const OBSTACLE_VY_MAX: f32 = 3.8;
    /// Area per hit-point for obstacles
    pub const OBSTACLE_AREA_PER_HP: f32 = 800.0;

    /// Scoring
    pub const HOSTILE_HIT_POINTS: u64 = 10;
    pub const OBSTACLE_HIT_POINTS: u64 = 6;
    pub const SURVIVAL_POINTS_PER_TICK: u64 = 1;

    /// Particle bursts
    pub const HOSTILE_BURST: usize = 14;
    pub const OBSTACLE_BURST: usize = 10;
    pub const MUZZLE_BURST: usize = 4;
    pub const PARTICLE_LIFE_MIN: u32 = 18;
    pub const PARTICLE_LIFE_MAX: u32 = 36;
    pub const PARTICLE_SPEED_MIN: f32 = 0.6;
    pub const PARTICLE_SPEED_MAX: f32 = 3.2;
    pub const MAX_PARTICLES: usize = 400;
}
