//! Entity model and simulation state
//!
//! `Simulation` owns every entity collection and is the only thing the tick
//! function mutates.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::Spawner;
use crate::consts::*;
use crate::score::Score;
use crate::settings::{FireMode, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active gameplay
    Running,
    /// Ship was hit; world frozen until reset
    GameOver,
}

/// The player's ship, sliding on a fixed lane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship {
    /// Horizontal center
    pub x: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            x: FIELD_WIDTH / 2.0,
        }
    }
}

impl Ship {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, SHIP_LANE_Y)
    }

    /// Bounding box used for hazard contact
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos(), SHIP_WIDTH, SHIP_HEIGHT)
    }

    /// Point projectiles are launched from
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.x, SHIP_LANE_Y - SHIP_HEIGHT / 2.0)
    }

    /// Move by `dir` lane steps (-1, 0, 1) and clamp to the field margins
    pub fn steer(&mut self, dir: f32) {
        self.x = (self.x + dir * SHIP_SPEED).clamp(SHIP_MARGIN, FIELD_WIDTH - SHIP_MARGIN);
    }
}

/// A player shot travelling upward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Tip of the projectile
    pub pos: Vec2,
    pub vy: f32,
    #[serde(skip)]
    pub spent: bool,
}

impl Projectile {
    pub fn new(id: u32, tip: Vec2) -> Self {
        Self {
            id,
            pos: tip,
            vy: -PROJECTILE_SPEED,
            spent: false,
        }
    }

    /// Small hit box hanging below the tip
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - PROJECTILE_WIDTH / 2.0,
            self.pos.y,
            PROJECTILE_WIDTH,
            PROJECTILE_HEIGHT,
        )
    }

    /// Fully above the top edge
    pub fn off_field(&self) -> bool {
        self.pos.y + PROJECTILE_HEIGHT < 0.0
    }
}

/// Circular threat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hp: u8,
}

impl Hostile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            hp: Self::hp_for_radius(radius),
        }
    }

    /// Large hostiles take two hits
    pub fn hp_for_radius(radius: f32) -> u8 {
        if radius > HOSTILE_TOUGH_RADIUS { 2 } else { 1 }
    }

    /// Below the bottom edge or drifted out the sides
    pub fn off_field(&self) -> bool {
        self.pos.y - self.radius > FIELD_HEIGHT
            || self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > FIELD_WIDTH
    }
}

/// Rectangular threat; `pos` is the top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
    pub hp: u8,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, w: f32, h: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            w,
            h,
            hp: Self::hp_for_size(w, h),
        }
    }

    /// One hit-point per 800 square units, at least one
    pub fn hp_for_size(w: f32, h: f32) -> u8 {
        let hp = (w * h / OBSTACLE_AREA_PER_HP).round();
        hp.clamp(1.0, u8::MAX as f32) as u8
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn off_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT || self.pos.x + self.w < 0.0 || self.pos.x > FIELD_WIDTH
    }
}

/// What emitted a particle (render picks the color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Muzzle,
    Hostile,
    Obstacle,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub kind: ParticleKind,
}

/// Mixed into the seed for the cosmetic RNG stream
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawns)
    pub(crate) rng: Pcg32,
    /// Cosmetic RNG (particles), kept apart so effects never shift gameplay
    pub(crate) fx_rng: Pcg32,
    pub phase: Phase,
    pub score: Score,
    /// Simulation tick counter (since last reset)
    pub time_ticks: u64,
    pub ship: Ship,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    pub spawner: Spawner,
    pub projectiles: Vec<Projectile>,
    pub hostiles: Vec<Hostile>,
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub fire_mode: FireMode,
    /// Particle cap; zero disables particles
    pub max_particles: usize,
    /// Next entity ID
    next_id: u32,
}

impl Simulation {
    /// Create a new simulation with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
            phase: Phase::Running,
            score: Score::default(),
            time_ticks: 0,
            ship: Ship::default(),
            fire_cooldown: 0,
            spawner: Spawner::default(),
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            fire_mode: settings.fire_mode,
            max_particles: settings.max_particles(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Clear the field and start a fresh run.
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self) {
        self.phase = Phase::Running;
        self.score.reset();
        self.time_ticks = 0;
        self.ship = Ship::default();
        self.fire_cooldown = 0;
        self.spawner = Spawner::default();
        self.projectiles.clear();
        self.hostiles.clear();
        self.obstacles.clear();
        self.particles.clear();
    }

    /// Spawn a hostile at an exact position (tests and scripted scenes)
    pub fn spawn_hostile_at(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        self.hostiles.push(Hostile::new(id, pos, vel, radius));
        id
    }

    /// Spawn an obstacle at an exact position (tests and scripted scenes)
    pub fn spawn_obstacle_at(&mut self, pos: Vec2, vel: Vec2, w: f32, h: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, pos, vel, w, h));
        id
    }

    /// Check the post-cleanup invariants; panics in debug builds only
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert!(self.hostiles.iter().all(|h| h.hp > 0 && !h.off_field()));
        debug_assert!(self.obstacles.iter().all(|o| o.hp > 0 && !o.off_field()));
        debug_assert!(self.projectiles.iter().all(|p| !p.spent && !p.off_field()));
        debug_assert!(self.particles.iter().all(|p| p.life > 0));
        debug_assert!((SHIP_MARGIN..=FIELD_WIDTH - SHIP_MARGIN).contains(&self.ship.x));
    }
}
