//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_intersects_rect, point_in_circle, rects_overlap};
pub use snapshot::Snapshot;
pub use spawn::Spawner;
pub use state::{Hostile, Obstacle, Particle, ParticleKind, Phase, Projectile, Ship, Simulation};
pub use tick::{TickInput, TickOutcome, tick};
