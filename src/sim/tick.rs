//! Fixed timestep simulation tick
//!
//! Advances the simulation by exactly one tick. The step order below is
//! load-bearing: collisions see post-movement positions, cleanup sees
//! post-collision hit-points, and the ship check only sees survivors.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_intersects_rect, point_in_circle, rects_overlap};
use super::spawn::{run_spawner, uniform_f32};
use super::state::{Particle, ParticleKind, Phase, Projectile, Simulation};
use crate::consts::*;
use crate::settings::FireMode;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Fire requested since the previous tick
    pub fire: bool,
}

impl TickInput {
    /// Net steering direction (-1, 0, 1)
    pub fn steer(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// What a tick did to the game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick completed, still running
    Running,
    /// The ship was hit this tick; carries the final score
    GameOver { score: u64 },
    /// Simulation was already over; nothing changed
    Frozen,
}

/// Advance the simulation by one fixed tick
pub fn tick(sim: &mut Simulation, input: &TickInput) -> TickOutcome {
    if sim.phase != Phase::Running {
        return TickOutcome::Frozen;
    }
    sim.time_ticks += 1;

    // 1. Movement
    sim.ship.steer(input.steer());
    for p in &mut sim.projectiles {
        p.pos.y += p.vy;
    }
    for h in &mut sim.hostiles {
        h.pos += h.vel;
    }
    for o in &mut sim.obstacles {
        o.pos += o.vel;
    }
    for p in &mut sim.particles {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
    }

    // 2. Firing
    sim.fire_cooldown = sim.fire_cooldown.saturating_sub(1);
    let wants_fire = match sim.fire_mode {
        FireMode::Auto => true,
        FireMode::Manual => input.fire,
    };
    if wants_fire && sim.fire_cooldown == 0 {
        let id = sim.next_entity_id();
        let nose = sim.ship.nose();
        sim.projectiles.push(Projectile::new(id, nose));
        sim.fire_cooldown = FIRE_COOLDOWN_TICKS;
        emit_burst(sim, nose, MUZZLE_BURST, ParticleKind::Muzzle);
    }

    // 3. Spawning
    run_spawner(sim);

    // 4. Projectile vs hostile (tip inside circle)
    let mut bursts: Vec<(Vec2, usize, ParticleKind)> = Vec::new();
    for p in &mut sim.projectiles {
        if p.spent {
            continue;
        }
        let target = sim
            .hostiles
            .iter_mut()
            .find(|h| h.hp > 0 && point_in_circle(p.pos, h.pos, h.radius));
        if let Some(h) = target {
            h.hp = h.hp.saturating_sub(1);
            p.spent = true;
            sim.score.award(HOSTILE_HIT_POINTS);
            bursts.push((h.pos, HOSTILE_BURST, ParticleKind::Hostile));
        }
    }

    // 5. Projectile vs obstacle (hit box overlap)
    for p in &mut sim.projectiles {
        if p.spent {
            continue;
        }
        let bounds = p.bounds();
        let target = sim
            .obstacles
            .iter_mut()
            .find(|o| o.hp > 0 && rects_overlap(&bounds, &o.bounds()));
        if let Some(o) = target {
            o.hp = o.hp.saturating_sub(1);
            p.spent = true;
            sim.score.award(OBSTACLE_HIT_POINTS);
            bursts.push((o.center(), OBSTACLE_BURST, ParticleKind::Obstacle));
        }
    }
    for (at, count, kind) in bursts {
        emit_burst(sim, at, count, kind);
    }

    // 6. Cleanup
    sim.projectiles.retain(|p| !p.spent && !p.off_field());
    sim.hostiles.retain(|h| h.hp > 0 && !h.off_field());
    sim.obstacles.retain(|o| o.hp > 0 && !o.off_field());
    sim.particles.retain(|p| p.life > 0);
    sim.debug_check_invariants();

    // 7. Ship contact ends the run immediately
    let ship = sim.ship.bounds();
    let hit_hostile = sim
        .hostiles
        .iter()
        .any(|h| circle_intersects_rect(h.pos, h.radius, &ship));
    let hit_obstacle = sim.obstacles.iter().any(|o| rects_overlap(&o.bounds(), &ship));
    if hit_hostile || hit_obstacle {
        sim.phase = Phase::GameOver;
        let score = sim.score.current();
        log::info!("Game over at tick {} with score {}", sim.time_ticks, score);
        return TickOutcome::GameOver { score };
    }

    // 8. Survival bonus
    sim.score.record_tick();
    TickOutcome::Running
}

/// Spray `count` cosmetic particles from `at`, dropping the oldest past the cap
fn emit_burst(sim: &mut Simulation, at: Vec2, count: usize, kind: ParticleKind) {
    if sim.max_particles == 0 {
        return;
    }
    // Muzzle flashes kick back down and to the sides; impacts spray everywhere
    let (base, spread) = match kind {
        ParticleKind::Muzzle => (std::f32::consts::FRAC_PI_2, 0.9),
        _ => (0.0, std::f32::consts::PI),
    };
    let rng = &mut sim.fx_rng;
    for _ in 0..count {
        let angle = base + uniform_f32(rng, -spread, spread);
        let speed = uniform_f32(rng, PARTICLE_SPEED_MIN, PARTICLE_SPEED_MAX);
        let life = rng.random_range(PARTICLE_LIFE_MIN..=PARTICLE_LIFE_MAX);
        sim.particles.push(Particle {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            kind,
        });
    }
    if sim.particles.len() > sim.max_particles {
        let excess = sim.particles.len() - sim.max_particles;
        sim.particles.drain(..excess);
    }
}
