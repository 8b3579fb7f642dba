//! Hazard spawning
//!
//! Two countdown timers, one per hazard type. Each time a timer runs out a
//! new hazard with randomized parameters drops in from above the top edge and
//! the timer is re-armed from a difficulty curve that tightens as score grows.

use glam::Vec2;
use rand::Rng;

use super::state::{Hostile, Obstacle, Simulation};
use crate::consts::*;

/// Hostile delay never drops below this many ticks
pub const HOSTILE_DELAY_FLOOR: i32 = 18;
/// Obstacle delay never drops below this many ticks
pub const OBSTACLE_DELAY_FLOOR: i32 = 20;

/// Countdown timers (ticks) until the next spawn of each hazard type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spawner {
    pub hostile_timer: i32,
    pub obstacle_timer: i32,
}

impl Spawner {
    /// Timers so far out that nothing spawns during a test run
    pub fn idle() -> Self {
        Self {
            hostile_timer: i32::MAX,
            obstacle_timer: i32::MAX,
        }
    }
}

/// Uniform integer in `lo..=hi`
#[inline]
pub fn uniform_int<R: Rng>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    if lo >= hi {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Uniform float in `lo..=hi`
#[inline]
pub fn uniform_f32<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if !(lo < hi) {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Delay before the next hostile: `max(18, 40 - score/200 + [-6, 6])`
pub fn hostile_delay<R: Rng>(score: u64, rng: &mut R) -> i32 {
    let step = (score / 200).min(i32::MAX as u64 / 2) as i32;
    (40 - step + uniform_int(rng, -6, 6)).max(HOSTILE_DELAY_FLOOR)
}

/// Delay before the next obstacle: `max(20, 52 - score/180 + [-8, 10])`
pub fn obstacle_delay<R: Rng>(score: u64, rng: &mut R) -> i32 {
    let step = (score / 180).min(i32::MAX as u64 / 2) as i32;
    (52 - step + uniform_int(rng, -8, 10)).max(OBSTACLE_DELAY_FLOOR)
}

/// Build a hostile with randomized size and drift just above the field
pub fn random_hostile<R: Rng>(id: u32, rng: &mut R) -> Hostile {
    let radius = uniform_f32(rng, HOSTILE_RADIUS_MIN, HOSTILE_RADIUS_MAX);
    let x = uniform_f32(rng, radius, FIELD_WIDTH - radius);
    let vel = Vec2::new(
        uniform_f32(rng, -HOSTILE_VX, HOSTILE_VX),
        uniform_f32(rng, HOSTILE_VY_MIN, HOSTILE_VY_MAX),
    );
    Hostile::new(id, Vec2::new(x, -radius), vel, radius)
}

/// Build an obstacle with randomized size and drift just above the field
pub fn random_obstacle<R: Rng>(id: u32, rng: &mut R) -> Obstacle {
    let w = uniform_f32(rng, OBSTACLE_WIDTH_MIN, OBSTACLE_WIDTH_MAX);
    let h = uniform_f32(rng, OBSTACLE_HEIGHT_MIN, OBSTACLE_HEIGHT_MAX);
    let x = uniform_f32(rng, 0.0, FIELD_WIDTH - w);
    let vel = Vec2::new(
        uniform_f32(rng, -OBSTACLE_VX, OBSTACLE_VX),
        uniform_f32(rng, OBSTACLE_VY_MIN, OBSTACLE_VY_MAX),
    );
    Obstacle::new(id, Vec2::new(x, -h), vel, w, h)
}

/// Count both timers down and spawn whatever is due
pub fn run_spawner(sim: &mut Simulation) {
    let score = sim.score.current();

    sim.spawner.hostile_timer = sim.spawner.hostile_timer.saturating_sub(1);
    if sim.spawner.hostile_timer <= 0 {
        let id = sim.next_entity_id();
        let hostile = random_hostile(id, &mut sim.rng);
        log::debug!("spawn hostile {} r={:.1} at x={:.1}", id, hostile.radius, hostile.pos.x);
        sim.hostiles.push(hostile);
        sim.spawner.hostile_timer = hostile_delay(score, &mut sim.rng);
    }

    sim.spawner.obstacle_timer = sim.spawner.obstacle_timer.saturating_sub(1);
    if sim.spawner.obstacle_timer <= 0 {
        let id = sim.next_entity_id();
        let obstacle = random_obstacle(id, &mut sim.rng);
        log::debug!(
            "spawn obstacle {} {:.0}x{:.0} at x={:.1}",
            id,
            obstacle.w,
            obstacle.h,
            obstacle.pos.x
        );
        sim.obstacles.push(obstacle);
        sim.spawner.obstacle_timer = obstacle_delay(score, &mut sim.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_hostile_in_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        for id in 0..500 {
            let h = random_hostile(id, &mut rng);
            assert!((HOSTILE_RADIUS_MIN..=HOSTILE_RADIUS_MAX).contains(&h.radius));
            assert!((-HOSTILE_VX..=HOSTILE_VX).contains(&h.vel.x));
            assert!((HOSTILE_VY_MIN..=HOSTILE_VY_MAX).contains(&h.vel.y));
            assert!(h.pos.x >= h.radius && h.pos.x <= FIELD_WIDTH - h.radius);
            assert_eq!(h.hp, if h.radius > 15.0 { 2 } else { 1 });
        }
    }

    #[test]
    fn test_random_obstacle_in_ranges() {
        let mut rng = Pcg32::seed_from_u64(2);
        for id in 0..500 {
            let o = random_obstacle(id, &mut rng);
            assert!((OBSTACLE_WIDTH_MIN..=OBSTACLE_WIDTH_MAX).contains(&o.w));
            assert!((OBSTACLE_HEIGHT_MIN..=OBSTACLE_HEIGHT_MAX).contains(&o.h));
            assert!((-OBSTACLE_VX..=OBSTACLE_VX).contains(&o.vel.x));
            assert!((OBSTACLE_VY_MIN..=OBSTACLE_VY_MAX).contains(&o.vel.y));
            assert!(o.pos.x >= 0.0 && o.pos.x + o.w <= FIELD_WIDTH + 0.001);
            assert_eq!(o.hp, Obstacle::hp_for_size(o.w, o.h));
        }
    }

    #[test]
    fn test_delay_curve_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let d = hostile_delay(0, &mut rng);
            assert!((34..=46).contains(&d));
            let d = obstacle_delay(0, &mut rng);
            assert!((44..=62).contains(&d));
        }
    }

    #[test]
    fn test_delay_curve_tightens_to_floor() {
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..200 {
            assert_eq!(hostile_delay(1_000_000, &mut rng), HOSTILE_DELAY_FLOOR);
            assert_eq!(obstacle_delay(1_000_000, &mut rng), OBSTACLE_DELAY_FLOOR);
            assert_eq!(hostile_delay(u64::MAX, &mut rng), HOSTILE_DELAY_FLOOR);
        }
        // score 2000 shifts the hostile window down by 10
        for _ in 0..200 {
            let d = hostile_delay(2000, &mut rng);
            assert!((24..=36).contains(&d));
        }
    }

    #[test]
    fn test_fresh_spawner_spawns_on_first_step() {
        let mut sim = Simulation::new(9);
        run_spawner(&mut sim);
        assert_eq!(sim.hostiles.len(), 1);
        assert_eq!(sim.obstacles.len(), 1);
        assert!(sim.spawner.hostile_timer >= HOSTILE_DELAY_FLOOR);
        assert!(sim.spawner.obstacle_timer >= OBSTACLE_DELAY_FLOOR);
    }

    #[test]
    fn test_spawn_waits_for_timer() {
        let mut sim = Simulation::new(9);
        sim.spawner = Spawner {
            hostile_timer: 3,
            obstacle_timer: 100,
        };
        run_spawner(&mut sim);
        run_spawner(&mut sim);
        assert!(sim.hostiles.is_empty());
        run_spawner(&mut sim);
        assert_eq!(sim.hostiles.len(), 1);
        assert!(sim.obstacles.is_empty());
    }
}
