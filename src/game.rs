//! Game session
//!
//! Ties the simulation to a frame clock, an input adapter and the scoreboard,
//! and owns the Running -> GameOver -> Running cycle.

use crate::clock::{FixedStep, TickSource};
use crate::input::{InputEvent, InputState};
use crate::persistence::ScoreStore;
use crate::score::Scoreboard;
use crate::settings::Settings;
use crate::sim::{Phase, Simulation, Snapshot, TickOutcome, tick};

/// What happened during one delivered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation ticks run
    pub ticks: u32,
    /// Backlog ticks discarded by the catch-up cap
    pub dropped: u32,
    /// The run ended during this frame
    pub ended: bool,
    /// The run that ended set a new best
    pub new_best: bool,
    /// A new run started at the beginning of this frame
    pub restarted: bool,
    /// Game is detached; no further frames will tick
    pub detached: bool,
}

/// A playable session
#[derive(Debug)]
pub struct Game {
    sim: Simulation,
    clock: FixedStep,
    input: InputState,
    scoreboard: Scoreboard,
    detached: bool,
    games_played: u32,
    last_score: Option<u64>,
}

impl Game {
    /// Start a session; reads the best score from `store` once
    pub fn new(settings: &Settings, seed: u64, store: Box<dyn ScoreStore>) -> Self {
        log::info!("Starting session with seed {}", seed);
        Self {
            sim: Simulation::with_settings(seed, settings),
            clock: FixedStep::from_settings(settings),
            input: InputState::default(),
            scoreboard: Scoreboard::load(store),
            detached: false,
            games_played: 0,
            last_score: None,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Direct access for scripted setups
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn phase(&self) -> Phase {
        self.sim.phase
    }

    pub fn score(&self) -> u64 {
        self.sim.score.current()
    }

    pub fn best(&self) -> u64 {
        self.scoreboard.best()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Finished runs this session
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Final score of the most recent finished run
    pub fn last_score(&self) -> Option<u64> {
        self.last_score
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.detached {
            self.input.apply(event);
        }
    }

    /// Input state, for adapters that write flags directly
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Renderer view of the current frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.sim.snapshot(self.scoreboard.best())
    }

    /// Start a fresh run; only allowed after game over
    pub fn restart(&mut self) -> bool {
        if self.sim.phase != Phase::GameOver || self.detached {
            return false;
        }
        self.sim.reset();
        self.clock.reset();
        log::info!("Run restarted (best {})", self.scoreboard.best());
        true
    }

    /// Process one host frame of `dt_ms` elapsed wall time
    pub fn on_frame(&mut self, dt_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if self.detached {
            report.detached = true;
            return report;
        }

        // Restart requests are ignored while running
        if self.input.take_restart() {
            report.restarted = self.restart();
        }

        if self.sim.phase == Phase::GameOver {
            return report;
        }

        let steps = self.clock.advance(dt_ms);
        report.dropped = steps.dropped;
        for _ in 0..steps.run {
            let input = self.input.take_tick_input();
            report.ticks += 1;
            match tick(&mut self.sim, &input) {
                TickOutcome::Running => {}
                TickOutcome::GameOver { score } => {
                    report.ended = true;
                    report.new_best = self.finish_run(score);
                    break;
                }
                TickOutcome::Frozen => break,
            }
        }
        report
    }

    fn finish_run(&mut self, score: u64) -> bool {
        self.games_played += 1;
        self.last_score = Some(score);
        self.clock.reset();
        self.scoreboard.on_game_over(score)
    }

    /// Stop ticking for good and release held input
    pub fn detach(&mut self) {
        if !self.detached {
            log::info!("Game detached after {} runs", self.games_played);
        }
        self.detached = true;
        self.input.clear();
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Drive frames from `source` until it runs dry or the game is detached
    ///
    /// `on_frame` runs after every frame and may steer the game (feed input,
    /// restart, detach). Returns the number of frames processed.
    pub fn run<S, F>(&mut self, source: &mut S, mut on_frame: F) -> u64
    where
        S: TickSource + ?Sized,
        F: FnMut(&mut Game, &FrameReport),
    {
        let mut frames = 0;
        while !self.detached {
            let Some(dt) = source.next_frame() else {
                break;
            };
            let report = self.on_frame(dt);
            frames += 1;
            on_frame(self, &report);
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTicks;
    use crate::consts::*;
    use crate::persistence::{BEST_SCORE_KEY, MemoryStore, StoreError};
    use crate::sim::Spawner;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl ScoreStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    fn quiet_game(store: SharedStore) -> Game {
        let mut game = Game::new(&Settings::default(), 42, Box::new(store));
        game.simulation_mut().spawner = Spawner::idle();
        game
    }

    /// Put a stationary hostile on top of the ship so the next tick ends the run
    fn doom(game: &mut Game) {
        let sim = game.simulation_mut();
        sim.fire_cooldown = 10_000;
        let pos = sim.ship.pos();
        sim.spawn_hostile_at(pos, Vec2::ZERO, 12.0);
    }

    /// Finish a run with exactly `score` points
    fn finish_with(game: &mut Game, score: u64) -> FrameReport {
        game.simulation_mut().score.award(score);
        doom(game);
        game.on_frame(TICK_MS)
    }

    #[test]
    fn test_frame_runs_ticks() {
        let mut game = quiet_game(SharedStore::default());
        let report = game.on_frame(TICK_MS * 3.0 + 1.0);
        assert_eq!(report.ticks, 3);
        assert_eq!(game.score(), 3);
        assert_eq!(game.simulation().time_ticks, 3);
    }

    #[test]
    fn test_best_tracks_maximum_across_runs() {
        let store = SharedStore::default();
        let mut game = quiet_game(store.clone());
        assert_eq!(game.best(), 0);

        let report = finish_with(&mut game, 150);
        assert!(report.ended);
        assert!(report.new_best);
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.best(), 150);
        assert_eq!(store.0.borrow().value(BEST_SCORE_KEY), Some(150));

        game.handle_event(InputEvent::RestartRequested);
        assert!(game.on_frame(0.0).restarted);
        game.simulation_mut().spawner = Spawner::idle();

        let report = finish_with(&mut game, 90);
        assert!(report.ended);
        assert!(!report.new_best);
        assert_eq!(game.best(), 150);
        assert_eq!(store.0.borrow().value(BEST_SCORE_KEY), Some(150));
        assert_eq!(game.games_played(), 2);
        assert_eq!(game.last_score(), Some(90));
    }

    #[test]
    fn test_best_survives_new_session() {
        let store = SharedStore::default();
        let mut game = quiet_game(store.clone());
        finish_with(&mut game, 70);
        drop(game);

        let game = quiet_game(store);
        assert_eq!(game.best(), 70);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut game = quiet_game(SharedStore::default());
        finish_with(&mut game, 10);
        let score = game.score();
        let tick = game.simulation().time_ticks;

        for _ in 0..30 {
            let report = game.on_frame(TICK_MS);
            assert_eq!(report.ticks, 0);
        }
        assert_eq!(game.score(), score);
        assert_eq!(game.simulation().time_ticks, tick);
        assert!(game.snapshot().game_over);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut game = quiet_game(SharedStore::default());
        game.on_frame(TICK_MS * 2.0);
        game.handle_event(InputEvent::RestartRequested);
        let report = game.on_frame(TICK_MS);
        assert!(!report.restarted);
        assert_eq!(game.score(), 3);

        // The ignored request does not linger into the game over
        finish_with(&mut game, 0);
        assert!(!game.on_frame(TICK_MS).restarted);
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_restart_resets_field_keeps_best() {
        let mut game = quiet_game(SharedStore::default());
        game.on_frame(TICK_MS * 4.0);
        game.handle_event(InputEvent::MoveLeftDown);
        game.on_frame(TICK_MS * 4.0);
        finish_with(&mut game, 200);
        let best = game.best();
        assert!(best >= 200);

        assert!(game.restart());
        let sim = game.simulation();
        assert!(sim.projectiles.is_empty());
        assert!(sim.hostiles.is_empty());
        assert!(sim.obstacles.is_empty());
        assert!(sim.particles.is_empty());
        assert_eq!(sim.ship.x, FIELD_WIDTH / 2.0);
        assert_eq!(sim.score.current(), 0);
        assert_eq!(sim.phase, Phase::Running);
        assert_eq!(game.best(), best);
    }

    #[test]
    fn test_fire_latched_until_a_tick_runs() {
        let settings = Settings {
            fire_mode: crate::FireMode::Manual,
            ..Default::default()
        };
        let mut game = Game::new(&settings, 1, Box::new(MemoryStore::new()));
        game.simulation_mut().spawner = Spawner::idle();

        game.handle_event(InputEvent::FireRequested);
        // Too short for a tick: request stays pending
        assert_eq!(game.on_frame(5.0).ticks, 0);
        assert!(game.simulation().projectiles.is_empty());

        assert_eq!(game.on_frame(TICK_MS).ticks, 1);
        assert_eq!(game.simulation().projectiles.len(), 1);
    }

    #[test]
    fn test_detach_stops_scheduling() {
        let mut game = quiet_game(SharedStore::default());
        let mut source = ManualTicks::fixed(TICK_MS, 100);
        let frames = game.run(&mut source, |game, _| {
            if game.simulation().time_ticks == 10 {
                game.detach();
            }
        });
        assert_eq!(frames, 10);
        assert_eq!(game.simulation().time_ticks, 10);
        assert_eq!(source.remaining(), 90);

        let report = game.on_frame(TICK_MS);
        assert!(report.detached);
        assert_eq!(report.ticks, 0);

        game.handle_event(InputEvent::MoveLeftDown);
        assert!(!game.input_mut().left);
    }

    #[test]
    fn test_run_stops_when_source_dries_up() {
        let mut game = quiet_game(SharedStore::default());
        let mut source = ManualTicks::fixed(TICK_MS, 25);
        let frames = game.run(&mut source, |_, _| {});
        assert_eq!(frames, 25);
        assert_eq!(game.simulation().time_ticks, 25);
    }

    #[test]
    fn test_game_over_stops_remaining_ticks_in_frame() {
        let mut game = quiet_game(SharedStore::default());
        doom(&mut game);
        let report = game.on_frame(TICK_MS * 4.0);
        assert_eq!(report.ticks, 1);
        assert!(report.ended);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_full_session_with_spawning() {
        // Spawning on, no steering: the ship eventually dies and best is recorded
        let store = SharedStore::default();
        let mut game = Game::new(&Settings::default(), 2024, Box::new(store.clone()));
        let mut source = ManualTicks::fixed(TICK_MS, 60 * 120);
        let mut final_score = None;
        game.run(&mut source, |game, report| {
            if report.ended {
                final_score = game.last_score();
                game.detach();
            }
        });
        let score = final_score.expect("an unsteered ship is eventually hit");
        assert_eq!(game.best(), score);
        assert_eq!(store.0.borrow().value(BEST_SCORE_KEY), Some(score));
    }
}
