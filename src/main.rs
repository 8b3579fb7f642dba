//! Drift Shooter native entry point
//!
//! Headless runner: plays the game with a simple dodging autopilot and logs
//! each run. Useful for smoke-testing balance changes without a browser.
//! Run with `--help` for the flags.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use drift_shooter::consts::*;
    use drift_shooter::persistence::JsonFileStore;
    use drift_shooter::platform::WallClock;
    use drift_shooter::sim::Snapshot;
    use drift_shooter::{FireMode, Game, InputEvent, ManualTicks, Settings, TickSource};

    use clap::{Parser, ValueEnum};

    #[derive(Parser, Debug)]
    #[command(name = "drift-shooter")]
    #[command(about = "Headless Drift Shooter runner with a dodging autopilot")]
    struct Cli {
        /// RNG seed; falls back to the settings file, then the system time
        #[arg(long)]
        seed: Option<u64>,
        /// Runs to play before stopping
        #[arg(long, default_value_t = 3)]
        runs: u32,
        /// Simulated (or, with --realtime, wall-clock) time cap in seconds
        #[arg(long, default_value_t = 600)]
        seconds: u64,
        /// Pace frames against the wall clock instead of simulating flat out
        #[arg(long)]
        realtime: bool,
        /// Overrides the fire mode from the settings file
        #[arg(long, value_enum)]
        fire_mode: Option<CliFireMode>,
        #[arg(long, default_value = Settings::FILE_NAME)]
        settings: PathBuf,
        /// Write the effective settings (after overrides) back to --settings
        #[arg(long)]
        save_settings: bool,
        #[arg(long, default_value = "drift_shooter_scores.json")]
        scores: PathBuf,
    }

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum CliFireMode {
        Auto,
        Manual,
    }

    impl From<CliFireMode> for FireMode {
        fn from(value: CliFireMode) -> Self {
            match value {
                CliFireMode::Auto => FireMode::Auto,
                CliFireMode::Manual => FireMode::Manual,
            }
        }
    }

    /// Steer away from the most threatening hazard above the ship
    fn autopilot(snap: &Snapshot) -> (bool, bool) {
        let ship_x = snap.ship.x;
        let danger_top = SHIP_LANE_Y - 220.0;

        let mut threat: Option<(f32, f32)> = None; // (center x, distance above ship)
        for h in snap.hostiles {
            let near = (h.pos.x - ship_x).abs() < h.radius + SHIP_WIDTH;
            if near && h.pos.y > danger_top {
                let dist = SHIP_LANE_Y - h.pos.y;
                if threat.is_none_or(|(_, d)| dist < d) {
                    threat = Some((h.pos.x, dist));
                }
            }
        }
        for o in snap.obstacles {
            let cx = o.pos.x + o.w / 2.0;
            let near = (cx - ship_x).abs() < o.w / 2.0 + SHIP_WIDTH;
            if near && o.pos.y + o.h > danger_top {
                let dist = SHIP_LANE_Y - (o.pos.y + o.h);
                if threat.is_none_or(|(_, d)| dist < d) {
                    threat = Some((cx, dist));
                }
            }
        }

        match threat {
            Some((x, _)) => {
                // Dodge toward the roomier side when pinned against a wall
                let go_left = if ship_x < SHIP_MARGIN + SHIP_WIDTH {
                    false
                } else if ship_x > FIELD_WIDTH - SHIP_MARGIN - SHIP_WIDTH {
                    true
                } else {
                    x >= ship_x
                };
                (go_left, !go_left)
            }
            None => {
                // Drift back toward the middle
                let center = FIELD_WIDTH / 2.0;
                (ship_x > center + 40.0, ship_x < center - 40.0)
            }
        }
    }

    fn steer(game: &mut Game, left: bool, right: bool) {
        game.handle_event(if left {
            InputEvent::MoveLeftDown
        } else {
            InputEvent::MoveLeftUp
        });
        game.handle_event(if right {
            InputEvent::MoveRightDown
        } else {
            InputEvent::MoveRightUp
        });
    }

    pub fn run() {
        env_logger::init();
        let cli = Cli::parse();
        log::info!("Drift Shooter (native) starting...");

        let mut settings = Settings::load(&cli.settings);
        if let Some(mode) = cli.fire_mode {
            settings.fire_mode = mode.into();
        }
        if cli.save_settings {
            settings.save(&cli.settings);
        }
        let seed = cli.seed.or(settings.seed).unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        let store = JsonFileStore::new(cli.scores.clone());
        let mut game = Game::new(&settings, seed, Box::new(store));

        let frames = (cli.seconds as f64 * 1000.0 / TICK_MS) as usize;
        let mut source: Box<dyn TickSource> = if cli.realtime {
            Box::new(WallClock::new(60, Some(Duration::from_secs(cli.seconds))))
        } else {
            Box::new(ManualTicks::fixed(TICK_MS, frames))
        };

        let runs = cli.runs.max(1);
        game.run(source.as_mut(), |game, report| {
            if report.dropped > 0 {
                log::debug!("Dropped {} ticks of backlog", report.dropped);
            }
            if report.ended {
                log::info!(
                    "Run {} over: score {} (best {}{})",
                    game.games_played(),
                    game.last_score().unwrap_or(0),
                    game.best(),
                    if report.new_best { ", new!" } else { "" }
                );
                if game.games_played() >= runs {
                    game.detach();
                } else {
                    game.handle_event(InputEvent::RestartRequested);
                }
                return;
            }
            let (left, right) = autopilot(&game.snapshot());
            steer(game, left, right);
        });

        if !game.is_detached() {
            log::info!("Time limit reached with score {}", game.score());
            game.detach();
        }
        println!(
            "Played {} runs, best score {}",
            game.games_played(),
            game.best()
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_defaults() {
            let cli = Cli::try_parse_from(["drift-shooter"]).unwrap();
            assert_eq!(cli.seed, None);
            assert_eq!(cli.runs, 3);
            assert_eq!(cli.seconds, 600);
            assert!(!cli.realtime);
            assert!(cli.fire_mode.is_none());
            assert!(!cli.save_settings);
            assert_eq!(cli.settings, PathBuf::from(Settings::FILE_NAME));
        }

        #[test]
        fn test_cli_rejects_malformed_numbers() {
            assert!(Cli::try_parse_from(["drift-shooter", "--runs", "abc"]).is_err());
            assert!(Cli::try_parse_from(["drift-shooter", "--seed", "xyz"]).is_err());
            assert!(Cli::try_parse_from(["drift-shooter", "--seconds", "-5"]).is_err());
        }

        #[test]
        fn test_cli_flag_without_value_is_an_error() {
            assert!(Cli::try_parse_from(["drift-shooter", "--runs", "1", "--seed"]).is_err());
        }

        #[test]
        fn test_cli_fire_mode_maps_to_settings() {
            let cli = Cli::try_parse_from(["drift-shooter", "--fire-mode", "manual", "--seed", "9"])
                .unwrap();
            assert_eq!(cli.seed, Some(9));
            let mode: FireMode = cli.fire_mode.unwrap().into();
            assert_eq!(mode, FireMode::Manual);
            assert!(Cli::try_parse_from(["drift-shooter", "--fire-mode", "burst"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
