//! Running score and persisted best score

use serde::{Deserialize, Serialize};

use crate::consts::SURVIVAL_POINTS_PER_TICK;
use crate::persistence::{BEST_SCORE_KEY, ScoreStore};

/// Score for the current run; only ever grows until reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    current: u64,
}

impl Score {
    #[inline]
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Survival bonus for one tick
    pub fn record_tick(&mut self) {
        self.award(SURVIVAL_POINTS_PER_TICK);
    }

    pub fn award(&mut self, points: u64) {
        self.current = self.current.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Best score across runs, backed by a best-effort store
pub struct Scoreboard {
    store: Box<dyn ScoreStore>,
    best: u64,
    /// Last write failed; the next improvement retries
    write_pending: bool,
}

impl std::fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard")
            .field("best", &self.best)
            .field("write_pending", &self.write_pending)
            .finish_non_exhaustive()
    }
}

impl Scoreboard {
    /// Read the stored best once; any failure counts as "no previous best"
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let best = match store.get(BEST_SCORE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded best score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read best score ({}), starting from 0", e);
                0
            }
        };
        Self {
            store,
            best,
            write_pending: false,
        }
    }

    #[inline]
    pub fn best(&self) -> u64 {
        self.best
    }

    /// True when the last persisted write failed
    pub fn write_pending(&self) -> bool {
        self.write_pending
    }

    /// Record a finished run; persists and returns true when it beat the best
    pub fn on_game_over(&mut self, final_score: u64) -> bool {
        if final_score <= self.best {
            return false;
        }
        log::info!("New best score {} (was {})", final_score, self.best);
        self.best = final_score;
        match self.store.set(BEST_SCORE_KEY, final_score) {
            Ok(()) => self.write_pending = false,
            Err(e) => {
                log::warn!("Could not persist best score {}: {}", final_score, e);
                self.write_pending = true;
            }
        }
        true
    }
}
