//! Browser binding
//!
//! The host page owns the canvas and the animation loop: it forwards key and
//! pointer events, calls `frame` from `requestAnimationFrame`, and draws from
//! the JSON snapshot. Calling `detach` when the overlay closes stops all
//! further ticking.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::input::InputEvent;
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        WebGame {
            game: Game::new(&settings, seed, Box::new(LocalStorageStore::new())),
            last_time: None,
        }
    }

    /// Advance using the `requestAnimationFrame` timestamp (ms)
    pub fn frame(&mut self, timestamp: f64) -> bool {
        let dt = match self.last_time {
            Some(last) => timestamp - last,
            None => 0.0,
        };
        self.last_time = Some(timestamp);
        let report = self.game.on_frame(dt);
        if report.new_best {
            log::info!("New best: {}", self.game.best());
        }
        !report.detached
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(event) = InputEvent::from_key(key, true) {
            self.game.handle_event(event);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(event) = InputEvent::from_key(key, false) {
            self.game.handle_event(event);
        }
    }

    /// Pointer press: fire while running, restart after game over
    pub fn pointer_down(&mut self) {
        if self.game.simulation().is_running() {
            self.game.handle_event(InputEvent::FireRequested);
        } else {
            self.game.handle_event(InputEvent::RestartRequested);
        }
    }

    /// Forget the last timestamp (tab hidden) so the gap is not simulated
    pub fn pause_clock(&mut self) {
        self.last_time = None;
    }

    pub fn snapshot_json(&self) -> String {
        self.game.snapshot().to_json()
    }

    pub fn score(&self) -> u64 {
        self.game.score()
    }

    pub fn best(&self) -> u64 {
        self.game.best()
    }

    pub fn detach(&mut self) {
        self.game.detach();
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
