//! Input adapter
//!
//! Hosts translate raw keyboard/pointer events into `InputEvent`s. Movement is
//! held state; fire and restart are one-shot latches consumed by the next
//! tick (fire) or frame (restart).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::TickInput;

/// Discrete input events, identical for keyboard and pointer sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeftDown,
    MoveLeftUp,
    MoveRightDown,
    MoveRightUp,
    FireRequested,
    RestartRequested,
}

impl InputEvent {
    /// Map a DOM-style key name to an event
    ///
    /// Fire and restart only trigger on key-down.
    pub fn from_key(key: &str, down: bool) -> Option<Self> {
        match (key, down) {
            ("ArrowLeft" | "a" | "A", true) => Some(Self::MoveLeftDown),
            ("ArrowLeft" | "a" | "A", false) => Some(Self::MoveLeftUp),
            ("ArrowRight" | "d" | "D", true) => Some(Self::MoveRightDown),
            ("ArrowRight" | "d" | "D", false) => Some(Self::MoveRightUp),
            (" " | "Space" | "ArrowUp" | "w" | "W", true) => Some(Self::FireRequested),
            ("Enter" | "r" | "R", true) => Some(Self::RestartRequested),
            _ => None,
        }
    }
}

/// Queryable input state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    fire: bool,
    restart: bool,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeftDown => self.left = true,
            InputEvent::MoveLeftUp => self.left = false,
            InputEvent::MoveRightDown => self.right = true,
            InputEvent::MoveRightUp => self.right = false,
            InputEvent::FireRequested => self.fire = true,
            InputEvent::RestartRequested => self.restart = true,
        }
    }

    pub fn fire_pending(&self) -> bool {
        self.fire
    }

    pub fn restart_pending(&self) -> bool {
        self.restart
    }

    /// Flags for the next tick; clears the fire latch
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            fire: std::mem::take(&mut self.fire),
        }
    }

    /// Consume the restart latch
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    /// Release everything (view torn down, focus lost)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
struct SharedFlags {
    left: AtomicBool,
    right: AtomicBool,
    fire: AtomicBool,
    restart: AtomicBool,
}

/// Thread-safe input flags, last writer wins
///
/// Input threads call `apply`; the thread driving the game calls
/// `drain_into` once per frame before running ticks.
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    flags: Arc<SharedFlags>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, event: InputEvent) {
        let f = &self.flags;
        match event {
            InputEvent::MoveLeftDown => f.left.store(true, Ordering::Release),
            InputEvent::MoveLeftUp => f.left.store(false, Ordering::Release),
            InputEvent::MoveRightDown => f.right.store(true, Ordering::Release),
            InputEvent::MoveRightUp => f.right.store(false, Ordering::Release),
            InputEvent::FireRequested => f.fire.store(true, Ordering::Release),
            InputEvent::RestartRequested => f.restart.store(true, Ordering::Release),
        }
    }

    /// Copy held flags and move pending one-shots into `state`
    pub fn drain_into(&self, state: &mut InputState) {
        let f = &self.flags;
        state.left = f.left.load(Ordering::Acquire);
        state.right = f.right.load(Ordering::Acquire);
        if f.fire.swap(false, Ordering::AcqRel) {
            state.apply(InputEvent::FireRequested);
        }
        if f.restart.swap(false, Ordering::AcqRel) {
            state.apply(InputEvent::RestartRequested);
        }
    }
}
