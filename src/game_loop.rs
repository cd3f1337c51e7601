//! Fixed timestep driver
//!
//! Accumulates frame time and runs as many ticks as fit, capped per frame.
//! The tick interval is variable (speed boost, ice, tundra), so each substep
//! consumes whatever interval the state reports before it runs.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, set_paused, tick, tick_interval_ms};

/// Final report handed to the session host when the run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub score: u64,
    pub boss_defeated: bool,
    pub bosses_defeated: u32,
    pub level: u32,
    pub ticks: u64,
}

/// Owns the state and drives it from wall-clock frame deltas
pub struct GameLoop {
    pub state: GameState,
    /// Held input applied to every tick (cleared one-shots after use)
    pub input: TickInput,
    accumulator_ms: f32,
    outcome_reported: bool,
}

impl GameLoop {
    pub fn new(config: SessionConfig) -> Self {
        Self::from_state(GameState::new(config))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator_ms: 0.0,
            outcome_reported: false,
        }
    }

    /// Run ticks for `dt_ms` of elapsed time. Returns the outcome exactly
    /// once, on the frame the run ends.
    pub fn advance(&mut self, dt_ms: f32) -> Option<GameOutcome> {
        // The pause key toggles on the frame it is seen, ticking or not
        if self.input.pause {
            self.input.pause = false;
            match self.state.phase {
                GamePhase::Playing => self.pause(),
                GamePhase::Paused => self.resume(),
                GamePhase::GameOver => {}
            }
        }

        if self.state.phase == GamePhase::Playing {
            self.accumulator_ms += dt_ms.clamp(0.0, MAX_FRAME_MS);

            let mut substeps = 0;
            while substeps < MAX_SUBSTEPS && self.state.phase == GamePhase::Playing {
                let interval = tick_interval_ms(&self.state) as f32;
                if self.accumulator_ms < interval {
                    break;
                }
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator_ms -= interval;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.ability = false;
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog instead of spiralling
                self.accumulator_ms = 0.0;
            }
        } else {
            self.input.ability = false;
        }
        self.take_outcome()
    }

    /// Run exactly one tick regardless of elapsed time
    pub fn step(&mut self) -> Option<GameOutcome> {
        let input = self.input;
        tick(&mut self.state, &input);
        self.input.ability = false;
        self.input.pause = false;
        self.take_outcome()
    }

    pub fn pause(&mut self) {
        set_paused(&mut self.state, true);
    }

    /// Resume without a burst of catch-up ticks
    pub fn resume(&mut self) {
        if set_paused(&mut self.state, false) {
            self.accumulator_ms = 0.0;
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Semantic events since the last drain (for audio)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    fn take_outcome(&mut self) -> Option<GameOutcome> {
        if self.outcome_reported || !self.is_over() {
            return None;
        }
        self.outcome_reported = true;
        Some(GameOutcome {
            score: self.state.score,
            boss_defeated: self.state.bosses_defeated > 0,
            bosses_defeated: self.state.bosses_defeated,
            level: self.state.level,
            ticks: self.state.time_ticks,
        })
    }
}
