//! Timed intent script: the headless stand-in for a keyboard or VR rig.

use bevy::prelude::*;
use sailing::ControlInput;
use serde::{Deserialize, Serialize};

use crate::SimClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    TurnLeft,
    TurnRight,
    SailOut,
    SailIn,
    FurlIn,
    FurlOut,
    ThrottleUp,
    ThrottleDown,
    /// Fires once when its step becomes active.
    EngineToggle,
    /// Fires once when its step becomes active.
    Reset,
}

/// Intents held while `start <= t < end`. A missing `end` holds until exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub start: f32,
    #[serde(default)]
    pub end: Option<f32>,
    #[serde(default)]
    pub intents: Vec<Intent>,
}

impl ScriptStep {
    pub fn is_active(&self, t: f32) -> bool {
        t >= self.start && self.end.is_none_or(|end| t < end)
    }
}

/// Intents for the next boat tick. Edge-triggered actions stay pending until
/// a tick with non-zero dt consumes them.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ControlIntents {
    pub held: ControlInput,
    pub engine_toggle_pending: bool,
    pub reset_pending: bool,
}

impl ControlIntents {
    /// Held intents plus a pending engine toggle, which is cleared.
    pub fn take_input(&mut self) -> ControlInput {
        let mut input = self.held;
        input.engine_toggle = std::mem::take(&mut self.engine_toggle_pending);
        input
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Script {
    steps: Vec<ScriptStep>,
    was_active: Vec<bool>,
}

impl Script {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        let was_active = vec![false; steps.len()];
        Self { steps, was_active }
    }

    /// Fold every step active at `t` into `intents`, firing rising edges.
    pub fn evaluate(&mut self, t: f32, intents: &mut ControlIntents) {
        let mut held = ControlInput::default();
        for (step, was_active) in self.steps.iter().zip(self.was_active.iter_mut()) {
            let active = step.is_active(t);
            let rising = active && !*was_active;
            *was_active = active;
            if !active {
                continue;
            }
            for intent in &step.intents {
                match intent {
                    Intent::TurnLeft => held.turn_left = true,
                    Intent::TurnRight => held.turn_right = true,
                    Intent::SailOut => held.sail_out = true,
                    Intent::SailIn => held.sail_in = true,
                    Intent::FurlIn => held.furl_in = true,
                    Intent::FurlOut => held.furl_out = true,
                    Intent::ThrottleUp => held.throttle_up = true,
                    Intent::ThrottleDown => held.throttle_down = true,
                    Intent::EngineToggle if rising => intents.engine_toggle_pending = true,
                    Intent::Reset if rising => intents.reset_pending = true,
                    Intent::EngineToggle | Intent::Reset => {}
                }
            }
        }
        intents.held = held;
    }
}

pub fn apply_script(
    clock: Res<SimClock>,
    mut script: ResMut<Script>,
    mut intents: ResMut<ControlIntents>,
) {
    script.evaluate(clock.elapsed, &mut intents);
}
