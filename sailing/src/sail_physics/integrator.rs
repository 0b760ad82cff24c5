use super::dynamics::step_boat_dbg;
use super::snapshot::BoatSnapshot;
use super::types::{BoatState, BoatStepDebug, ControlInput};
use crate::{BoatPhysicsSpec, WindField};

/// Sole owner and mutator of a `BoatState`.
///
/// Callers feed it sanitized frame times; everything else observes the boat
/// through the snapshots `tick` returns.
#[derive(Debug, Clone)]
pub struct BoatIntegrator {
    spec: BoatPhysicsSpec,
    wind: WindField,
    state: BoatState,
    last_step: BoatStepDebug,
}

impl BoatIntegrator {
    pub fn new(spec: BoatPhysicsSpec, wind: WindField) -> Self {
        let state = BoatState::new(&spec);
        Self { spec, wind, state, last_step: BoatStepDebug::default() }
    }

    /// Start from an explicit state, e.g. a scenario fixture.
    pub fn with_state(spec: BoatPhysicsSpec, wind: WindField, state: BoatState) -> Self {
        Self { spec, wind, state, last_step: BoatStepDebug::default() }
    }

    pub fn tick(&mut self, dt: f32, sim_time: f32, input: ControlInput) -> BoatSnapshot {
        let mut dbg = BoatStepDebug::default();
        step_boat_dbg(&self.spec, &self.wind, input, &mut self.state, dt, sim_time, Some(&mut dbg));
        if dbg.dt > 0.0 {
            self.last_step = dbg;
        }
        self.snapshot()
    }

    /// Latest completed snapshot; derived readouts are empty until the first tick.
    pub fn snapshot(&self) -> BoatSnapshot {
        if self.last_step.dt > 0.0 {
            BoatSnapshot::capture(&self.state, &self.last_step)
        } else {
            BoatSnapshot::from_state(&self.state)
        }
    }

    pub fn reset(&mut self) {
        self.state.reset(&self.spec);
        self.last_step = BoatStepDebug::default();
    }

    pub fn state(&self) -> &BoatState {
        &self.state
    }

    pub fn last_step(&self) -> &BoatStepDebug {
        &self.last_step
    }

    pub fn spec(&self) -> &BoatPhysicsSpec {
        &self.spec
    }

    pub fn wind(&self) -> &WindField {
        &self.wind
    }

    pub fn set_wind(&mut self, wind: WindField) {
        self.wind = wind;
    }
}
