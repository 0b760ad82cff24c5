//! Headless frame loop around the sailing integrator.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use sailing::BoatIntegrator;

pub mod args;
pub mod boat;
pub mod config;
pub mod script;
pub mod telemetry;

pub use args::Args;
pub use boat::{BoatAttitude, BoatSim, BoatTelemetry, PublishedSnapshot, SnapshotBuffer};
pub use config::{load_config, Config, ConfigError, SimConfig, WindConfig};
pub use script::{ControlIntents, Intent, Script, ScriptStep};
use telemetry::TelemetryLog;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimSet;

/// Simulated time, advanced only by sanitized frame dt.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    pub elapsed: f32,
    pub ticks: u64,
    /// dt handed to the integrator this frame; 0 when the tick was skipped.
    pub last_dt: f32,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct SimSettings {
    pub dt_max: f32,
    pub log_interval_secs: f32,
    pub duration_secs: Option<f32>,
}

impl From<&SimConfig> for SimSettings {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            dt_max: cfg.dt_max,
            log_interval_secs: cfg.log_interval_secs,
            duration_secs: cfg.duration_secs,
        }
    }
}

/// Clamp a raw frame time into `[0, dt_max]`; anything non-finite or negative becomes 0.
pub fn sanitize_dt(raw: f32, dt_max: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    raw.min(dt_max.max(0.0))
}

pub fn build_sim_app(cfg: Config) -> App {
    let mut app = App::new();

    let wait = Duration::from_secs_f64(1.0 / cfg.sim.tick_hz.max(1e-3));
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(wait)));

    let sim = BoatIntegrator::new(cfg.boat.clone(), cfg.wind_field());
    let buffer = SnapshotBuffer::default();
    buffer.publish(PublishedSnapshot { tick: 0, sim_time: 0.0, snapshot: sim.snapshot() });

    app.insert_resource(SimSettings::from(&cfg.sim))
        .insert_resource(Script::new(cfg.script.clone()))
        .insert_resource(BoatSim(sim))
        .insert_resource(buffer)
        .init_resource::<SimClock>()
        .init_resource::<ControlIntents>()
        .init_resource::<BoatTelemetry>()
        .init_resource::<BoatAttitude>()
        .init_resource::<TelemetryLog>();

    app.configure_sets(Update, SimSet).add_systems(
        Update,
        (
            script::apply_script,
            boat::tick_boat,
            boat::update_attitude,
            telemetry::log_telemetry,
            telemetry::exit_when_done,
        )
            .chain()
            .in_set(SimSet),
    );

    app
}
