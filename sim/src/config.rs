use std::path::Path;

use anyhow::{Context, Result};
use sailing::{BoatPhysicsSpec, WindField};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::script::ScriptStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Direction the air moves toward, degrees from +Z toward +X.
    pub direction_deg: f32,
    /// Mean speed in m/s before gusts.
    pub speed: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self { direction_deg: 30.0, speed: 7.2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick_hz: f64,
    /// Longest frame the integrator will accept, in seconds.
    pub dt_max: f32,
    pub log_interval_secs: f32,
    /// Exit once this much simulated time has elapsed. Runs forever when unset.
    pub duration_secs: Option<f32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            dt_max: 0.033,
            log_interval_secs: 2.0,
            duration_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wind: WindConfig,
    pub sim: SimConfig,
    pub boat: BoatPhysicsSpec,
    pub script: Vec<ScriptStep>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("wind speed must be finite and non-negative, got {0}")]
    WindSpeed(f32),
    #[error("wind direction must be finite, got {0}")]
    WindDirection(f32),
    #[error("tick_hz must be finite and positive, got {0}")]
    TickHz(f64),
    #[error("dt_max must be finite and positive, got {0}")]
    DtMax(f32),
    #[error("log_interval_secs must be finite and positive, got {0}")]
    LogInterval(f32),
    #[error("duration_secs must be finite and non-negative, got {0}")]
    Duration(f32),
    #[error("script step {index} has invalid bounds start={start} end={end:?}")]
    ScriptBounds { index: usize, start: f32, end: Option<f32> },
    #[error("boat.{field} must be finite and positive, got {value}")]
    BoatNonPositive { field: &'static str, value: f32 },
    #[error("boat.{field} must be finite, got {value}")]
    BoatNonFinite { field: &'static str, value: f32 },
    #[error("boat jib target range is inverted: min {min} > max {max}")]
    JibTargetRange { min: f32, max: f32 },
    #[error("boat.points_of_sail[{index}].{field} is invalid: {value}")]
    PointOfSail { index: usize, field: &'static str, value: f32 },
}

/// Checks the `[boat]` table. Every clamp bound, divisor and rate must be a
/// positive number; every remaining gain must at least be finite.
fn validate_boat(b: &BoatPhysicsSpec) -> Result<(), ConfigError> {
    let positive = [
        ("mass", b.mass),
        ("yaw_inertia", b.yaw_inertia),
        ("rudder_max_deg", b.rudder_max_deg),
        ("rudder_rate_deg", b.rudder_rate_deg),
        ("rudder_return_deg", b.rudder_return_deg),
        ("sail_max_deg", b.sail_max_deg),
        ("sail_rate_deg", b.sail_rate_deg),
        ("furl_rate", b.furl_rate),
        ("throttle_rate", b.throttle_rate),
        ("throttle_decay", b.throttle_decay),
        ("main_foil.stall_deg", b.main_foil.stall_deg),
        ("jib_foil.stall_deg", b.jib_foil.stall_deg),
        ("jib_target_max_deg", b.jib_target_max_deg),
        ("jib_trim_limit_deg", b.jib_trim_limit_deg),
        ("apparent_wind_floor", b.apparent_wind_floor),
        ("heel_max", b.heel_max),
        ("yaw_rate_decay_base", b.yaw_rate_decay_base),
    ];
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigError::BoatNonPositive { field, value });
        }
    }

    let finite = [
        ("initial_sail_deg", b.initial_sail_deg),
        ("reset_sail_deg", b.reset_sail_deg),
        ("engine_thrust", b.engine_thrust),
        ("engine_grip", b.engine_grip),
        ("hull_drag_lin", b.hull_drag_lin),
        ("hull_drag_quad", b.hull_drag_quad),
        ("keel_drag_lin", b.keel_drag_lin),
        ("keel_drag_lin_per_speed", b.keel_drag_lin_per_speed),
        ("keel_drag_quad", b.keel_drag_quad),
        ("keel_drag_quad_per_speed", b.keel_drag_quad_per_speed),
        ("rudder_side_gain", b.rudder_side_gain),
        ("rudder_yaw_gain", b.rudder_yaw_gain),
        ("sail_power_gain", b.sail_power_gain),
        ("main_foil.drag_base", b.main_foil.drag_base),
        ("main_foil.drag_gain", b.main_foil.drag_gain),
        ("jib_foil.drag_base", b.jib_foil.drag_base),
        ("jib_foil.drag_gain", b.jib_foil.drag_gain),
        ("jib_share", b.jib_share),
        ("jib_target_ratio", b.jib_target_ratio),
        ("jib_target_min_deg", b.jib_target_min_deg),
        ("heel_base", b.heel_base),
        ("heel_drive_gain", b.heel_drive_gain),
        ("sail_helm_gain", b.sail_helm_gain),
        ("lateral_yaw_damping", b.lateral_yaw_damping),
        ("lateral_yaw_damping_grip", b.lateral_yaw_damping_grip),
        ("weathercock_gain", b.weathercock_gain),
        ("weathercock_gain_per_speed", b.weathercock_gain_per_speed),
        ("weathercock_min_speed_sq", b.weathercock_min_speed_sq),
        ("yaw_damping", b.yaw_damping),
        ("yaw_damping_per_speed", b.yaw_damping_per_speed),
        ("yaw_rate_max", b.yaw_rate_max),
    ];
    for (field, value) in finite {
        if !value.is_finite() {
            return Err(ConfigError::BoatNonFinite { field, value });
        }
    }

    if b.jib_target_min_deg > b.jib_target_max_deg {
        return Err(ConfigError::JibTargetRange {
            min: b.jib_target_min_deg,
            max: b.jib_target_max_deg,
        });
    }

    for (index, row) in b.points_of_sail.iter().enumerate() {
        // The catch-all row may use an infinite threshold
        if row.max_twa_deg.is_nan() {
            let value = row.max_twa_deg;
            return Err(ConfigError::PointOfSail { index, field: "max_twa_deg", value });
        }
        let checks = [
            ("target_sail_deg", row.target_sail_deg, row.target_sail_deg.is_finite()),
            ("base_power", row.base_power, row.base_power.is_finite()),
            (
                "trim_window_deg",
                row.trim_window_deg,
                row.trim_window_deg.is_finite() && row.trim_window_deg > 0.0,
            ),
        ];
        for (field, value, ok) in checks {
            if !ok {
                return Err(ConfigError::PointOfSail { index, field, value });
            }
        }
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.wind;
        if !(w.speed.is_finite() && w.speed >= 0.0) {
            return Err(ConfigError::WindSpeed(w.speed));
        }
        if !w.direction_deg.is_finite() {
            return Err(ConfigError::WindDirection(w.direction_deg));
        }

        let s = &self.sim;
        if !(s.tick_hz.is_finite() && s.tick_hz > 0.0) {
            return Err(ConfigError::TickHz(s.tick_hz));
        }
        if !(s.dt_max.is_finite() && s.dt_max > 0.0) {
            return Err(ConfigError::DtMax(s.dt_max));
        }
        if !(s.log_interval_secs.is_finite() && s.log_interval_secs > 0.0) {
            return Err(ConfigError::LogInterval(s.log_interval_secs));
        }
        if let Some(d) = s.duration_secs {
            if !(d.is_finite() && d >= 0.0) {
                return Err(ConfigError::Duration(d));
            }
        }

        for (index, step) in self.script.iter().enumerate() {
            let end_ok = step.end.is_none_or(|e| e.is_finite() && e >= step.start);
            if !step.start.is_finite() || !end_ok {
                return Err(ConfigError::ScriptBounds { index, start: step.start, end: step.end });
            }
        }

        validate_boat(&self.boat)
    }

    pub fn wind_field(&self) -> WindField {
        WindField::from_degrees(self.wind.direction_deg, self.wind.speed)
    }
}

/// Read, parse and validate a config file. A missing file falls back to defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    Ok(cfg)
}
