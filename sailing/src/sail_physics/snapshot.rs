use serde::{Deserialize, Serialize};

use super::types::{BoatState, BoatStepDebug};
use crate::{PointOfSailKind, Vec3f};

/// Values computed by the sail model rather than stored in the boat state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedReadouts {
    pub true_wind: Vec3f,
    /// Apparent wind "from" vector.
    pub apparent_wind: Vec3f,
    /// Boat-frame angle of the apparent wind; drives the wind-vane streamer.
    pub apparent_wind_angle: f32,
    pub true_wind_angle: f32,
    pub point_of_sail: PointOfSailKind,
    pub trim_efficiency: f32,
    pub drive_efficiency: f32,
    pub trim_error: f32,
    pub heel_estimate: f32,
}

/// Read-only copy of the boat after a completed tick, for cameras, HUDs and rigs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoatSnapshot {
    pub position: Vec3f,
    pub velocity: Vec3f,
    pub speed: f32,
    pub heading: f32,
    pub yaw_rate: f32,
    pub rudder_angle: f32,
    pub sail_angle: f32,
    pub jib_angle: f32,
    pub sail_deploy_fraction: f32,
    pub engine_on: bool,
    pub throttle: f32,
    pub derived: DerivedReadouts,
}

impl BoatSnapshot {
    /// Snapshot of the state alone, with empty derived readouts. Used before the first tick.
    pub fn from_state(state: &BoatState) -> Self {
        let c = state.controls;
        Self {
            position: state.position,
            velocity: state.velocity,
            speed: state.speed(),
            heading: state.heading,
            yaw_rate: state.yaw_rate,
            rudder_angle: c.rudder_angle,
            sail_angle: c.sail_angle,
            jib_angle: 0.0,
            sail_deploy_fraction: c.sail_deploy_fraction,
            engine_on: c.engine_on,
            throttle: c.throttle,
            derived: DerivedReadouts::default(),
        }
    }

    pub fn capture(state: &BoatState, dbg: &BoatStepDebug) -> Self {
        Self {
            jib_angle: dbg.jib_trim,
            derived: DerivedReadouts {
                true_wind: dbg.true_wind,
                apparent_wind: dbg.apparent_wind_from,
                apparent_wind_angle: dbg.apparent_wind_angle,
                true_wind_angle: dbg.true_wind_angle,
                point_of_sail: dbg.point_of_sail,
                trim_efficiency: dbg.trim_efficiency,
                drive_efficiency: dbg.drive_efficiency,
                trim_error: dbg.trim_error,
                heel_estimate: dbg.heel_estimate,
            },
            ..Self::from_state(state)
        }
    }
}
