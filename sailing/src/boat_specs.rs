use serde::{Deserialize, Serialize};

/// Qualitative sailing regime, bucketed by true wind angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointOfSailKind {
    #[default]
    NoGo,
    CloseHauled,
    CloseReach,
    BeamReach,
    BroadReach,
    Run,
}

/// One row of the polar table. A row applies when `|TWA| < max_twa_deg`
/// and no earlier row matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointOfSail {
    pub kind: PointOfSailKind,
    pub max_twa_deg: f32,
    /// Ideal main sail angle magnitude for this regime.
    pub target_sail_deg: f32,
    pub base_power: f32,
    /// Angular distance from the target at which trim efficiency reaches zero.
    pub trim_window_deg: f32,
}

const RUN: PointOfSail = PointOfSail {
    kind: PointOfSailKind::Run,
    max_twa_deg: f32::INFINITY,
    target_sail_deg: 85.0,
    base_power: 0.75,
    trim_window_deg: 26.0,
};

pub(crate) fn default_points_of_sail() -> Vec<PointOfSail> {
    use PointOfSailKind::*;
    let row = |kind, max_twa_deg, target_sail_deg, base_power, trim_window_deg| PointOfSail {
        kind,
        max_twa_deg,
        target_sail_deg,
        base_power,
        trim_window_deg,
    };
    vec![
        row(NoGo, 35.0, 10.0, 0.05, 18.0),
        row(CloseHauled, 60.0, 20.0, 0.85, 18.0),
        row(CloseReach, 90.0, 35.0, 0.95, 22.0),
        row(BeamReach, 120.0, 55.0, 1.05, 22.0),
        row(BroadReach, 150.0, 75.0, 0.95, 26.0),
        RUN,
    ]
}

/// Linear scan of the polar table. The last row catches everything past the
/// final threshold; an empty table behaves like a dead run.
pub fn point_of_sail_for(table: &[PointOfSail], abs_twa_deg: f32) -> PointOfSail {
    table
        .iter()
        .find(|p| abs_twa_deg < p.max_twa_deg)
        .or(table.last())
        .copied()
        .unwrap_or(RUN)
}

/// Lift/drag shape of a single sail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoilSpec {
    /// Angle of attack at which lift has faded to zero.
    pub stall_deg: f32,
    pub drag_base: f32,
    /// Multiplier on `sin²(|aoa|)` added to `drag_base`.
    pub drag_gain: f32,
}

/// Tunable physics parameters for one boat class (SI units, angles in degrees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatPhysicsSpec {
    pub mass: f32,
    pub yaw_inertia: f32,

    // Control surfaces
    pub rudder_max_deg: f32,
    pub rudder_rate_deg: f32,
    pub rudder_return_deg: f32,
    pub sail_max_deg: f32,
    pub sail_rate_deg: f32,
    pub furl_rate: f32,
    pub throttle_rate: f32,
    pub throttle_decay: f32,
    pub initial_sail_deg: f32,
    pub reset_sail_deg: f32,

    // Engine
    pub engine_thrust: f32,
    /// Extra keel grip per unit throttle while the engine runs.
    pub engine_grip: f32,

    // Hull resistance
    pub hull_drag_lin: f32,
    pub hull_drag_quad: f32,
    pub keel_drag_lin: f32,
    pub keel_drag_lin_per_speed: f32,
    pub keel_drag_quad: f32,
    pub keel_drag_quad_per_speed: f32,

    // Rudder
    pub rudder_side_gain: f32,
    pub rudder_yaw_gain: f32,

    // Sails
    pub sail_power_gain: f32,
    pub main_foil: FoilSpec,
    pub jib_foil: FoilSpec,
    /// Jib power as a fraction of main sail power.
    pub jib_share: f32,
    pub jib_target_ratio: f32,
    pub jib_target_min_deg: f32,
    pub jib_target_max_deg: f32,
    pub jib_trim_limit_deg: f32,
    pub apparent_wind_floor: f32,
    pub points_of_sail: Vec<PointOfSail>,

    // Visual heel suggestion, radians
    pub heel_base: f32,
    pub heel_drive_gain: f32,
    pub heel_max: f32,

    // Yaw dynamics
    pub sail_helm_gain: f32,
    pub lateral_yaw_damping: f32,
    pub lateral_yaw_damping_grip: f32,
    pub weathercock_gain: f32,
    pub weathercock_gain_per_speed: f32,
    /// Squared speed below which the slip angle is too noisy to act on.
    pub weathercock_min_speed_sq: f32,
    pub yaw_damping: f32,
    pub yaw_damping_per_speed: f32,
    pub yaw_rate_max: f32,
    /// Per-second multiplicative decay applied to yaw rate after the clamp.
    pub yaw_rate_decay_base: f32,
}

impl Default for BoatPhysicsSpec {
    fn default() -> Self {
        windpost_sloop()
    }
}

/// The small cruising sloop the simulator ships with.
pub fn windpost_sloop() -> BoatPhysicsSpec {
    BoatPhysicsSpec {
        mass: 520.0,
        yaw_inertia: 980.0,

        rudder_max_deg: 28.0,
        rudder_rate_deg: 85.0,
        rudder_return_deg: 60.0,
        sail_max_deg: 90.0,
        sail_rate_deg: 75.0,
        furl_rate: 0.85,
        throttle_rate: 0.65,
        throttle_decay: 0.9,
        initial_sail_deg: 55.0,
        reset_sail_deg: 25.0,

        engine_thrust: 320.0,
        engine_grip: 0.85,

        hull_drag_lin: 18.0,
        hull_drag_quad: 10.5,
        keel_drag_lin: 140.0,
        keel_drag_lin_per_speed: 8.0,
        keel_drag_quad: 85.0,
        keel_drag_quad_per_speed: 6.0,

        rudder_side_gain: 20.0,
        rudder_yaw_gain: 420.0,

        sail_power_gain: 1.35,
        main_foil: FoilSpec { stall_deg: 80.0, drag_base: 0.20, drag_gain: 1.60 },
        jib_foil: FoilSpec { stall_deg: 85.0, drag_base: 0.24, drag_gain: 1.45 },
        jib_share: 0.55,
        jib_target_ratio: 0.65,
        jib_target_min_deg: 12.0,
        jib_target_max_deg: 60.0,
        jib_trim_limit_deg: 72.0,
        apparent_wind_floor: 0.001,
        points_of_sail: default_points_of_sail(),

        heel_base: 0.10,
        heel_drive_gain: 0.18,
        heel_max: 0.22,

        sail_helm_gain: 0.10,
        lateral_yaw_damping: 12.0,
        lateral_yaw_damping_grip: 8.0,
        weathercock_gain: 45.0,
        weathercock_gain_per_speed: 22.0,
        weathercock_min_speed_sq: 0.05,
        yaw_damping: 3.4,
        yaw_damping_per_speed: 0.22,
        yaw_rate_max: 0.70,
        yaw_rate_decay_base: 0.08,
    }
}
