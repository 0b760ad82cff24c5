use crate::{BoatPhysicsSpec, PointOfSailKind, Vec3f};

/// Per-tick player intents. Produced by whatever input collaborator is
/// attached (keyboard, VR, scripted run) and consumed once by the integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Drives the rudder toward its positive limit.
    pub turn_left: bool,
    /// Drives the rudder toward its negative limit.
    pub turn_right: bool,
    pub sail_out: bool,
    pub sail_in: bool,
    /// Reduces sail deploy fraction.
    pub furl_in: bool,
    /// Increases sail deploy fraction.
    pub furl_out: bool,
    pub throttle_up: bool,
    pub throttle_down: bool,
    /// Edge-triggered by the caller: true for exactly one tick per press.
    pub engine_toggle: bool,
}

impl ControlInput {
    /// Analog deadzone shared by every axis.
    pub const AXIS_DEADZONE: f32 = 0.001;

    /// Map analog rudder and sail axes in [-1, 1] onto intents.
    /// Positive rudder steers right, positive sail eases out. NaN reads as idle.
    pub fn from_axes(rudder: f32, sail: f32) -> Self {
        Self {
            turn_left: rudder < -Self::AXIS_DEADZONE,
            turn_right: rudder > Self::AXIS_DEADZONE,
            sail_out: sail > Self::AXIS_DEADZONE,
            sail_in: sail < -Self::AXIS_DEADZONE,
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Control-surface and engine state, advanced by `advance_controls`.
/// Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub rudder_angle: f32,
    pub sail_angle: f32,
    pub sail_deploy_fraction: f32,
    pub engine_on: bool,
    pub throttle: f32,
}

impl ControlState {
    pub fn new(spec: &BoatPhysicsSpec) -> Self {
        Self {
            rudder_angle: 0.0,
            sail_angle: spec.initial_sail_deg.to_radians(),
            sail_deploy_fraction: 1.0,
            engine_on: false,
            throttle: 0.0,
        }
    }
}

/// Full mutable state of the boat. Owned by a single integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct BoatState {
    /// World position; only X and Z are simulated.
    pub position: Vec3f,
    pub velocity: Vec3f,
    /// Radians in (-π, π]; 0 faces +Z and increasing heading turns toward +X.
    pub heading: f32,
    /// rad/s, bounded by `BoatPhysicsSpec::yaw_rate_max`.
    pub yaw_rate: f32,
    pub controls: ControlState,
}

impl BoatState {
    pub fn new(spec: &BoatPhysicsSpec) -> Self {
        Self {
            position: Vec3f::ZERO,
            velocity: Vec3f::ZERO,
            heading: 0.0,
            yaw_rate: 0.0,
            controls: ControlState::new(spec),
        }
    }

    /// Reinitialize in place. The sail comes back at `reset_sail_deg` trim
    /// rather than the initial one.
    pub fn reset(&mut self, spec: &BoatPhysicsSpec) {
        *self = Self::new(spec);
        self.controls.sail_angle = spec.reset_sail_deg.to_radians();
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl Default for BoatState {
    fn default() -> Self {
        Self::new(&BoatPhysicsSpec::default())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoatStepDebug {
    pub dt: f32,
    pub time: f32,
    pub inputs: ControlInput,
    // Orientation basis (world XZ plane)
    pub forward: Vec3f,
    pub right: Vec3f,
    // Wind
    pub true_wind: Vec3f,
    pub true_wind_from: Vec3f,
    pub apparent_wind_from: Vec3f,
    pub apparent_speed: f32,
    pub true_wind_angle: f32,
    pub apparent_wind_angle: f32,
    // Sails
    pub point_of_sail: PointOfSailKind,
    pub target_sail_deg: f32,
    pub trim_efficiency: f32,
    pub trim_error: f32,
    pub aoa_main: f32,
    pub aoa_jib: f32,
    pub jib_trim: f32,
    pub sail_power: f32,
    pub drive_efficiency: f32,
    pub heel_estimate: f32,
    pub f_main: Vec3f,
    pub f_jib: Vec3f,
    // Hull
    pub v_forward: f32,
    pub v_right: f32,
    pub engine_grip: f32,
    pub f_resistance: Vec3f,
    pub f_rudder_side: Vec3f,
    pub f_engine: Vec3f,
    pub f_total: Vec3f,
    // Yaw torques (breakdown)
    pub tau_rudder: f32,
    pub tau_sail_helm: f32,
    pub tau_lateral: f32,
    pub tau_weathercock: f32,
    pub tau_damping: f32,
    pub tau_total: f32,
    pub slip_angle: f32,
    pub yaw_acc: f32,
    pub yaw_rate: f32,
    pub heading: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_map_to_intents_with_deadzone() {
        let i = ControlInput::from_axes(0.5, -0.5);
        assert!(i.turn_right && !i.turn_left);
        assert!(i.sail_in && !i.sail_out);
        assert!(ControlInput::from_axes(0.0005, -0.0005).is_idle());
        assert!(ControlInput::from_axes(f32::NAN, f32::NAN).is_idle());
    }

    #[test]
    fn reset_uses_reset_trim_and_clears_motion() {
        let spec = BoatPhysicsSpec::default();
        let mut state = BoatState::new(&spec);
        state.position = Vec3f::new(3.0, 0.0, -2.0);
        state.velocity = Vec3f::new(1.0, 0.0, 1.0);
        state.heading = 1.0;
        state.controls.engine_on = true;
        state.controls.throttle = 0.7;
        state.reset(&spec);
        assert_eq!(state.position, Vec3f::ZERO);
        assert_eq!(state.velocity, Vec3f::ZERO);
        assert_eq!(state.heading, 0.0);
        assert!(!state.controls.engine_on);
        assert_eq!(state.controls.throttle, 0.0);
        assert!((state.controls.sail_angle - 25f32.to_radians()).abs() < 1e-6);
    }
}
