use super::aero::compute_sail_forces;
use super::controls::advance_controls;
use super::hydro::compute_hull_forces;
use super::terms::*;
use super::types::{BoatState, BoatStepDebug, ControlInput};
use crate::{heading_basis, wrap_angle, BoatPhysicsSpec, WindField};

/// Advance the boat by one tick. See `step_boat_dbg` for telemetry.
pub fn step_boat(
    spec: &BoatPhysicsSpec,
    wind: &WindField,
    inputs: ControlInput,
    state: &mut BoatState,
    dt: f32,
    time: f32,
) {
    step_boat_dbg(spec, wind, inputs, state, dt, time, None);
}

/// Variant of `step_boat` that fills out an optional debug telemetry struct.
///
/// Forces are evaluated against the pre-tick velocity and heading, then
/// velocity, position, yaw rate and heading are integrated with
/// semi-implicit Euler. A non-positive or non-finite `dt` leaves the state untouched.
pub fn step_boat_dbg(
    spec: &BoatPhysicsSpec,
    wind: &WindField,
    inputs: ControlInput,
    state: &mut BoatState,
    dt: f32,
    time: f32,
    mut dbg: Option<&mut BoatStepDebug>,
) {
    if !(dt > 0.0 && dt.is_finite()) {
        return;
    }

    state.controls = advance_controls(spec, inputs, state.controls, dt);
    let c = state.controls;

    let true_wind = wind.sample(time);
    let (forward, right) = heading_basis(state.heading);

    let sails = compute_sail_forces(
        spec,
        state.velocity,
        state.heading,
        true_wind,
        c.sail_angle,
        c.sail_deploy_fraction,
    );
    let hull = compute_hull_forces(
        spec,
        state.velocity,
        state.heading,
        c.rudder_angle,
        c.engine_on,
        c.throttle,
    );

    // Linear
    let f_total = sails.total() + hull.total();
    let m = spec.mass.max(1e-3);
    state.velocity += f_total * (dt / m);
    state.position += state.velocity * dt;

    // Yaw. The slip term sees the freshly integrated velocity.
    let speed_f = hull.v_forward.abs();
    let tau_rudder = hull.rudder_yaw_torque;
    let tau_sail_helm = torque_sail_helm(spec, sails.main, right);
    let tau_lateral = torque_lateral_damping(spec, hull.v_right, hull.engine_grip);
    let (tau_weathercock, slip_angle) =
        torque_weathercock(spec, state.velocity, state.heading, speed_f);
    let tau_damping = torque_yaw_damping(spec, state.yaw_rate, speed_f);
    let tau_total = tau_rudder + tau_sail_helm + tau_lateral + tau_weathercock + tau_damping;

    let yaw_acc = if spec.yaw_inertia > 0.0 {
        tau_total / spec.yaw_inertia
    } else {
        0.0
    };
    state.yaw_rate += yaw_acc * dt;
    let r_max = spec.yaw_rate_max.abs();
    state.yaw_rate = state.yaw_rate.clamp(-r_max, r_max);
    state.yaw_rate *= spec.yaw_rate_decay_base.powf(dt);
    state.heading = wrap_angle(state.heading + state.yaw_rate * dt);

    if let Some(d) = dbg.as_mut() {
        let a = sails.diagnostics;
        d.dt = dt;
        d.time = time;
        d.inputs = inputs;
        d.forward = forward;
        d.right = right;
        d.true_wind = true_wind;
        d.true_wind_from = a.true_wind_from;
        d.apparent_wind_from = a.apparent_wind_from;
        d.apparent_speed = a.apparent_speed;
        d.true_wind_angle = a.true_wind_angle;
        d.apparent_wind_angle = a.apparent_wind_angle;
        d.point_of_sail = a.point_of_sail.kind;
        d.target_sail_deg = a.point_of_sail.target_sail_deg;
        d.trim_efficiency = a.trim_efficiency;
        d.trim_error = a.trim_error;
        d.aoa_main = a.aoa_main;
        d.aoa_jib = a.aoa_jib;
        d.jib_trim = a.jib_trim;
        d.sail_power = a.sail_power;
        d.drive_efficiency = a.drive_efficiency;
        d.heel_estimate = a.heel_estimate;
        d.f_main = sails.main;
        d.f_jib = sails.jib;
        d.v_forward = hull.v_forward;
        d.v_right = hull.v_right;
        d.engine_grip = hull.engine_grip;
        d.f_resistance = hull.resistance;
        d.f_rudder_side = hull.rudder_side;
        d.f_engine = hull.engine_thrust;
        d.f_total = f_total;
        d.tau_rudder = tau_rudder;
        d.tau_sail_helm = tau_sail_helm;
        d.tau_lateral = tau_lateral;
        d.tau_weathercock = tau_weathercock;
        d.tau_damping = tau_damping;
        d.tau_total = tau_total;
        d.slip_angle = slip_angle;
        d.yaw_acc = yaw_acc;
        d.yaw_rate = state.yaw_rate;
        d.heading = state.heading;
    }
}
