use crate::{heading_basis, BoatPhysicsSpec, Vec3f};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullForces {
    /// Forward drag plus lateral keel resistance (world frame).
    pub resistance: Vec3f,
    pub rudder_side: Vec3f,
    pub rudder_yaw_torque: f32,
    pub engine_thrust: Vec3f,
    /// Water speed along boat-forward.
    pub v_forward: f32,
    /// Water speed along boat-right (leeway).
    pub v_right: f32,
    pub engine_grip: f32,
}

impl HullForces {
    pub fn total(&self) -> Vec3f {
        self.resistance + self.rudder_side + self.engine_thrust
    }
}

/// Keel grip multiplier: prop wash over the keel stiffens lateral resistance.
#[inline]
pub fn engine_grip(spec: &BoatPhysicsSpec, engine_on: bool, throttle: f32) -> f32 {
    if engine_on {
        1.0 + throttle * spec.engine_grip
    } else {
        1.0
    }
}

pub fn compute_hull_forces(
    spec: &BoatPhysicsSpec,
    velocity: Vec3f,
    heading: f32,
    rudder_angle: f32,
    engine_on: bool,
    throttle: f32,
) -> HullForces {
    let (fwd, right) = heading_basis(heading);
    let v_f = velocity.dot(fwd);
    let v_r = velocity.dot(right);
    let speed_f = v_f.abs();
    let grip = engine_grip(spec, engine_on, throttle);

    let drag_f = -(spec.hull_drag_lin * v_f + spec.hull_drag_quad * v_f * v_f.abs());
    let k_lin = (spec.keel_drag_lin + spec.keel_drag_lin_per_speed * speed_f) * grip;
    let k_quad = (spec.keel_drag_quad + spec.keel_drag_quad_per_speed * speed_f) * grip;
    let drag_r = -(k_lin * v_r + k_quad * v_r * v_r.abs());

    // Rudder authority scales with flow past the blade
    let flow_sq = speed_f * speed_f;
    let rudder_side = right * (rudder_angle * flow_sq * spec.rudder_side_gain);
    let rudder_yaw_torque = rudder_angle * flow_sq * spec.rudder_yaw_gain;

    let engine_thrust = if engine_on {
        fwd * (spec.engine_thrust * throttle)
    } else {
        Vec3f::ZERO
    };

    HullForces {
        resistance: fwd * drag_f + right * drag_r,
        rudder_side,
        rudder_yaw_torque,
        engine_thrust,
        v_forward: v_f,
        v_right: v_r,
        engine_grip: grip,
    }
}
