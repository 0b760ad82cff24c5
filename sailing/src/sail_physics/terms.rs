use crate::{wrap_angle, BoatPhysicsSpec, Vec3f};

// ----- Yaw torques -----

/// Weather helm from the main sail's lateral push.
pub(super) fn torque_sail_helm(spec: &BoatPhysicsSpec, main_force: Vec3f, right: Vec3f) -> f32 {
    main_force.dot(right) * spec.sail_helm_gain
}

pub(super) fn torque_lateral_damping(spec: &BoatPhysicsSpec, v_right: f32, grip: f32) -> f32 {
    -v_right * (spec.lateral_yaw_damping + spec.lateral_yaw_damping_grip * grip)
}

/// Slip-angle term, proportional to the angle from heading to the direction of
/// travel. Returns `(torque, slip_angle)`; both are zero below the minimum speed.
pub(super) fn torque_weathercock(
    spec: &BoatPhysicsSpec,
    velocity: Vec3f,
    heading: f32,
    speed_f: f32,
) -> (f32, f32) {
    if velocity.length_squared() <= spec.weathercock_min_speed_sq {
        return (0.0, 0.0);
    }
    let vel_heading = velocity.x.atan2(velocity.z);
    let slip = wrap_angle(vel_heading - heading);
    let torque = -slip * (spec.weathercock_gain + spec.weathercock_gain_per_speed * speed_f);
    (torque, slip)
}

pub(super) fn torque_yaw_damping(spec: &BoatPhysicsSpec, yaw_rate: f32, speed_f: f32) -> f32 {
    -yaw_rate * (spec.yaw_damping + spec.yaw_damping_per_speed * speed_f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weathercock_acts_against_slip_sign() {
        let spec = BoatPhysicsSpec::default();
        // Moving toward +X while facing +Z: slip is +90°
        let (tau, slip) = torque_weathercock(&spec, Vec3f::new(1.0, 0.0, 0.0), 0.0, 0.0);
        assert!((slip - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!(tau < 0.0);
    }

    #[test]
    fn weathercock_idle_below_threshold() {
        let spec = BoatPhysicsSpec::default();
        let (tau, slip) = torque_weathercock(&spec, Vec3f::new(0.2, 0.0, 0.0), 0.0, 0.0);
        assert_eq!((tau, slip), (0.0, 0.0));
    }

    #[test]
    fn damping_terms_oppose_motion() {
        let spec = BoatPhysicsSpec::default();
        assert!(torque_yaw_damping(&spec, 0.3, 2.0) < 0.0);
        assert!(torque_lateral_damping(&spec, -0.4, 1.0) > 0.0);
        assert!((torque_lateral_damping(&spec, 1.0, 1.0) + 20.0).abs() < 1e-5);
    }
}
