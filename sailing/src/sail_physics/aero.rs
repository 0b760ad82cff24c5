use crate::math::sign_or_one;
use crate::{
    heading_basis, point_of_sail_for, wrap_angle, BoatPhysicsSpec, FoilSpec, PointOfSail, Vec3f,
};

/// Intermediate quantities of the sail model, kept for HUD readouts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroDiagnostics {
    /// Negated true wind: points toward where the wind comes from.
    pub true_wind_from: Vec3f,
    /// `-true_wind - velocity`, the "from" vector used for lift and drag.
    pub apparent_wind_from: Vec3f,
    /// Apparent wind speed after the minimum-speed floor.
    pub apparent_speed: f32,
    /// Radians, positive when the true wind comes from the right.
    pub true_wind_angle: f32,
    pub apparent_wind_angle: f32,
    pub point_of_sail: PointOfSail,
    pub trim_efficiency: f32,
    /// Radians between actual and target sail angle magnitude.
    pub trim_error: f32,
    pub aoa_main: f32,
    pub aoa_jib: f32,
    pub jib_trim: f32,
    pub sail_power: f32,
    /// `basePower · trimEff · deploy`, clamped to [0, 1].
    pub drive_efficiency: f32,
    /// Visual heel suggestion in radians, clamped to `±heel_max`.
    pub heel_estimate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SailForces {
    pub main: Vec3f,
    pub jib: Vec3f,
    pub diagnostics: AeroDiagnostics,
}

impl SailForces {
    pub fn total(&self) -> Vec3f {
        self.main + self.jib
    }
}

/// Lift and drag coefficients for a foil at `abs_aoa` radians.
#[inline]
fn foil_coefficients(foil: &FoilSpec, abs_aoa: f32) -> (f32, f32) {
    let stall = (1.0 - abs_aoa / foil.stall_deg.to_radians()).clamp(0.0, 1.0);
    let lift = (2.0 * abs_aoa).sin() * stall;
    let drag = foil.drag_base + foil.drag_gain * abs_aoa.sin().powi(2);
    (lift, drag)
}

/// Main sail and jib forces (world frame) for the current apparent wind.
pub fn compute_sail_forces(
    spec: &BoatPhysicsSpec,
    velocity: Vec3f,
    heading: f32,
    true_wind: Vec3f,
    sail_angle: f32,
    sail_deploy_fraction: f32,
) -> SailForces {
    let (fwd, right) = heading_basis(heading);

    let tw_from = -true_wind;
    let app_from = tw_from - velocity;
    let app_speed = app_from.length().max(spec.apparent_wind_floor);

    // Point of sail from the true wind in the boat frame
    let twa = tw_from.dot(right).atan2(tw_from.dot(fwd));
    let abs_twa_deg = twa.abs().to_degrees();
    let pos = point_of_sail_for(&spec.points_of_sail, abs_twa_deg);

    let sail_abs_deg = sail_angle.to_degrees().abs();
    let trim_error_deg = (sail_abs_deg - pos.target_sail_deg).abs();
    let trim_eff = (1.0 - trim_error_deg / pos.trim_window_deg).clamp(0.0, 1.0);

    let q = app_speed * app_speed;
    let app_f = app_from.dot(fwd);
    let app_r = app_from.dot(right);
    let app_angle = app_r.atan2(app_f);

    // Directions degenerate to zero with no apparent wind
    let drag_dir = -app_from / app_speed;
    let base_lift = fwd * (-app_r / app_speed) + right * (app_f / app_speed);

    let aoa = wrap_angle(app_angle - sail_angle);
    let (lift_c, drag_c) = foil_coefficients(&spec.main_foil, aoa.abs());
    let lift_dir = base_lift * sign_or_one(aoa);
    let sail_power = spec.sail_power_gain * pos.base_power * trim_eff * sail_deploy_fraction;
    let main = (drag_dir * drag_c + lift_dir * lift_c) * (q * sail_power);

    // Jib sheets itself to a fraction of the main's target, on the side the true wind sets
    let jib_target_deg = (pos.target_sail_deg * spec.jib_target_ratio)
        .clamp(spec.jib_target_min_deg, spec.jib_target_max_deg);
    let jib_limit = spec.jib_trim_limit_deg.to_radians();
    let jib_trim = (jib_target_deg.to_radians() * sign_or_one(twa)).clamp(-jib_limit, jib_limit);
    let jib_aoa = wrap_angle(app_angle - jib_trim);
    let (jib_lift_c, jib_drag_c) = foil_coefficients(&spec.jib_foil, jib_aoa.abs());
    let jib_lift_dir = base_lift * sign_or_one(jib_aoa);
    let jib_power = sail_power * spec.jib_share;
    let jib = (drag_dir * jib_drag_c + jib_lift_dir * jib_lift_c) * (q * jib_power);

    let drive_efficiency = (pos.base_power * trim_eff * sail_deploy_fraction).clamp(0.0, 1.0);
    let heel_gain = spec.heel_base + drive_efficiency * spec.heel_drive_gain;
    let heel_estimate = ((-app_r / app_speed) * heel_gain).clamp(-spec.heel_max, spec.heel_max);

    SailForces {
        main,
        jib,
        diagnostics: AeroDiagnostics {
            true_wind_from: tw_from,
            apparent_wind_from: app_from,
            apparent_speed: app_speed,
            true_wind_angle: twa,
            apparent_wind_angle: app_angle,
            point_of_sail: pos,
            trim_efficiency: trim_eff,
            trim_error: trim_error_deg.to_radians(),
            aoa_main: aoa,
            aoa_jib: jib_aoa,
            jib_trim,
            sail_power,
            drive_efficiency,
            heel_estimate,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PointOfSailKind;

    const SAIL_55: f32 = 55.0 * std::f32::consts::PI / 180.0;

    fn beam_wind_from_right(speed: f32) -> Vec3f {
        // Air moving toward -X comes from +X, the boat's right at heading 0
        Vec3f::new(-speed, 0.0, 0.0)
    }

    #[test]
    fn foil_lift_vanishes_at_stall_and_zero_aoa() {
        let foil = BoatPhysicsSpec::default().main_foil;
        let (lift, drag) = foil_coefficients(&foil, 0.0);
        assert_eq!(lift, 0.0);
        assert!((drag - 0.20).abs() < 1e-6);
        let (lift, _) = foil_coefficients(&foil, 80f32.to_radians());
        assert!(lift.abs() < 1e-6);
    }

    #[test]
    fn beam_wind_from_right_classifies_as_beam_reach() {
        let spec = BoatPhysicsSpec::default();
        let wind = beam_wind_from_right(6.0);
        let f = compute_sail_forces(&spec, Vec3f::ZERO, 0.0, wind, SAIL_55, 1.0);
        let d = f.diagnostics;
        assert_eq!(d.point_of_sail.kind, PointOfSailKind::BeamReach);
        assert!((d.true_wind_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((d.trim_efficiency - 1.0).abs() < 1e-5);
        assert!(f.total().length() > 1.0);
    }

    #[test]
    fn zero_apparent_wind_yields_zero_force() {
        let spec = BoatPhysicsSpec::default();
        for deg in [-80.0f32, -10.0, 0.0, 10.0, 55.0] {
            let f =
                compute_sail_forces(&spec, Vec3f::ZERO, 0.3, Vec3f::ZERO, deg.to_radians(), 1.0);
            assert_eq!(f.total(), Vec3f::ZERO, "sail={deg}");
            assert!(f.diagnostics.apparent_speed >= spec.apparent_wind_floor);
        }
    }

    #[test]
    fn furled_sail_produces_no_force() {
        let spec = BoatPhysicsSpec::default();
        let wind = beam_wind_from_right(6.0);
        let f = compute_sail_forces(&spec, Vec3f::ZERO, 0.0, wind, SAIL_55, 0.0);
        assert_eq!(f.total(), Vec3f::ZERO);
        assert_eq!(f.diagnostics.drive_efficiency, 0.0);
    }

    #[test]
    fn jib_trim_follows_wind_side() {
        let spec = BoatPhysicsSpec::default();
        let from_right =
            compute_sail_forces(&spec, Vec3f::ZERO, 0.0, beam_wind_from_right(6.0), 0.9, 1.0);
        let from_left =
            compute_sail_forces(&spec, Vec3f::ZERO, 0.0, beam_wind_from_right(-6.0), 0.9, 1.0);
        assert!(from_right.diagnostics.jib_trim > 0.0);
        assert!(from_left.diagnostics.jib_trim < 0.0);
        // 0.65 · 55° = 35.75°
        assert!((from_right.diagnostics.jib_trim - 35.75f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn jib_target_floors_at_minimum_in_no_go() {
        let spec = BoatPhysicsSpec::default();
        // 20° off the bow on either side: 0.65 · 10° = 6.5° lifts to the 12° floor
        for side in [1.0f32, -1.0] {
            let from = 20f32.to_radians() * side;
            let wind = -Vec3f::new(from.sin(), 0.0, from.cos()) * 7.2;
            let f = compute_sail_forces(&spec, Vec3f::ZERO, 0.0, wind, 0.2, 1.0);
            let d = f.diagnostics;
            assert_eq!(d.point_of_sail.kind, PointOfSailKind::NoGo, "side={side}");
            assert!(d.true_wind_angle.signum() == side, "twa={}", d.true_wind_angle);
            let expected = 12f32.to_radians() * side;
            assert!((d.jib_trim - expected).abs() < 1e-6, "jib={} side={side}", d.jib_trim);
        }
    }

    #[test]
    fn jib_trim_is_held_inside_its_limit() {
        let spec = BoatPhysicsSpec {
            jib_target_ratio: 1.0,
            jib_target_max_deg: 90.0,
            ..BoatPhysicsSpec::default()
        };
        // Dead run wants 85°, the sheet stops at 72° (0.4π)
        let f = compute_sail_forces(&spec, Vec3f::ZERO, 0.0, Vec3f::new(0.0, 0.0, 7.2), 1.4, 1.0);
        let d = f.diagnostics;
        assert_eq!(d.point_of_sail.kind, PointOfSailKind::Run);
        let limit = 0.4 * std::f32::consts::PI;
        assert!((d.jib_trim.abs() - limit).abs() < 1e-5, "jib={}", d.jib_trim);
    }

    #[test]
    fn heel_estimate_is_bounded() {
        let spec = BoatPhysicsSpec::default();
        let f =
            compute_sail_forces(&spec, Vec3f::ZERO, 0.0, beam_wind_from_right(40.0), SAIL_55, 1.0);
        assert!(f.diagnostics.heel_estimate.abs() <= spec.heel_max + 1e-6);
    }

    #[test]
    fn heel_gains_come_from_the_boat() {
        let spec = BoatPhysicsSpec { heel_base: 0.05, heel_drive_gain: 0.0, ..Default::default() };
        let f =
            compute_sail_forces(&spec, Vec3f::ZERO, 0.0, beam_wind_from_right(6.0), SAIL_55, 1.0);
        // Wind square from the right: -appR/appSpeed = -1
        assert!((f.diagnostics.heel_estimate + 0.05).abs() < 1e-6);
    }
}
