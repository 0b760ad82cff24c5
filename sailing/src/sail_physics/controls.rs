use crate::BoatPhysicsSpec;

use super::types::{ControlInput, ControlState};

/// Move `value` toward `target` by at most `rate * dt`, landing exactly on it.
#[inline]
pub fn integrate_toward(value: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let step = (rate * dt).max(0.0);
    let delta = target - value;
    if delta.abs() <= step {
        target
    } else {
        value + step * delta.signum()
    }
}

/// Shrink the magnitude of `value` by `rate * dt`, stopping at zero.
#[inline]
pub fn decay_toward_zero(value: f32, rate: f32, dt: f32) -> f32 {
    let mag = (value.abs() - (rate * dt).max(0.0)).max(0.0);
    mag.copysign(value)
}

/// +1, -1 or 0 from a pair of opposing intents.
#[inline]
fn intent_axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

/// Advance rudder, sail trim, furl and throttle by one tick of player intent.
/// Every output is clamped after integration.
pub fn advance_controls(
    spec: &BoatPhysicsSpec,
    input: ControlInput,
    current: ControlState,
    dt: f32,
) -> ControlState {
    let mut next = current;
    if dt <= 0.0 {
        return next;
    }

    let rudder_max = spec.rudder_max_deg.to_radians();
    let rudder_axis = intent_axis(input.turn_left, input.turn_right);
    next.rudder_angle = if rudder_axis != 0.0 {
        integrate_toward(
            current.rudder_angle,
            rudder_axis * rudder_max,
            spec.rudder_rate_deg.to_radians(),
            dt,
        )
    } else {
        decay_toward_zero(current.rudder_angle, spec.rudder_return_deg.to_radians(), dt)
    };
    next.rudder_angle = next.rudder_angle.clamp(-rudder_max, rudder_max);

    // Sail trim holds wherever it was left.
    let sail_max = spec.sail_max_deg.to_radians();
    let sail_axis = intent_axis(input.sail_out, input.sail_in);
    if sail_axis != 0.0 {
        next.sail_angle = integrate_toward(
            current.sail_angle,
            sail_axis * sail_max,
            spec.sail_rate_deg.to_radians(),
            dt,
        );
    }
    next.sail_angle = next.sail_angle.clamp(-sail_max, sail_max);

    let furl_axis = intent_axis(input.furl_out, input.furl_in);
    if furl_axis != 0.0 {
        let target = if furl_axis > 0.0 { 1.0 } else { 0.0 };
        next.sail_deploy_fraction =
            integrate_toward(current.sail_deploy_fraction, target, spec.furl_rate, dt);
    }
    next.sail_deploy_fraction = next.sail_deploy_fraction.clamp(0.0, 1.0);

    if input.engine_toggle {
        next.engine_on = !current.engine_on;
    }
    if next.engine_on {
        let throttle_axis = intent_axis(input.throttle_up, input.throttle_down);
        if throttle_axis != 0.0 {
            let target = if throttle_axis > 0.0 { 1.0 } else { 0.0 };
            next.throttle = integrate_toward(current.throttle, target, spec.throttle_rate, dt);
        }
    } else {
        next.throttle = decay_toward_zero(current.throttle, spec.throttle_decay, dt);
    }
    next.throttle = next.throttle.clamp(0.0, 1.0);

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> (BoatPhysicsSpec, ControlState) {
        let spec = BoatPhysicsSpec::default();
        let state = ControlState::new(&spec);
        (spec, state)
    }

    #[test]
    fn integrate_toward_never_overshoots() {
        assert_eq!(integrate_toward(0.9, 1.0, 1.0, 0.5), 1.0);
        assert!((integrate_toward(0.0, 1.0, 1.0, 0.25) - 0.25).abs() < 1e-6);
        assert!((integrate_toward(0.0, -1.0, 2.0, 0.25) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn decay_preserves_sign_and_stops_at_zero() {
        assert!((decay_toward_zero(-0.5, 1.0, 0.1) + 0.4).abs() < 1e-6);
        assert_eq!(decay_toward_zero(0.05, 1.0, 0.1), 0.0);
        assert_eq!(decay_toward_zero(-0.05, 1.0, 0.1), 0.0);
    }

    #[test]
    fn turn_left_drives_rudder_positive_to_limit() {
        let (spec, mut c) = controls();
        let input = ControlInput { turn_left: true, ..Default::default() };
        for _ in 0..120 {
            c = advance_controls(&spec, input, c, 1.0 / 60.0);
        }
        assert!((c.rudder_angle - 28f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn opposing_turn_intents_center_the_rudder() {
        let (spec, mut c) = controls();
        c.rudder_angle = 0.1;
        let input = ControlInput { turn_left: true, turn_right: true, ..Default::default() };
        c = advance_controls(&spec, input, c, 0.05);
        assert!(c.rudder_angle < 0.1);
    }

    #[test]
    fn sail_trim_holds_without_intent() {
        let (spec, mut c) = controls();
        let before = c.sail_angle;
        c = advance_controls(&spec, ControlInput::default(), c, 0.5);
        assert_eq!(c.sail_angle, before);
        let out = ControlInput { sail_out: true, ..Default::default() };
        c = advance_controls(&spec, out, c, 0.1);
        assert!((c.sail_angle - (before + 7.5f32.to_radians())).abs() < 1e-5);
    }

    #[test]
    fn furl_moves_at_rate_and_clamps() {
        let (spec, mut c) = controls();
        let furl = ControlInput { furl_in: true, ..Default::default() };
        c = advance_controls(&spec, furl, c, 0.5);
        assert!((c.sail_deploy_fraction - (1.0 - 0.425)).abs() < 1e-5);
        for _ in 0..10 {
            c = advance_controls(&spec, furl, c, 0.5);
        }
        assert_eq!(c.sail_deploy_fraction, 0.0);
    }

    #[test]
    fn throttle_ignored_and_decays_while_engine_off() {
        let (spec, mut c) = controls();
        c.throttle = 0.5;
        let up = ControlInput { throttle_up: true, ..Default::default() };
        c = advance_controls(&spec, up, c, 0.25);
        assert!((c.throttle - (0.5 - 0.225)).abs() < 1e-5);
    }

    #[test]
    fn engine_toggle_then_throttle_in_same_tick() {
        let (spec, mut c) = controls();
        let input = ControlInput { engine_toggle: true, throttle_up: true, ..Default::default() };
        c = advance_controls(&spec, input, c, 0.5);
        assert!(c.engine_on);
        assert!((c.throttle - 0.325).abs() < 1e-5);
        let toggle = ControlInput { engine_toggle: true, ..Default::default() };
        c = advance_controls(&spec, toggle, c, 0.1);
        assert!(!c.engine_on);
        assert!((c.throttle - 0.235).abs() < 1e-5);
    }
}
