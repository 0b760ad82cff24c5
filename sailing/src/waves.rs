//! Visual sea surface and the hull attitude derived from it.
//!
//! Nothing here feeds back into the force model: the boat is simulated on a
//! flat XZ plane and these helpers only decide how it should sit on the waves.

use crate::{heading_basis, BoatSnapshot};

const WAVE_AMPLITUDE: f32 = 0.15;
/// Heights snap to this step for a faceted low-poly look.
const WAVE_STEP: f32 = 0.035;
const FREEBOARD: f32 = 0.30;
const ROLL_PROBE: f32 = 1.3;
const PITCH_PROBE: f32 = 1.8;
const ROLL_LIMIT: f32 = 0.22;
const PITCH_LIMIT: f32 = 0.12;
/// Fraction of the attitude error left after one second of smoothing.
const ATTITUDE_RESIDUAL: f32 = 0.0012;

/// Height of the sea surface at world `(x, z)` and time `t`.
pub fn water_height(x: f32, z: f32, t: f32) -> f32 {
    let w1 = (x * 0.040 + t * 0.75).sin() * 0.78;
    let w2 = (z * 0.038 - t * 0.68).sin() * 0.62;
    let w3 = ((x + z) * 0.028 + t * 1.05).sin() * 0.45;
    let h = WAVE_AMPLITUDE * (w1 + w2 + w3);
    (h / WAVE_STEP).round() * WAVE_STEP
}

/// Smoothed roll/pitch and ride height of the hull, in radians and meters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HullAttitude {
    pub roll: f32,
    pub pitch: f32,
    pub ride_height: f32,
}

impl HullAttitude {
    /// Ease toward the attitude implied by the latest snapshot and the sea at `t`.
    pub fn update(&mut self, snap: &BoatSnapshot, t: f32, dt: f32) {
        let p = snap.position;
        let (fwd, right) = heading_basis(snap.heading);
        let v_f = snap.velocity.dot(fwd);
        let v_r = snap.velocity.dot(right);

        let roll_wave =
            water_height(p.x + ROLL_PROBE, p.z, t) - water_height(p.x - ROLL_PROBE, p.z, t);
        let pitch_wave =
            water_height(p.x, p.z + PITCH_PROBE, t) - water_height(p.x, p.z - PITCH_PROBE, t);

        let target_roll = (-v_r * 0.04 + roll_wave * 0.70 + snap.derived.heel_estimate)
            .clamp(-ROLL_LIMIT, ROLL_LIMIT);
        let target_pitch = (-v_f * 0.014 + pitch_wave * 0.55).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let k = 1.0 - ATTITUDE_RESIDUAL.powf(dt.max(0.0));
        self.roll += (target_roll - self.roll) * k;
        self.pitch += (target_pitch - self.pitch) * k;
        self.ride_height = water_height(p.x, p.z, t) + FREEBOARD;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3f;

    #[test]
    fn height_is_quantized_and_bounded() {
        for i in 0..200 {
            let t = i as f32 * 0.37;
            let h = water_height(i as f32 * 3.1, -(i as f32) * 1.7, t);
            let steps = h / WAVE_STEP;
            assert!((steps - steps.round()).abs() < 1e-3, "h={h}");
            assert!(h.abs() <= WAVE_AMPLITUDE * (0.78 + 0.62 + 0.45) + WAVE_STEP);
        }
    }

    #[test]
    fn attitude_stays_within_limits_and_zero_dt_holds() {
        let mut att = HullAttitude::default();
        let mut snap = BoatSnapshot::default();
        snap.velocity = Vec3f::new(-30.0, 0.0, 40.0);
        snap.derived.heel_estimate = 0.22;
        for i in 0..600 {
            att.update(&snap, i as f32 / 60.0, 1.0 / 60.0);
            assert!(att.roll.abs() <= ROLL_LIMIT + 1e-6);
            assert!(att.pitch.abs() <= PITCH_LIMIT + 1e-6);
        }
        let held = att;
        att.update(&snap, 10.0, 0.0);
        assert_eq!((att.roll, att.pitch), (held.roll, held.pitch));
    }
}
