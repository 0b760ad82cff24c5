use serde::{Deserialize, Serialize};

use crate::Vec3f;

/// Steady-direction true wind with a coherent two-tone gust.
///
/// The field has no internal state: `sample` is a pure function of simulation
/// time, so replaying the same clock reproduces the same wind exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindField {
    /// Direction the air moves toward, radians, same convention as boat heading.
    pub base_direction: f32,
    /// Mean wind speed (m/s) before gust modulation.
    pub base_speed: f32,
}

impl Default for WindField {
    fn default() -> Self {
        Self::from_degrees(30.0, 7.2)
    }
}

impl WindField {
    pub const fn new(base_direction: f32, base_speed: f32) -> Self {
        Self { base_direction, base_speed }
    }

    pub fn from_degrees(direction_deg: f32, base_speed: f32) -> Self {
        Self::new(direction_deg.to_radians(), base_speed)
    }

    pub const fn calm() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Gust multiplier in [0.75, 1.25].
    #[inline]
    pub fn gust_multiplier(time: f32) -> f32 {
        1.0 + 0.15 * (0.55 * time).sin() + 0.10 * (1.7 * time).sin()
    }

    /// True wind vector (air-to direction) in the world XZ plane.
    pub fn sample(&self, time: f32) -> Vec3f {
        let speed = self.base_speed * Self::gust_multiplier(time);
        let (s, c) = self.base_direction.sin_cos();
        Vec3f::new(s * speed, 0.0, c * speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_points_along_base_direction() {
        let wind = WindField::from_degrees(90.0, 5.0);
        let v = wind.sample(0.0);
        assert!((v.x - 5.0).abs() < 1e-5, "v={v:?}");
        assert!(v.z.abs() < 1e-5);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn replaying_time_reproduces_sample() {
        let wind = WindField::default();
        assert_eq!(wind.sample(12.345), wind.sample(12.345));
    }

    #[test]
    fn calm_field_is_zero() {
        assert_eq!(WindField::calm().sample(3.0), Vec3f::ZERO);
    }
}
