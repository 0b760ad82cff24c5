use std::f32::consts::{PI, TAU};

pub use bevy_math::Vec3 as Vec3f;

/// Wrap an angle in radians to the half-open interval (-π, π].
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let w = (a + PI).rem_euclid(TAU) - PI;
    if w <= -PI {
        w + TAU
    } else {
        w
    }
}

/// World-space forward and right unit vectors for a heading.
///
/// Heading 0 points along +Z; increasing heading rotates forward toward +X.
/// Right is forward rotated a quarter turn further, so at heading 0 it is +X.
#[inline]
pub fn heading_basis(heading: f32) -> (Vec3f, Vec3f) {
    let (s, c) = heading.sin_cos();
    (Vec3f::new(s, 0.0, c), Vec3f::new(c, 0.0, -s))
}

/// Sign that treats zero (and NaN) as positive.
#[inline]
pub(crate) fn sign_or_one(x: f32) -> f32 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_pi_and_maps_minus_pi_to_pi() {
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn basis_is_orthonormal_and_right_is_plus_x_at_zero() {
        let (fwd, right) = heading_basis(0.0);
        assert!((fwd - Vec3f::Z).length() < 1e-6);
        assert!((right - Vec3f::X).length() < 1e-6);
        let (fwd, right) = heading_basis(1.1);
        assert!(fwd.dot(right).abs() < 1e-6);
        assert!((fwd.length() - 1.0).abs() < 1e-6);
    }
}
