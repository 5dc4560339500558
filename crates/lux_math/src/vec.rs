//! Vector helpers glam does not carry.

use crate::Vec3;

/// Absolute tolerance for vector equality checks.
pub const EPSILON: f32 = 1e-6;

/// Approximate equality: every component within [`EPSILON`].
///
/// Vector comparisons tolerate floating-point drift; never compare
/// bit-exact.
#[inline]
pub fn approx_eq(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` across a boundary with outward unit normal `n` by Snell's
/// law, where `ni_over_nt` is the ratio of refractive indices.
///
/// Returns `None` when the angle is past critical and the ray reflects
/// totally internally.
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_tolerates_drift() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = a + Vec3::splat(EPSILON * 0.5);
        assert!(approx_eq(a, b));
        assert!(!approx_eq(a, a + Vec3::splat(1e-3)));
    }

    #[test]
    fn test_reflect_decomposition() {
        // dot(reflect(v, n), n) == -dot(v, n): the parallel component flips,
        // the perpendicular component is untouched.
        let cases = [
            (Vec3::new(1.0, -1.0, 0.0), Vec3::Y),
            (Vec3::new(0.3, -2.0, 0.7), Vec3::Y),
            (Vec3::new(-1.0, 0.5, 2.0), Vec3::X),
            (Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 1.0)),
        ];
        for (v, n) in cases {
            let r = reflect(v, n);
            assert!((r.dot(n) + v.dot(n)).abs() < EPSILON);
            let perp_v = v - v.dot(n) * n;
            let perp_r = r - r.dot(n) * n;
            assert!(approx_eq(perp_v, perp_r));
        }
    }

    #[test]
    fn test_reflect_head_on() {
        let r = reflect(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        assert!(approx_eq(r, Vec3::Y));
    }

    #[test]
    fn test_normalize_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.1, 0.02, 5.0),
            Vec3::splat(123.0),
        ] {
            assert!((v.normalize().length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_refract_straight_through() {
        // Normal incidence with matched indices passes unchanged.
        let v = Vec3::new(0.0, -1.0, 0.0);
        let refracted = refract(v, Vec3::Y, 1.0).unwrap();
        assert!(approx_eq(refracted, v));
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Grazing exit from a dense medium: no refracted ray.
        let v = Vec3::new(1.0, -0.1, 0.0);
        assert!(refract(v, Vec3::Y, 1.5).is_none());
    }
}
