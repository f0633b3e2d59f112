// src/vector/tests.rs

#[cfg(test)]
mod vector_tests {
    use crate::math::{approx_eq, HALF_PI, PI};
    use crate::vector::Vector3;
    use test_log::test;

    const EPS: f32 = 1e-5;

    fn assert_vec_eq(actual: Vector3, expected: Vector3, message: &str) {
        assert!(
            approx_eq(actual.x, expected.x, EPS)
                && approx_eq(actual.y, expected.y, EPS)
                && approx_eq(actual.z, expected.z, EPS),
            "{}: expected {}, got {}",
            message,
            expected,
            actual
        );
    }

    #[test]
    fn arithmetic_in_place_and_by_value() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c -= Vector3::new(1.0, 1.0, 1.0);
        c *= 2.0;
        c /= 4.0;
        assert_eq!(c, Vector3::new(2.0, 3.0, 4.0));

        c.add_xyz(1.0, 1.0, 1.0).sub_xyz(0.5, 0.5, 0.5);
        assert_eq!(c, Vector3::new(2.5, 3.5, 4.5));
    }

    #[test]
    fn magnitude_distance_and_dot() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.mag(), 5.0);
        assert_eq!(v.mag_sq(), 25.0);
        assert_eq!(v.dist(Vector3::ZERO), 5.0);
        assert_eq!(Vector3::distance(Vector3::ZERO, v), 5.0);
        assert_eq!(v.dot(Vector3::new(1.0, 1.0, 1.0)), 7.0);
        assert_eq!(v.dot_xyz(2.0, 0.0, 9.0), 6.0);
    }

    #[test]
    fn cross_product_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vector3::new(0.0, 0.0, -1.0));

        let mut target = Vector3::ZERO;
        x.cross_into(y, &mut target);
        assert_eq!(target, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn normalize_is_noop_for_zero_and_unit_vectors() {
        let mut zero = Vector3::ZERO;
        zero.normalize();
        assert_eq!(zero, Vector3::ZERO);

        let mut unit = Vector3::new(0.0, 1.0, 0.0);
        unit.normalize();
        assert_eq!(unit, Vector3::new(0.0, 1.0, 0.0));

        let mut v = Vector3::new(3.0, 0.0, 4.0);
        v.normalize();
        assert_vec_eq(v, Vector3::new(0.6, 0.0, 0.8), "normalize");

        let mut target = Vector3::new(9.0, 9.0, 9.0);
        Vector3::ZERO.normalize_into(&mut target);
        assert_eq!(target, Vector3::ZERO, "zero copied unchanged");
    }

    #[test]
    fn set_mag_and_limit() {
        let mut v = Vector3::new(10.0, 0.0, 0.0);
        v.set_mag(2.0);
        assert_vec_eq(v, Vector3::new(2.0, 0.0, 0.0), "set_mag");

        let mut w = Vector3::new(0.0, 30.0, 40.0);
        w.limit(5.0);
        assert_vec_eq(w, Vector3::new(0.0, 3.0, 4.0), "limit shrinks");

        let mut small = Vector3::new(1.0, 0.0, 0.0);
        small.limit(5.0);
        assert_eq!(small, Vector3::new(1.0, 0.0, 0.0), "limit leaves short vectors alone");

        let mut out = Vector3::ZERO;
        Vector3::new(0.0, 0.0, 7.0).set_mag_into(&mut out, 3.0);
        assert_vec_eq(out, Vector3::new(0.0, 0.0, 3.0), "set_mag_into");
    }

    #[test]
    fn lerp_per_component() {
        let mut a = Vector3::new(0.0, 10.0, -4.0);
        a.lerp(Vector3::new(10.0, 20.0, 4.0), 0.25);
        assert_vec_eq(a, Vector3::new(2.5, 12.5, -2.0), "lerp");

        let mid = Vector3::lerp_between(Vector3::ZERO, Vector3::new(2.0, 4.0, 6.0), 0.5);
        assert_eq!(mid, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn heading_and_rotation() {
        assert!(approx_eq(Vector3::new2(0.0, 1.0).heading(), HALF_PI, EPS));
        let mut v = Vector3::new2(1.0, 0.0);
        v.rotate(HALF_PI);
        assert_vec_eq(v, Vector3::new2(0.0, 1.0), "rotate quarter turn");
        v.rotate(PI);
        assert_vec_eq(v, Vector3::new2(0.0, -1.0), "rotate half turn");

        assert_vec_eq(Vector3::from_angle(PI), Vector3::new2(-1.0, 0.0), "from_angle");
        let s = Vector3::from_spherical(0.3, 0.5);
        assert!(approx_eq(s.mag(), 1.0, EPS), "spherical vectors are unit length");
    }

    #[test]
    fn angle_between_edge_cases() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Vector3::angle_between(v, v), 0.0);
        assert!(approx_eq(Vector3::angle_between(v, -v), PI, EPS));
        assert_eq!(Vector3::angle_between(Vector3::ZERO, v), 0.0);
        assert_eq!(Vector3::angle_between(v, Vector3::ZERO), 0.0);
        let right = Vector3::angle_between(Vector3::new2(1.0, 0.0), Vector3::new2(0.0, 5.0));
        assert!(approx_eq(right, HALF_PI, EPS));
    }

    #[test]
    fn slices_and_display() {
        assert_eq!(Vector3::from_slice(&[1.0, 2.0]), Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(Vector3::from_slice(&[1.0, 2.0, 3.0, 4.0]), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3::from_slice(&[1.0]), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(Vector3::from_slice(&[]), Vector3::ZERO);
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(Vector3::new(1.0, -2.5, 0.0).to_string(), "[ 1, -2.5, 0 ]");

        let mut v = Vector3::new(1.0, 1.0, 1.0);
        v.set2(4.0, 5.0);
        assert_eq!(v, Vector3::new(4.0, 5.0, 0.0));
    }

    #[test]
    fn angle_between_extreme_magnitudes() {
        for v in [
            Vector3::new(1e20, 0.0, 0.0),
            Vector3::new(1e-23, 0.0, 0.0),
            Vector3::new(-1e-45, 0.0, 0.0),
        ] {
            assert_eq!(Vector3::angle_between(v, v), 0.0, "angle({}, itself)", v);
            assert!(
                approx_eq(Vector3::angle_between(v, -v), PI, EPS),
                "angle({}, its negation)",
                v
            );
        }
        let huge = Vector3::new(3e38, -3e38, 1e38);
        assert!(approx_eq(Vector3::angle_between(huge, huge), 0.0, EPS));
        assert!(approx_eq(Vector3::angle_between(huge, -huge), PI, EPS));
        let right = Vector3::angle_between(Vector3::new(1e20, 0.0, 0.0), Vector3::new(0.0, 1e-23, 0.0));
        assert!(approx_eq(right, HALF_PI, EPS));
    }

    #[test]
    fn normalize_extreme_magnitudes() {
        let mut big = Vector3::new(1e20, 1e20, 0.0);
        big.normalize();
        assert!(approx_eq(big.mag(), 1.0, EPS), "large vector normalized to {}", big);
        assert!(approx_eq(big.x, std::f32::consts::FRAC_1_SQRT_2, EPS));

        let mut tiny = Vector3::new(3e-23, 4e-23, 0.0);
        tiny.normalize();
        assert_vec_eq(tiny, Vector3::new(0.6, 0.8, 0.0), "tiny normalize");

        let mut target = Vector3::ZERO;
        Vector3::new(0.0, 0.0, -2e30).normalize_into(&mut target);
        assert_eq!(target, Vector3::new(0.0, 0.0, -1.0));

        let mut capped = Vector3::new(3e30, 4e30, 0.0);
        capped.limit(10.0);
        assert_vec_eq(capped, Vector3::new(6.0, 8.0, 0.0), "limit of a huge vector");

        let mut resized = Vector3::new(0.0, 5e-30, 0.0);
        resized.set_mag(2.0);
        assert_vec_eq(resized, Vector3::new(0.0, 2.0, 0.0), "set_mag of a tiny vector");
        assert!(approx_eq(Vector3::new(1e20, 0.0, 0.0).dist(Vector3::new(-1e20, 0.0, 0.0)) / 2e20, 1.0, EPS));
    }
}
