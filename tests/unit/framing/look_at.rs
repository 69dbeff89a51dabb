use super::*;

const EPS: f64 = 1e-9;

fn v(x: f64, y: f64, z: f64) -> DVec3 {
    DVec3::new(x, y, z)
}

fn assert_orthonormal(o: &Orientation) {
    let m = o.matrix();
    assert!((m.determinant() - 1.0).abs() < EPS);
    assert!(
        (m.transpose() * m).abs_diff_eq(DMat3::IDENTITY, EPS),
        "not orthonormal: {m:?}"
    );
}

#[test]
fn coincident_points_are_degenerate() {
    for p in [v(0.0, 0.0, 0.0), v(1.5, -2.0, 0.25), v(-1e6, 3.0, 7.0)] {
        for roll in [0.0, 1.0, -2.5] {
            assert!(matches!(
                look_at(p, p, roll),
                Err(DrumviewError::DegenerateDirection(_))
            ));
        }
    }
}

#[test]
fn forward_points_at_target() {
    let cam = v(0.25, -3.0, 0.25);
    let target = v(0.0, 0.0, 0.0);
    let o = look_at(cam, target, 0.0).unwrap();
    assert_orthonormal(&o);
    let dir = (target - cam).normalize();
    assert!(o.forward().abs_diff_eq(dir, EPS));
}

#[test]
fn horizontal_look_keeps_up_on_world_up() {
    let o = look_at(v(0.0, -3.0, 0.0), v(0.0, 0.0, 0.0), 0.0).unwrap();
    assert!(o.up().abs_diff_eq(WORLD_UP, EPS));
    assert!(o.right().abs_diff_eq(DVec3::X, EPS));
}

#[test]
fn up_is_maximally_aligned_with_world_up() {
    let cam = v(-0.1, -0.1, 0.5);
    let target = v(0.5, 0.1, -0.25);
    let o = look_at(cam, target, 0.0).unwrap();
    assert_orthonormal(&o);
    // Right stays horizontal, so up is the projection of world up onto the view plane.
    assert!(o.right().dot(WORLD_UP).abs() < EPS);
    assert!(o.up().dot(WORLD_UP) > 0.0);
}

#[test]
fn looking_straight_down_uses_fallback_up() {
    let o = look_at(v(0.0, 0.0, 5.0), v(0.0, 0.0, 0.0), 0.0).unwrap();
    assert_orthonormal(&o);
    assert!(o.forward().abs_diff_eq(-DVec3::Z, EPS));
    assert!(o.up().abs_diff_eq(FALLBACK_UP, EPS));

    let o = look_at(v(0.0, 0.0, -5.0), v(0.0, 0.0, 0.0), 0.0).unwrap();
    assert_orthonormal(&o);
    assert!(o.forward().abs_diff_eq(DVec3::Z, EPS));
}

#[test]
fn roll_composes_after_aiming() {
    let cam = v(0.3, -2.0, 1.1);
    let target = v(-0.2, 0.4, 0.0);
    let base = look_at(cam, target, 0.0).unwrap();
    for theta in [-3.0, -1.0, -0.1, 0.0, 0.5, 1.5707963267948966, 2.9, 6.0] {
        let rolled = look_at(cam, target, theta).unwrap();
        let composed = base.matrix() * DMat3::from_rotation_z(theta);
        assert!(rolled.matrix().abs_diff_eq(composed, EPS), "theta = {theta}");
        assert!(rolled.forward().abs_diff_eq(base.forward(), EPS));
        assert_orthonormal(&rolled);
    }
}

#[test]
fn world_matrix_carries_location_untouched() {
    let loc = v(1.0, 2.0, 3.0);
    let o = look_at(loc, v(0.0, 0.0, 0.0), 0.3).unwrap();
    let m = o.to_world_matrix(loc);
    assert_eq!(m.w_axis.truncate(), loc);
    assert!(m.transform_point3(DVec3::ZERO).abs_diff_eq(loc, EPS));
    assert!(
        m.transform_vector3(-DVec3::Z)
            .abs_diff_eq(o.forward(), EPS)
    );
}

#[test]
fn target_projects_onto_optical_axis() {
    let cam = v(0.25, -3.0, 0.25);
    let target = v(0.0, 0.1, 0.0);
    let o = look_at(cam, target, 0.7).unwrap();
    let c = o.world_to_camera(cam, target);
    assert!(c.x.abs() < EPS && c.y.abs() < EPS);
    assert!(c.z < 0.0);
}

#[test]
fn quaternion_matches_matrix() {
    let o = look_at(v(1.0, -1.0, 2.0), v(0.0, 0.5, 0.0), 0.2).unwrap();
    let q = o.to_quat();
    assert!((q * -DVec3::Z).abs_diff_eq(o.forward(), 1e-8));
}
