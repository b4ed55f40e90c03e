use app_core::camera::{orbit_eye, ray_sphere, zoom_eye, Camera};
use glam::Vec3;

#[test]
fn ray_sphere_hit_and_miss() {
    let origin = Vec3::ZERO;
    let dir = Vec3::Z;
    let t = ray_sphere(origin, dir, Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5, "first intersection at the near surface");

    assert!(ray_sphere(origin, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_sphere_behind_origin_is_rejected() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0);
    assert!(t.is_none(), "spheres behind the ray must not be picked");
}

#[test]
fn screen_center_ray_points_at_target() {
    let camera = Camera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, 16.0 / 9.0);
    let (origin, dir) = camera.screen_to_world_ray(0.0, 0.0);
    assert_eq!(origin, camera.eye);
    let expected = (camera.target - camera.eye).normalize();
    assert!(dir.distance(expected) < 1e-4);
}

#[test]
fn orbit_preserves_radius_and_clamps_pitch() {
    let target = Vec3::new(1.0, 2.0, 3.0);
    let eye = target + Vec3::new(0.0, 0.0, 20.0);
    let radius = 20.0;

    let rotated = orbit_eye(eye, target, 0.3, 0.2);
    assert!(((rotated - target).length() - radius).abs() < 1e-4);

    // Cranking pitch far past vertical stops just short of the pole.
    let mut e = eye;
    for _ in 0..100 {
        e = orbit_eye(e, target, 0.0, 0.5);
    }
    let offset = e - target;
    assert!(offset.y < radius, "pitch must clamp before the pole");
    assert!(offset.x.abs() + offset.z.abs() > 1e-3, "eye never sits exactly above the target");
}

#[test]
fn zoom_scales_and_clamps_distance() {
    let target = Vec3::ZERO;
    let eye = Vec3::new(0.0, 0.0, 100.0);
    let closer = zoom_eye(eye, target, 0.5, 0.5, 800.0);
    assert!((closer.length() - 50.0).abs() < 1e-4);

    let clamped_near = zoom_eye(eye, target, 1e-6, 0.5, 800.0);
    assert!((clamped_near.length() - 0.5).abs() < 1e-4);

    let clamped_far = zoom_eye(eye, target, 1e6, 0.5, 800.0);
    assert!((clamped_far.length() - 800.0).abs() < 1e-2);
}

#[test]
fn azimuth_sign_distinguishes_hemispheres() {
    let target = Vec3::ZERO;
    let left = Camera::new(Vec3::new(-5.0, 0.0, 5.0), target, 1.0);
    let right = Camera::new(Vec3::new(5.0, 0.0, 5.0), target, 1.0);
    assert!(left.azimuthal_angle() < 0.0);
    assert!(right.azimuthal_angle() > 0.0);
}
