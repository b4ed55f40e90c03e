use app_core::camera::Camera;
use app_core::constants::FOCUS_SEQUENCE_TICKS;
use app_core::navigate::{CameraNavigator, PickedEntity};
use app_core::swarm::SwarmGroup;
use app_core::zoom::ZoomStateMachine;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One stationary swarm member dead ahead of the camera, big enough to hit.
fn fixture() -> (Camera, Vec<SwarmGroup>, CameraNavigator, ZoomStateMachine) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut group = SwarmGroup::new(Vec3::ZERO, 1, 1.0, &mut rng);
    group.members[0].position = Vec3::ZERO;
    group.members[0].velocity = Vec3::ZERO;
    group.members[0].radius = 5.0;

    let camera = Camera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, 1.0);
    let navigator = CameraNavigator::new(Vec3::ZERO);
    (camera, vec![group], navigator, ZoomStateMachine::new())
}

fn click_ahead(
    navigator: &mut CameraNavigator,
    camera: &Camera,
    swarms: &[SwarmGroup],
    zoom: &mut ZoomStateMachine,
) -> Option<PickedEntity> {
    navigator.handle_click(
        camera.eye,
        Vec3::NEG_Z,
        true,
        swarms,
        &[],
        camera,
        zoom,
    )
}

#[test]
fn click_hit_captures_pose_and_suspends_zoom() {
    let (camera, swarms, mut navigator, mut zoom) = fixture();
    let picked = click_ahead(&mut navigator, &camera, &swarms, &mut zoom);
    assert_eq!(picked, Some(PickedEntity::Swarm { group: 0, index: 0 }));
    assert!(zoom.is_suspended());
    assert!(navigator.is_focused());
}

#[test]
fn click_miss_changes_nothing() {
    let (camera, swarms, mut navigator, mut zoom) = fixture();
    let picked = navigator.handle_click(
        camera.eye,
        Vec3::X,
        true,
        &swarms,
        &[],
        &camera,
        &mut zoom,
    );
    assert_eq!(picked, None);
    assert!(!zoom.is_suspended());
    assert!(!navigator.is_focused());
}

#[test]
fn focus_flyin_parks_eye_at_offset_then_follows() {
    let (mut camera, swarms, mut navigator, mut zoom) = fixture();
    click_ahead(&mut navigator, &camera, &swarms, &mut zoom);

    for _ in 0..FOCUS_SEQUENCE_TICKS {
        navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    }
    // Entity at the origin, radius 5, offset of 3 radii back toward the old
    // eye along +Z.
    assert!(camera.eye.distance(Vec3::new(0.0, 0.0, 15.0)) < 1e-3);
    assert!(navigator.is_following());

    for _ in 0..200 {
        navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    }
    assert!(camera.target.distance(Vec3::ZERO) < 1e-2, "look-at eases onto the entity");
}

#[test]
fn clicks_during_focus_are_ignored() {
    let (mut camera, swarms, mut navigator, mut zoom) = fixture();
    click_ahead(&mut navigator, &camera, &swarms, &mut zoom);

    // Mid-sequence.
    navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    assert_eq!(click_ahead(&mut navigator, &camera, &swarms, &mut zoom), None);

    // After the fly-in, while following.
    for _ in 0..FOCUS_SEQUENCE_TICKS {
        navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    }
    assert_eq!(click_ahead(&mut navigator, &camera, &swarms, &mut zoom), None);
}

#[test]
fn escape_restores_pose_and_resumes_zoom_exactly_once() {
    let (mut camera, swarms, mut navigator, mut zoom) = fixture();
    let start_eye = camera.eye;
    let start_target = camera.target;

    click_ahead(&mut navigator, &camera, &swarms, &mut zoom);
    for _ in 0..FOCUS_SEQUENCE_TICKS + 20 {
        navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    }

    assert!(navigator.handle_escape(&camera));
    // A second escape while the restore is in flight does nothing.
    assert!(!navigator.handle_escape(&camera));

    for _ in 0..FOCUS_SEQUENCE_TICKS {
        navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    }
    assert!(camera.eye.distance(start_eye) < 1e-3);
    assert!(camera.target.distance(start_target) < 1e-3);
    assert!(!zoom.is_suspended(), "zoom resumes when the restore completes");
    assert!(!navigator.is_focused());

    // With nothing selected, escape is inert.
    assert!(!navigator.handle_escape(&camera));
}

#[test]
fn escape_before_flyin_completes_is_ignored() {
    let (mut camera, swarms, mut navigator, mut zoom) = fixture();
    click_ahead(&mut navigator, &camera, &swarms, &mut zoom);
    navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    assert!(!navigator.handle_escape(&camera), "sequences run to completion");
}

#[test]
fn pose_survives_further_ticks_after_restore() {
    let (mut camera, swarms, mut navigator, mut zoom) = fixture();
    click_ahead(&mut navigator, &camera, &swarms, &mut zoom);
    for _ in 0..FOCUS_SEQUENCE_TICKS + 5 {
        navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    }
    navigator.handle_escape(&camera);
    for _ in 0..FOCUS_SEQUENCE_TICKS + 50 {
        navigator.tick(&mut camera, &swarms, &[], &mut zoom);
    }
    assert!(camera.eye.distance(Vec3::new(0.0, 0.0, 50.0)) < 1e-3);
    assert!(camera.target.distance(Vec3::ZERO) < 1e-3);
}
