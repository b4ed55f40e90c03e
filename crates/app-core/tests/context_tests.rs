use app_core::constants::{CAMERA_START_RADIUS, ORBIT_MEMBER_COUNT, SWARM_MEMBER_COUNT};
use app_core::fade::FadeDirection;
use app_core::scene::{Model, ModelId};
use app_core::zoom::SceneMode;
use app_core::SceneContext;
use glam::Vec3;

#[test]
fn construction_is_deterministic_per_seed() {
    let a = SceneContext::new(42, 1.0).unwrap();
    let b = SceneContext::new(42, 1.0).unwrap();
    assert_eq!(a.swarms[0].members.len(), SWARM_MEMBER_COUNT);
    assert_eq!(a.orbiters.len(), ORBIT_MEMBER_COUNT);
    for (ma, mb) in a.swarms[0].members.iter().zip(&b.swarms[0].members) {
        assert_eq!(ma.position, mb.position);
    }
    assert_eq!(a.camera.eye, Vec3::new(0.0, 0.0, CAMERA_START_RADIUS));
}

#[test]
fn tick_moves_particles_and_rebuilds_edges() {
    let mut ctx = SceneContext::new(7, 1.0).unwrap();
    let before: Vec<Vec3> = ctx.swarms[0].members.iter().map(|m| m.position).collect();
    ctx.tick();
    let moved = ctx.swarms[0]
        .members
        .iter()
        .zip(&before)
        .any(|(m, b)| m.position != *b);
    assert!(moved, "swarm members drift every tick");
    assert!(ctx.graphs[0].edge_count() >= 1, "a populated swarm always yields edges");
    assert!(ctx.graphs[0].edge_count() <= SWARM_MEMBER_COUNT);
}

#[test]
fn zooming_in_walks_the_mode_ladder() {
    let mut ctx = SceneContext::new(3, 1.0).unwrap();
    assert_eq!(ctx.zoom.mode(), SceneMode::Far);

    ctx.zoom_camera(0.5); // 75
    assert_eq!(ctx.zoom.mode(), SceneMode::Approach);
    ctx.zoom_camera(0.1); // 7.5
    assert_eq!(ctx.zoom.mode(), SceneMode::Focus);
    ctx.zoom_camera(0.2); // 1.5
    assert_eq!(ctx.zoom.mode(), SceneMode::Detail);
    assert!(ctx.zoom.showing_detail());
}

#[test]
fn late_model_install_is_picked_up_by_fades() {
    let mut ctx = SceneContext::new(3, 1.0).unwrap();
    ctx.zoom_camera(0.05); // distance 7.5, Focus: wants the brain faded in
    assert!(!ctx.fades.is_fading(ModelId::Brain));

    let mut brain = Model::with_surfaces(2);
    for surface in &mut brain.surfaces {
        surface.opacity = Some(0.0);
    }
    ctx.install_model(ModelId::Brain, brain);
    assert_eq!(ctx.fades.direction_of(ModelId::Brain), Some(FadeDirection::In));

    for _ in 0..10 {
        ctx.tick();
    }
    let opacity = ctx.models.get(ModelId::Brain).unwrap().surfaces[0].opacity.unwrap();
    assert!(opacity > 0.0, "installed model starts fading on the next ticks");
}

#[test]
fn remove_model_forgets_its_fade() {
    let mut ctx = SceneContext::new(3, 1.0).unwrap();
    ctx.install_model(ModelId::Human, Model::with_surfaces(1));
    ctx.zoom_camera(0.05); // Focus fades the human out
    assert!(ctx.fades.is_fading(ModelId::Human));
    ctx.remove_model(ModelId::Human);
    assert!(!ctx.fades.is_fading(ModelId::Human));
    assert!(!ctx.models.contains(ModelId::Human));
}

#[test]
fn resize_guards_against_zero_dimensions() {
    let mut ctx = SceneContext::new(3, 1.0).unwrap();
    ctx.on_resize(1920, 1080);
    let aspect = ctx.camera.aspect;
    assert!((aspect - 1920.0 / 1080.0).abs() < 1e-6);
    ctx.on_resize(0, 1080);
    ctx.on_resize(1920, 0);
    assert_eq!(ctx.camera.aspect, aspect, "degenerate viewports are ignored");
}

#[test]
fn teardown_silences_everything() {
    let mut ctx = SceneContext::new(9, 1.0).unwrap();
    ctx.install_model(ModelId::Human, Model::with_surfaces(1));
    ctx.zoom_camera(0.05);
    ctx.tick();
    assert!(ctx.is_alive());

    ctx.teardown();
    assert!(!ctx.is_alive());
    assert_eq!(ctx.fades.active_count(), 0);
    assert_eq!(ctx.graphs[0].edge_count(), 0);

    let frozen: Vec<Vec3> = ctx.swarms[0].members.iter().map(|m| m.position).collect();
    let eye = ctx.camera.eye;
    ctx.tick();
    ctx.zoom_camera(0.5);
    ctx.on_pointer_click(0.0, 0.0);
    ctx.on_escape();
    for (m, f) in ctx.swarms[0].members.iter().zip(&frozen) {
        assert_eq!(m.position, *f, "a torn-down scene must not animate");
    }
    assert_eq!(ctx.camera.eye, eye);
}

#[test]
fn click_on_orbiter_suspends_zoom_via_context() {
    let mut ctx = SceneContext::new(5, 1.0).unwrap();
    // Aim straight at a known orbiter from well outside its orbit.
    let target = ctx.orbiters[0].position;
    ctx.camera.eye = target + Vec3::new(0.0, 0.0, 60.0);
    ctx.camera.target = target;
    ctx.navigator = app_core::CameraNavigator::new(target);

    ctx.on_pointer_click(0.0, 0.0);
    assert!(ctx.zoom.is_suspended());
    assert!(ctx.navigator.is_focused());
}
