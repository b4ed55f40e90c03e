use app_core::constants::{SWARM_CAGE_RADIUS, SWARM_MEMBER_COUNT};
use app_core::labels::member_labels;
use app_core::swarm::SwarmGroup;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn initial_sampling_stays_inside_cage() {
    let mut rng = StdRng::seed_from_u64(7);
    let center = Vec3::new(1.0, -2.0, 3.0);
    let group = SwarmGroup::new(center, 200, SWARM_CAGE_RADIUS, &mut rng);
    for member in &group.members {
        let dist = member.position.distance(center);
        assert!(
            dist <= SWARM_CAGE_RADIUS + 1e-5,
            "member sampled outside the cage: {dist}"
        );
    }
}

#[test]
fn members_never_escape_cage_over_many_ticks() {
    let mut rng = StdRng::seed_from_u64(11);
    let center = Vec3::ZERO;
    let mut group = SwarmGroup::new(center, SWARM_MEMBER_COUNT, SWARM_CAGE_RADIUS, &mut rng);
    for _ in 0..20_000 {
        group.step();
        for member in &group.members {
            assert!(member.position.distance(center) <= SWARM_CAGE_RADIUS + 1e-4);
        }
    }
}

#[test]
fn boundary_reflection_preserves_speed() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut group = SwarmGroup::new(Vec3::ZERO, 1, 1.0, &mut rng);
    // Park a member just inside the wall, moving straight at it.
    group.members[0].position = Vec3::new(0.999, 0.0, 0.0);
    group.members[0].velocity = Vec3::new(0.01, 0.002, 0.0);
    let speed_before = group.members[0].velocity.length();

    group.step();
    let member = group.members[0];
    assert!((member.velocity.length() - speed_before).abs() < 1e-6);
    assert!(member.velocity.x < 0.0, "outward component must flip sign");
    assert!((member.position.length() - 1.0).abs() < 1e-5, "clamped onto the cage wall");
}

#[test]
fn labels_hang_below_their_members() {
    let mut rng = StdRng::seed_from_u64(2);
    let group = SwarmGroup::new(Vec3::ZERO, 3, 1.0, &mut rng);
    let labels = member_labels(&group);
    assert_eq!(labels.len(), 3);
    for (i, (label, member)) in labels.iter().zip(&group.members).enumerate() {
        assert_eq!(label.text, format!("S{i}"));
        assert!(label.anchor.y < member.position.y - member.radius);
        assert_eq!(label.anchor.x, member.position.x);
    }
}

#[test]
fn labels_track_moving_members_when_regenerated() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut group = SwarmGroup::new(Vec3::ZERO, 5, 1.0, &mut rng);
    let before = member_labels(&group);
    for _ in 0..50 {
        group.step();
    }
    // A fresh call reflects the current positions, not the ones at creation.
    let after = member_labels(&group);
    assert_eq!(after.len(), group.members.len());
    let mut moved = 0;
    for ((old, new), member) in before.iter().zip(&after).zip(&group.members) {
        assert_eq!(old.text, new.text, "label text is stable across ticks");
        assert!(new.anchor.y < member.position.y - member.radius);
        if old.anchor.distance(new.anchor) > 1e-6 {
            moved += 1;
        }
    }
    assert!(moved > 0, "anchors must follow the members they name");
}

#[test]
fn positions_into_reuses_and_matches_member_order() {
    let mut rng = StdRng::seed_from_u64(5);
    let group = SwarmGroup::new(Vec3::ZERO, 4, 1.0, &mut rng);
    let mut out = vec![Vec3::splat(9.0); 32];
    group.positions_into(&mut out);
    assert_eq!(out.len(), 4);
    for (slot, member) in out.iter().zip(&group.members) {
        assert_eq!(*slot, member.position);
    }
}
