//! Text labels anchored below swarm members.

use glam::Vec3;

use crate::swarm::SwarmGroup;

/// Vertical gap between a member's surface and its label anchor.
const LABEL_GAP: f32 = 0.02;

#[derive(Clone, Debug, PartialEq)]
pub struct MemberLabel {
    pub text: String,
    pub anchor: Vec3,
}

/// One label per member, indexed in member order and hung just below each
/// sphere so it never occludes the member it names.
pub fn member_labels(group: &SwarmGroup) -> Vec<MemberLabel> {
    group
        .members
        .iter()
        .enumerate()
        .map(|(i, member)| MemberLabel {
            text: format!("S{i}"),
            anchor: member.position - Vec3::Y * (member.radius + LABEL_GAP),
        })
        .collect()
}
