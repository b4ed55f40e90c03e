//! Click-to-focus and escape-to-reset camera navigation.
//!
//! The navigator owns the goal target the camera's look-at is damped toward,
//! the currently selected entity, and the fixed-iteration fly-in/restore
//! sequences. While a focus is active the zoom state machine is suspended so
//! the narrative banding does not fight the fly-in.

use glam::Vec3;
use smallvec::SmallVec;

use crate::camera::{ray_sphere, Camera};
use crate::constants::{
    FOCUS_OFFSET_RADII, FOCUS_SEQUENCE_TICKS, FOLLOW_DAMPING, ORBIT_MEMBER_RADIUS, TARGET_DAMPING,
};
use crate::orbit::OrbitMember;
use crate::swarm::SwarmGroup;
use crate::zoom::ZoomStateMachine;

/// Lookup reference to a pickable particle. Indices into the scene-owned
/// collections; the navigator never owns the particle itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PickedEntity {
    Swarm { group: usize, index: usize },
    Orbiter { index: usize },
}

/// Camera pose captured when a focus begins, restored on escape.
#[derive(Clone, Copy, Debug)]
pub struct CapturedPose {
    pub eye: Vec3,
    pub target: Vec3,
}

enum Sequence {
    /// Fly the eye toward the picked entity over a fixed number of ticks.
    Focus {
        remaining: u32,
        total: u32,
        from_eye: Vec3,
        to_eye: Vec3,
    },
    /// Fly eye and target back to the captured pose, then resume the zoom
    /// state machine.
    Restore {
        remaining: u32,
        total: u32,
        from_eye: Vec3,
        from_target: Vec3,
        pose: CapturedPose,
    },
}

pub struct CameraNavigator {
    goal_target: Vec3,
    selected: Option<PickedEntity>,
    follow: bool,
    captured: Option<CapturedPose>,
    sequence: Option<Sequence>,
}

impl CameraNavigator {
    pub fn new(initial_target: Vec3) -> Self {
        Self {
            goal_target: initial_target,
            selected: None,
            follow: false,
            captured: None,
            sequence: None,
        }
    }

    #[inline]
    pub fn goal_target(&self) -> Vec3 {
        self.goal_target
    }

    #[inline]
    pub fn selected(&self) -> Option<PickedEntity> {
        self.selected
    }

    #[inline]
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// True from the moment a pick lands until the restore completes.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.selected.is_some() || self.sequence.is_some()
    }

    /// Handle a pointer click as a pick ray against the current pickable set:
    /// swarm members in detail mode, orbiters otherwise. A miss is a no-op,
    /// as is any click while a focus is already in flight or being followed.
    ///
    /// On a hit the current pose is captured for the later restore, the zoom
    /// machine suspended, and a fixed-iteration fly-in started toward a point
    /// offset from the entity along the reversed view direction by three
    /// times its radius.
    pub fn handle_click(
        &mut self,
        ray_origin: Vec3,
        ray_dir: Vec3,
        detail_mode: bool,
        swarms: &[SwarmGroup],
        orbiters: &[OrbitMember],
        camera: &Camera,
        zoom: &mut ZoomStateMachine,
    ) -> Option<PickedEntity> {
        if self.is_focused() {
            return None;
        }

        let mut hits: SmallVec<[(PickedEntity, f32, Vec3, f32); 4]> = SmallVec::new();
        if detail_mode {
            for (g, group) in swarms.iter().enumerate() {
                for (i, member) in group.members.iter().enumerate() {
                    if let Some(t) = ray_sphere(ray_origin, ray_dir, member.position, member.radius)
                    {
                        hits.push((
                            PickedEntity::Swarm { group: g, index: i },
                            t,
                            member.position,
                            member.radius,
                        ));
                    }
                }
            }
        } else {
            for (i, member) in orbiters.iter().enumerate() {
                if let Some(t) =
                    ray_sphere(ray_origin, ray_dir, member.position, ORBIT_MEMBER_RADIUS)
                {
                    hits.push((
                        PickedEntity::Orbiter { index: i },
                        t,
                        member.position,
                        ORBIT_MEMBER_RADIUS,
                    ));
                }
            }
        }

        let (entity, _, position, radius) = hits
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        self.captured = Some(CapturedPose {
            eye: camera.eye,
            target: self.goal_target,
        });
        zoom.suspend();
        let back = (camera.eye - position).normalize_or_zero();
        let to_eye = position + back * (radius * FOCUS_OFFSET_RADII);
        self.sequence = Some(Sequence::Focus {
            remaining: FOCUS_SEQUENCE_TICKS,
            total: FOCUS_SEQUENCE_TICKS,
            from_eye: camera.eye,
            to_eye,
        });
        self.selected = Some(entity);
        log::info!("focus on {:?}", entity);
        Some(entity)
    }

    /// Handle an escape key press. Only available once a focus is active and
    /// no sequence is still in flight; sequences always run to completion and
    /// cannot be re-triggered mid-flight. Returns whether a restore started.
    pub fn handle_escape(&mut self, camera: &Camera) -> bool {
        if self.sequence.is_some() || self.selected.is_none() {
            return false;
        }
        let Some(pose) = self.captured else {
            return false;
        };
        self.follow = false;
        self.sequence = Some(Sequence::Restore {
            remaining: FOCUS_SEQUENCE_TICKS,
            total: FOCUS_SEQUENCE_TICKS,
            from_eye: camera.eye,
            from_target: camera.target,
            pose,
        });
        log::info!("restoring camera pose");
        true
    }

    /// Advance one tick: run any in-flight sequence, then the two damped
    /// approaches (goal toward followed entity, look-at toward goal).
    pub fn tick(
        &mut self,
        camera: &mut Camera,
        swarms: &[SwarmGroup],
        orbiters: &[OrbitMember],
        zoom: &mut ZoomStateMachine,
    ) {
        let mut restoring = false;
        if let Some(sequence) = &mut self.sequence {
            match sequence {
                Sequence::Focus {
                    remaining,
                    total,
                    from_eye,
                    to_eye,
                } => {
                    *remaining -= 1;
                    let alpha = 1.0 - *remaining as f32 / *total as f32;
                    camera.eye = from_eye.lerp(*to_eye, alpha);
                    if *remaining == 0 {
                        self.sequence = None;
                        if let Some(position) =
                            self.selected.and_then(|e| entity_position(e, swarms, orbiters))
                        {
                            self.goal_target = position;
                        }
                        self.follow = true;
                    }
                }
                Sequence::Restore {
                    remaining,
                    total,
                    from_eye,
                    from_target,
                    pose,
                } => {
                    restoring = true;
                    *remaining -= 1;
                    let alpha = 1.0 - *remaining as f32 / *total as f32;
                    camera.eye = from_eye.lerp(pose.eye, alpha);
                    camera.target = from_target.lerp(pose.target, alpha);
                    self.goal_target = camera.target;
                    if *remaining == 0 {
                        self.sequence = None;
                        self.selected = None;
                        self.captured = None;
                        zoom.resume();
                    }
                }
            }
        }

        if self.follow {
            match self.selected.and_then(|e| entity_position(e, swarms, orbiters)) {
                Some(position) => {
                    self.goal_target = self.goal_target.lerp(position, FOLLOW_DAMPING);
                }
                None => {
                    // Followed entity went away with the scene contents.
                    self.follow = false;
                    self.selected = None;
                }
            }
        }

        if !restoring {
            camera.target = camera.target.lerp(self.goal_target, TARGET_DAMPING);
        }
    }

    /// Drop any in-flight sequence and selection; used by scene teardown.
    pub fn clear(&mut self) {
        self.sequence = None;
        self.selected = None;
        self.follow = false;
        self.captured = None;
    }
}

fn entity_position(
    entity: PickedEntity,
    swarms: &[SwarmGroup],
    orbiters: &[OrbitMember],
) -> Option<Vec3> {
    match entity {
        PickedEntity::Swarm { group, index } => swarms
            .get(group)
            .and_then(|g| g.members.get(index))
            .map(|m| m.position),
        PickedEntity::Orbiter { index } => orbiters.get(index).map(|m| m.position),
    }
}
