//! The neuron swarm: small particles caged inside a sphere.
//!
//! Motion is a stylized bounded random walk, not a physics simulation: each
//! member drifts along a fixed velocity and reflects off the cage wall,
//! preserving speed.

use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct SwarmMember {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
}

/// A group of swarm members sharing one spherical cage.
pub struct SwarmGroup {
    center: Vec3,
    max_distance: f32,
    pub members: Vec<SwarmMember>,
}

impl SwarmGroup {
    /// Sample `count` members uniformly inside the ball of `max_distance`
    /// around `center`: azimuth uniform in [0, 2π), polar angle from
    /// `acos(2u - 1)`, radius scaled by the cube root of a uniform sample.
    pub fn new(center: Vec3, count: usize, max_distance: f32, rng: &mut impl Rng) -> Self {
        let mut members = Vec::with_capacity(count);
        for _ in 0..count {
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            let r = rng.gen::<f32>().cbrt() * max_distance;
            let position = center
                + Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.sin() * theta.sin(),
                    r * phi.cos(),
                );
            let radius = crate::constants::SWARM_MEMBER_RADIUS_MIN
                + rng.gen::<f32>() * crate::constants::SWARM_MEMBER_RADIUS_SPAN;
            let span = crate::constants::SWARM_VELOCITY_SPAN;
            let velocity = Vec3::new(
                (rng.gen::<f32>() - 0.5) * span,
                (rng.gen::<f32>() - 0.5) * span,
                (rng.gen::<f32>() - 0.5) * span,
            );
            members.push(SwarmMember {
                position,
                velocity,
                radius,
            });
        }
        Self {
            center,
            max_distance,
            members,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Advance every member by one tick. A member crossing the cage boundary
    /// is clamped back onto the sphere along the outward normal and its
    /// velocity reflected about that normal: `v' = v - 2(v·n)n`.
    pub fn step(&mut self) {
        for member in &mut self.members {
            member.position += member.velocity;
            let offset = member.position - self.center;
            let dist = offset.length();
            if dist > self.max_distance {
                let normal = offset / dist;
                member.position = self.center + normal * self.max_distance;
                member.velocity -= 2.0 * member.velocity.dot(normal) * normal;
            }
        }
    }

    /// Copy current positions into `out` (cleared first). The connectivity
    /// graph reads these after motion so edges always match the rendered
    /// positions.
    pub fn positions_into(&self, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(self.members.iter().map(|m| m.position));
    }
}
