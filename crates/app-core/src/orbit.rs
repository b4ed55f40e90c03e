//! Large cells on fixed circular paths around the scene origin.

use glam::Vec3;
use rand::Rng;

use crate::constants::ORBIT_PLACEMENT_ATTEMPTS;
use crate::error::SceneError;

#[derive(Clone, Copy, Debug)]
pub struct OrbitMember {
    pub radius: f32,
    pub phase: f32,
    pub angular_velocity: f32,
    pub position: Vec3,
    height: f32,
}

impl OrbitMember {
    fn at(radius: f32, phase: f32, angular_velocity: f32, height: f32) -> Self {
        let mut member = Self {
            radius,
            phase,
            angular_velocity,
            position: Vec3::ZERO,
            height,
        };
        member.update_position();
        member
    }

    #[inline]
    fn update_position(&mut self) {
        self.position = Vec3::new(
            self.radius * self.phase.cos(),
            self.height,
            self.radius * self.phase.sin(),
        );
    }

    /// Advance one tick of pure circular motion at fixed height.
    pub fn step(&mut self) {
        self.phase += self.angular_velocity;
        self.update_position();
    }
}

/// Rejection-sample `count` orbit members so that every planar position is at
/// least `min_separation` from the ones placed before it. Each member gets a
/// signed angular velocity with direction chosen uniformly. No collision
/// handling after placement.
pub fn place_orbit_members(
    count: usize,
    min_radius: f32,
    max_radius: f32,
    min_separation: f32,
    height: f32,
    rng: &mut impl Rng,
) -> Result<Vec<OrbitMember>, SceneError> {
    let mut members: Vec<OrbitMember> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut placed = false;
        for _ in 0..ORBIT_PLACEMENT_ATTEMPTS {
            let radius = rng.gen_range(min_radius..=max_radius);
            let phase = rng.gen::<f32>() * std::f32::consts::TAU;
            let candidate = Vec3::new(radius * phase.cos(), height, radius * phase.sin());
            if members
                .iter()
                .all(|m| m.position.distance(candidate) >= min_separation)
            {
                let speed = rng.gen_range(
                    crate::constants::ORBIT_ANGULAR_SPEED_MIN
                        ..=crate::constants::ORBIT_ANGULAR_SPEED_MAX,
                );
                let angular_velocity = if rng.gen::<bool>() { speed } else { -speed };
                members.push(OrbitMember::at(radius, phase, angular_velocity, height));
                placed = true;
                break;
            }
        }
        if !placed {
            return Err(SceneError::OrbitPlacement {
                placed: members.len(),
                min_separation,
            });
        }
    }
    Ok(members)
}
