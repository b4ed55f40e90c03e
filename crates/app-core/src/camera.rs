//! Camera description and the small amount of ray math the scene needs.
//!
//! The camera is a plain right-handed perspective description; the orbit-style
//! motion (rotate around the target, zoom along the view axis) is expressed as
//! pure functions over it so both frontends and the tests drive it the same
//! way.

use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Azimuthal angle of the eye around the target, measured in the XZ plane.
    /// Matches the convention of orbit controllers: zero looking down -Z,
    /// negative to the left.
    #[inline]
    pub fn azimuthal_angle(&self) -> f32 {
        let offset = self.eye - self.target;
        offset.x.atan2(offset.z)
    }

    /// Compute a world-space ray through normalized device coordinates.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_to_world_ray(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let dir = (p1 - p0).normalize();
        (self.eye, dir)
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Re-derive an orbiting eye position from the current one.
///
/// The eye's offset from the target is decomposed into yaw/pitch/radius,
/// the deltas applied (pitch clamped short of the poles), and the offset
/// rebuilt. Stateless, so repeated small drags cannot accumulate drift.
pub fn orbit_eye(eye: Vec3, target: Vec3, dyaw: f32, dpitch: f32) -> Vec3 {
    let offset = eye - target;
    let radius = offset.length().max(1e-6);
    let yaw = offset.x.atan2(offset.z) + dyaw;
    let pitch_limit = std::f32::consts::FRAC_PI_2 - 0.01;
    let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin() + dpitch).clamp(-pitch_limit, pitch_limit);
    let xz = radius * pitch.cos();
    target + Vec3::new(xz * yaw.sin(), radius * pitch.sin(), xz * yaw.cos())
}

/// Scale the eye's distance from the target, keeping direction.
pub fn zoom_eye(eye: Vec3, target: Vec3, factor: f32, min_radius: f32, max_radius: f32) -> Vec3 {
    let offset = eye - target;
    let radius = offset.length().max(1e-6);
    let new_radius = (radius * factor).clamp(min_radius, max_radius);
    target + offset * (new_radius / radius)
}
