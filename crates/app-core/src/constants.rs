use glam::Vec3;

// Scene tuning shared by the web and native frontends.

// Zoom banding (camera eye to controls target, world units)
pub const DETAIL_DISTANCE: f32 = 3.0; // inside the neuron swarm
pub const FOCUS_DISTANCE: f32 = 10.0; // brain fills the view
pub const APPROACH_DISTANCE: f32 = 150.0; // body visible, brain fading in

// Fade steps (opacity per tick)
pub const FADE_STEP_DEFAULT: f32 = 0.05;
pub const BRAIN_FADE_IN_STEP: f32 = 0.005;
pub const BRAIN_FADE_OUT_STEP: f32 = 0.01;

// Neuron swarm
pub const SWARM_MEMBER_COUNT: usize = 10;
pub const SWARM_CAGE_RADIUS: f32 = 0.8;
pub const SWARM_MEMBER_RADIUS_MIN: f32 = 0.02;
pub const SWARM_MEMBER_RADIUS_SPAN: f32 = 0.02;
pub const SWARM_VELOCITY_SPAN: f32 = 0.0002; // per-axis, centered on zero

// Orbiting cells (visible in detail mode)
pub const ORBIT_MEMBER_COUNT: usize = 5;
pub const ORBIT_RADIUS_MIN: f32 = 30.0;
pub const ORBIT_RADIUS_MAX: f32 = 80.0;
pub const ORBIT_MIN_SEPARATION: f32 = 10.0;
pub const ORBIT_HEIGHT: f32 = 0.0;
pub const ORBIT_MEMBER_RADIUS: f32 = 5.0;
pub const ORBIT_ANGULAR_SPEED_MIN: f32 = 0.001;
pub const ORBIT_ANGULAR_SPEED_MAX: f32 = 0.004;
pub const ORBIT_PLACEMENT_ATTEMPTS: usize = 10_000;

// Camera navigation
pub const TARGET_DAMPING: f32 = 0.08; // look-at target toward goal, per tick
pub const FOLLOW_DAMPING: f32 = 0.08; // goal toward followed entity, per tick
pub const FOCUS_SEQUENCE_TICKS: u32 = 60;
pub const FOCUS_OFFSET_RADII: f32 = 3.0; // eye parks this many radii from a picked entity
pub const CAMERA_MIN_RADIUS: f32 = 0.5;
pub const CAMERA_MAX_RADIUS: f32 = 800.0;
pub const CAMERA_START_RADIUS: f32 = 150.0;

// Background cross-fade
pub const BACKGROUND_BLEND_FACTOR: f32 = 0.05;
pub const BACKGROUND_DETAIL: [f32; 3] = [1.0, 1.0, 1.0];
pub const BACKGROUND_SPACE: [f32; 3] = [0.0, 0.0, 0.0];

// Connectivity edges
pub const EDGE_LINE_OPACITY: f32 = 0.3;

// Marker plane shown alongside the orbiters in detail mode
pub const MARKER_PLANE_RADIUS: f32 = 40.0;

pub const SWARM_CENTER: [f32; 3] = [0.0, 0.0, 0.0];

#[inline]
pub fn swarm_center_vec3() -> Vec3 {
    Vec3::from(SWARM_CENTER)
}
