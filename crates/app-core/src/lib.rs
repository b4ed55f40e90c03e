//! Platform-independent scene logic for the zoom journey.
//!
//! Everything here is pure state and math: no rendering, no DOM, no windowing.
//! The web and native frontends own a [`SceneContext`] each and feed it input
//! events and ticks.

pub mod background;
pub mod camera;
pub mod connect;
pub mod constants;
pub mod context;
pub mod error;
pub mod fade;
pub mod labels;
pub mod navigate;
pub mod orbit;
pub mod scene;
pub mod swarm;
pub mod zoom;

pub use background::BackgroundBlender;
pub use camera::Camera;
pub use connect::ConnectivityGraph;
pub use context::SceneContext;
pub use error::SceneError;
pub use fade::{FadeDirection, FadeEngine};
pub use navigate::{CameraNavigator, PickedEntity};
pub use orbit::OrbitMember;
pub use scene::{Model, ModelId, ModelRegistry, SurfaceState};
pub use swarm::{SwarmGroup, SwarmMember};
pub use zoom::{SceneMode, ZoomStateMachine};

/// WGSL for both scene pipelines (instanced particles and edge lines),
/// shared by the frontends.
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
