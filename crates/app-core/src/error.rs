use thiserror::Error;

/// Errors that can occur while assembling the scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Rejection sampling could not place an orbit member without violating
    /// the minimum separation within the attempt budget.
    #[error("placed {placed} orbit members, could not fit another with separation {min_separation}")]
    OrbitPlacement { placed: usize, min_separation: f32 },
}
