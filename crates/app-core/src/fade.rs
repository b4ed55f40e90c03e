//! Cancellable, directional opacity fades.
//!
//! Sessions live in an identifier-keyed registry polled once per tick by the
//! scene context; cancellation is the registry entry being replaced, so a
//! superseded fade simply stops being polled instead of racing a stale
//! closure.

use fnv::FnvHashMap;

use crate::scene::{ModelId, ModelRegistry};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeDirection {
    /// The opacity bound this direction moves toward.
    #[inline]
    pub fn bound(self) -> f32 {
        match self {
            FadeDirection::In => 1.0,
            FadeDirection::Out => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FadeSession {
    pub direction: FadeDirection,
    pub step: f32,
}

/// Owns at most one fade session per model.
#[derive(Default)]
pub struct FadeEngine {
    sessions: FnvHashMap<ModelId, FadeSession>,
}

impl FadeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or redirect) a fade. Skipped silently when the model has not
    /// arrived yet; the state machine re-evaluates on the next camera change.
    /// A same-direction request leaves a running session untouched.
    pub fn request(
        &mut self,
        direction: FadeDirection,
        id: ModelId,
        step: f32,
        models: &ModelRegistry,
    ) {
        if !models.contains(id) {
            log::debug!("fade {:?} skipped, {:?} not loaded", direction, id);
            return;
        }
        match self.sessions.get(&id) {
            Some(session) if session.direction == direction => {}
            _ => {
                self.sessions.insert(id, FadeSession { direction, step });
            }
        }
    }

    /// Advance every running session by one tick.
    ///
    /// Each session visits all surfaces of its model: a surface with no
    /// explicit opacity is defaulted to 1, opacity moves by ±step clamped to
    /// [0, 1], and the transparency flag tracks `opacity < 1`. A session ends
    /// once every surface rests at the bound.
    pub fn tick(&mut self, models: &mut ModelRegistry) {
        self.sessions.retain(|id, session| {
            let Some(model) = models.get_mut(*id) else {
                // Model torn down mid-fade; nothing left to animate.
                return false;
            };
            let mut pending = false;
            for surface in &mut model.surfaces {
                let opacity = surface.opacity.get_or_insert(1.0);
                match session.direction {
                    FadeDirection::In => {
                        if *opacity < 1.0 {
                            *opacity = (*opacity + session.step).min(1.0);
                        }
                        if *opacity < 1.0 {
                            pending = true;
                        }
                    }
                    FadeDirection::Out => {
                        if *opacity > 0.0 {
                            *opacity = (*opacity - session.step).max(0.0);
                        }
                        if *opacity > 0.0 {
                            pending = true;
                        }
                    }
                }
                surface.transparent = *opacity < 1.0;
            }
            pending
        });
    }

    #[inline]
    pub fn is_fading(&self, id: ModelId) -> bool {
        self.sessions.contains_key(&id)
    }

    #[inline]
    pub fn direction_of(&self, id: ModelId) -> Option<FadeDirection> {
        self.sessions.get(&id).map(|s| s.direction)
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop the session for a model that is being destroyed.
    pub fn forget(&mut self, id: ModelId) {
        self.sessions.remove(&id);
    }

    /// Cancel everything; used by scene teardown.
    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}
