//! Smooth background color cross-fade.

use glam::Vec3;

use crate::constants::BACKGROUND_BLEND_FACTOR;

/// Holds the current and target clear colors; the current color eases toward
/// the target a fixed fraction per tick, so mode changes cross-fade instead
/// of cutting.
pub struct BackgroundBlender {
    current: Vec3,
    target: Vec3,
    factor: f32,
}

impl BackgroundBlender {
    pub fn new(initial: Vec3) -> Self {
        Self {
            current: initial,
            target: initial,
            factor: BACKGROUND_BLEND_FACTOR,
        }
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn tick(&mut self) {
        self.current = self.current.lerp(self.target, self.factor);
    }

    #[inline]
    pub fn current(&self) -> Vec3 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }
}
