//! The camera-distance state machine driving the zoom narrative.

use glam::Vec3;

use crate::background::BackgroundBlender;
use crate::constants::{
    APPROACH_DISTANCE, BACKGROUND_DETAIL, BACKGROUND_SPACE, BRAIN_FADE_IN_STEP,
    BRAIN_FADE_OUT_STEP, DETAIL_DISTANCE, FADE_STEP_DEFAULT, FOCUS_DISTANCE,
};
use crate::fade::{FadeDirection, FadeEngine};
use crate::scene::{ModelId, ModelRegistry};

/// Discrete narrative state, derived purely from camera distance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SceneMode {
    Far,
    Approach,
    Focus,
    Detail,
}

/// Ordered banding; first match wins.
#[inline]
pub fn mode_for_distance(distance: f32) -> SceneMode {
    if distance < DETAIL_DISTANCE {
        SceneMode::Detail
    } else if distance < FOCUS_DISTANCE {
        SceneMode::Focus
    } else if distance < APPROACH_DISTANCE {
        SceneMode::Approach
    } else {
        SceneMode::Far
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Hemisphere {
    Left,
    Right,
}

/// Maps camera-change events to scene modes and drives the fade engine and
/// background blender. Holds no long-lived state beyond the hemisphere lock
/// and the detail flag.
pub struct ZoomStateMachine {
    mode: SceneMode,
    hemisphere: Option<Hemisphere>,
    showing_detail: bool,
    suspended: bool,
}

impl Default for ZoomStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoomStateMachine {
    pub fn new() -> Self {
        Self {
            mode: SceneMode::Far,
            hemisphere: None,
            showing_detail: false,
            suspended: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Locked while the mode sits in Focus; cleared on leaving it.
    #[inline]
    pub fn hemisphere(&self) -> Option<Hemisphere> {
        self.hemisphere
    }

    /// True in Detail mode; gates visibility of the orbiters and the marker
    /// plane, and switches the pickable set to the swarm members.
    #[inline]
    pub fn showing_detail(&self) -> bool {
        self.showing_detail
    }

    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// The navigator takes the camera; ignore camera-change events until
    /// `resume`.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Handle one camera-change notification.
    ///
    /// Both Focus and Approach keep the brain visible; only the thresholds
    /// differ. Far only brings the human back; the symmetric banding is
    /// intentional.
    pub fn on_camera_change(
        &mut self,
        distance: f32,
        azimuth: f32,
        fades: &mut FadeEngine,
        models: &ModelRegistry,
        background: &mut BackgroundBlender,
    ) {
        if self.suspended {
            return;
        }
        let next = mode_for_distance(distance);

        if next == SceneMode::Focus {
            if self.hemisphere.is_none() {
                self.hemisphere = Some(if azimuth < 0.0 {
                    Hemisphere::Left
                } else {
                    Hemisphere::Right
                });
            }
        } else {
            self.hemisphere = None;
        }

        if next != self.mode {
            log::debug!("scene mode {:?} -> {:?} (distance {:.2})", self.mode, next, distance);
            self.mode = next;
            self.showing_detail = next == SceneMode::Detail;
        }

        // Requests are re-issued on every event, not just on transitions: a
        // request against a model that has not arrived yet is dropped, and
        // re-evaluating here is what eventually picks it up.
        match next {
            SceneMode::Detail => {
                fades.request(FadeDirection::Out, ModelId::Brain, BRAIN_FADE_OUT_STEP, models);
                background.set_target(Vec3::from(BACKGROUND_DETAIL));
            }
            SceneMode::Focus | SceneMode::Approach => {
                fades.request(FadeDirection::In, ModelId::Brain, BRAIN_FADE_IN_STEP, models);
                fades.request(FadeDirection::Out, ModelId::Human, FADE_STEP_DEFAULT, models);
                background.set_target(Vec3::from(BACKGROUND_SPACE));
            }
            SceneMode::Far => {
                fades.request(FadeDirection::In, ModelId::Human, FADE_STEP_DEFAULT, models);
                background.set_target(Vec3::from(BACKGROUND_SPACE));
            }
        }
    }
}
