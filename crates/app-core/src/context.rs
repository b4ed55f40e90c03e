//! The single owner of all scene state.
//!
//! Both frontends hold exactly one `SceneContext` and drive it with input
//! events plus one `tick` per animation frame. Teardown is explicit: after
//! `teardown` every tick and input handler is a no-op, so a frame callback
//! that fires late does nothing instead of animating freed state.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::background::BackgroundBlender;
use crate::camera::{orbit_eye, zoom_eye, Camera};
use crate::connect::ConnectivityGraph;
use crate::constants::{
    BACKGROUND_SPACE, CAMERA_MAX_RADIUS, CAMERA_MIN_RADIUS, CAMERA_START_RADIUS,
    ORBIT_HEIGHT, ORBIT_MEMBER_COUNT, ORBIT_MIN_SEPARATION, ORBIT_RADIUS_MAX, ORBIT_RADIUS_MIN,
    SWARM_CAGE_RADIUS, SWARM_MEMBER_COUNT,
};
use crate::error::SceneError;
use crate::fade::FadeEngine;
use crate::navigate::CameraNavigator;
use crate::orbit::{place_orbit_members, OrbitMember};
use crate::scene::{Model, ModelId, ModelRegistry};
use crate::swarm::SwarmGroup;
use crate::zoom::ZoomStateMachine;

pub struct SceneContext {
    pub camera: Camera,
    pub models: ModelRegistry,
    pub fades: FadeEngine,
    pub zoom: ZoomStateMachine,
    pub background: BackgroundBlender,
    pub navigator: CameraNavigator,
    pub swarms: Vec<SwarmGroup>,
    pub graphs: Vec<ConnectivityGraph>,
    pub orbiters: Vec<OrbitMember>,
    alive: bool,
    scratch: Vec<Vec3>,
}

impl SceneContext {
    /// Build the scene with a deterministic layout for the given seed: one
    /// swarm caged at the origin, the orbiters rejection-sampled around it,
    /// and the camera parked at the far viewing distance.
    pub fn new(seed: u64, aspect: f32) -> Result<Self, SceneError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let center = crate::constants::swarm_center_vec3();
        let swarms = vec![SwarmGroup::new(
            center,
            SWARM_MEMBER_COUNT,
            SWARM_CAGE_RADIUS,
            &mut rng,
        )];
        let graphs = swarms.iter().map(|_| ConnectivityGraph::new()).collect();
        let orbiters = place_orbit_members(
            ORBIT_MEMBER_COUNT,
            ORBIT_RADIUS_MIN,
            ORBIT_RADIUS_MAX,
            ORBIT_MIN_SEPARATION,
            ORBIT_HEIGHT,
            &mut rng,
        )?;
        let camera = Camera::new(Vec3::new(0.0, 0.0, CAMERA_START_RADIUS), center, aspect);
        let navigator = CameraNavigator::new(center);
        Ok(Self {
            camera,
            models: ModelRegistry::new(),
            fades: FadeEngine::new(),
            zoom: ZoomStateMachine::new(),
            background: BackgroundBlender::new(Vec3::from(BACKGROUND_SPACE)),
            navigator,
            swarms,
            graphs,
            orbiters,
            alive: true,
            scratch: Vec::new(),
        })
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advance one animation frame: swarm motion, orbit motion, connectivity
    /// rebuild from the just-moved positions, camera navigation, fades, and
    /// the background cross-fade, in that order.
    pub fn tick(&mut self) {
        if !self.alive {
            return;
        }
        for group in &mut self.swarms {
            group.step();
        }
        for member in &mut self.orbiters {
            member.step();
        }
        for (group, graph) in self.swarms.iter().zip(&mut self.graphs) {
            group.positions_into(&mut self.scratch);
            graph.rebuild(&self.scratch);
        }
        self.navigator
            .tick(&mut self.camera, &self.swarms, &self.orbiters, &mut self.zoom);
        self.fades.tick(&mut self.models);
        self.background.tick();
    }

    /// Feed the current camera pose to the zoom state machine. Called after
    /// any input that moves the eye.
    pub fn on_camera_change(&mut self) {
        if !self.alive {
            return;
        }
        let distance = self.camera.distance_to_target();
        let azimuth = self.camera.azimuthal_angle();
        self.zoom.on_camera_change(
            distance,
            azimuth,
            &mut self.fades,
            &self.models,
            &mut self.background,
        );
    }

    /// Orbit the eye around the current target by the given yaw/pitch deltas.
    pub fn rotate_camera(&mut self, dyaw: f32, dpitch: f32) {
        if !self.alive {
            return;
        }
        self.camera.eye = orbit_eye(self.camera.eye, self.camera.target, dyaw, dpitch);
        self.on_camera_change();
    }

    /// Scale the eye's distance to the target; factor > 1 zooms out.
    pub fn zoom_camera(&mut self, factor: f32) {
        if !self.alive {
            return;
        }
        self.camera.eye = zoom_eye(
            self.camera.eye,
            self.camera.target,
            factor,
            CAMERA_MIN_RADIUS,
            CAMERA_MAX_RADIUS,
        );
        self.on_camera_change();
    }

    /// Pick against the scene with a click at normalized device coordinates.
    pub fn on_pointer_click(&mut self, ndc_x: f32, ndc_y: f32) {
        if !self.alive {
            return;
        }
        let (origin, dir) = self.camera.screen_to_world_ray(ndc_x, ndc_y);
        self.navigator.handle_click(
            origin,
            dir,
            self.zoom.showing_detail(),
            &self.swarms,
            &self.orbiters,
            &self.camera,
            &mut self.zoom,
        );
    }

    pub fn on_escape(&mut self) {
        if !self.alive {
            return;
        }
        self.navigator.handle_escape(&self.camera);
    }

    /// Update the camera aspect after a viewport resize. Zero-sized viewports
    /// happen transiently while a window is minimized; ignore them.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.alive || width == 0 || height == 0 {
            return;
        }
        self.camera.aspect = width as f32 / height as f32;
    }

    pub fn install_model(&mut self, id: ModelId, model: Model) {
        if !self.alive {
            return;
        }
        self.models.install(id, model);
        // Let the state machine issue the fades the new model missed.
        self.on_camera_change();
    }

    pub fn remove_model(&mut self, id: ModelId) {
        self.fades.forget(id);
        self.models.remove(id);
    }

    /// Stop the scene for good: cancel fades and navigation sequences, drop
    /// edge geometry, and turn every later call into a no-op.
    pub fn teardown(&mut self) {
        self.alive = false;
        self.fades.clear();
        self.navigator.clear();
        for graph in &mut self.graphs {
            graph.clear();
        }
        log::info!("scene torn down");
    }
}
