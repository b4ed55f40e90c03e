//! Model identities and the registry the fade engine works against.
//!
//! Models arrive asynchronously from the asset loader; any of them may be
//! absent at any tick and every operation targeting one must tolerate that.
//! The registry is a plain identifier-keyed map, not a side table keyed on
//! object identity: lookups only, no ownership of renderer resources.

use fnv::FnvHashMap;

/// The three nested models of the zoom journey.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ModelId {
    /// Coarse-scale environment.
    Space,
    /// Human-scale figure.
    Human,
    /// Brain-scale figure.
    Brain,
}

/// Opacity state of one renderable descendant (mesh or line-segments).
///
/// `opacity: None` means the asset carried no explicit value; the fade engine
/// defaults it to 1 the first time it touches the surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceState {
    pub opacity: Option<f32>,
    pub transparent: bool,
}

/// One loaded model: the flattened list of its renderable descendants.
#[derive(Clone, Debug)]
pub struct Model {
    pub surfaces: Vec<SurfaceState>,
}

impl Model {
    pub fn with_surfaces(count: usize) -> Self {
        Self {
            surfaces: vec![SurfaceState::default(); count],
        }
    }

    /// Opacity of the first surface, defaulting like the fade engine does.
    /// Frontends use this to drive whole-model alpha.
    pub fn opacity(&self) -> f32 {
        self.surfaces
            .first()
            .and_then(|s| s.opacity)
            .unwrap_or(1.0)
    }
}

#[derive(Default)]
pub struct ModelRegistry {
    models: FnvHashMap<ModelId, Model>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, id: ModelId, model: Model) {
        log::info!("model installed: {:?} ({} surfaces)", id, model.surfaces.len());
        self.models.insert(id, model);
    }

    pub fn remove(&mut self, id: ModelId) -> Option<Model> {
        self.models.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: ModelId) -> bool {
        self.models.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.models.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ModelId) -> Option<&mut Model> {
        self.models.get_mut(&id)
    }
}
