//! Placeholder model geometry, installed asynchronously like a real loader
//! would deliver it. Each model is a deterministic point cloud; the scene
//! only cares that it arrives late and fades like the real asset.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen_futures::spawn_local;

use app_core::scene::{Model, ModelId};
use app_core::SceneContext;

pub struct ModelCloud {
    pub id: ModelId,
    pub points: Vec<Vec3>,
    pub color: [f32; 3],
    pub point_scale: f32,
}

pub type CloudStore = Rc<RefCell<Vec<ModelCloud>>>;

pub fn load_models(ctx: &Rc<RefCell<SceneContext>>) -> CloudStore {
    let clouds: CloudStore = Rc::new(RefCell::new(Vec::new()));
    for (id, radius, squash, color, point_scale, count) in [
        (ModelId::Space, 400.0, 1.0, [0.75, 0.78, 0.95], 1.2, 900),
        (ModelId::Human, 40.0, 2.2, [0.85, 0.62, 0.5], 0.6, 700),
        (ModelId::Brain, 2.0, 0.8, [0.9, 0.45, 0.65], 0.05, 500),
    ] {
        let ctx = ctx.clone();
        let clouds = clouds.clone();
        spawn_local(async move {
            let points = shell_points(id, radius, squash, count);
            clouds.borrow_mut().push(ModelCloud {
                id,
                points,
                color,
                point_scale,
            });
            ctx.borrow_mut().install_model(id, Model::with_surfaces(1));
        });
    }
    clouds
}

/// Points on a vertically squashed (or stretched) spherical shell, seeded per
/// model so reloads draw the same shape.
fn shell_points(id: ModelId, radius: f32, squash: f32, count: usize) -> Vec<Vec3> {
    let seed = match id {
        ModelId::Space => 1,
        ModelId::Human => 2,
        ModelId::Brain => 3,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * squash * phi.cos(),
                radius * phi.sin() * theta.sin(),
            )
        })
        .collect()
}
