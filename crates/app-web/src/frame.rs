//! Per-frame assembly: tick the scene, flatten it into draw data, render.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use app_core::constants::{EDGE_LINE_OPACITY, MARKER_PLANE_RADIUS, ORBIT_MEMBER_RADIUS};
use app_core::labels::member_labels;
use app_core::SceneContext;

use crate::assets::CloudStore;
use crate::render::{GpuState, InstanceData};

const SWARM_COLOR: [f32; 4] = [0.55, 0.75, 1.0, 1.0];
const ORBITER_COLOR: [f32; 4] = [0.5, 0.9, 0.6, 1.0];
const MARKER_COLOR: [f32; 4] = [0.3, 0.3, 0.35, 0.25];
const LABEL_COLOR: [f32; 4] = [0.92, 0.92, 0.97, 0.8];
// Per-character width of a label tag quad.
const LABEL_CHAR_SCALE: f32 = 0.008;

pub fn start_loop(
    canvas: web::HtmlCanvasElement,
    ctx: Rc<RefCell<SceneContext>>,
    mut gpu: GpuState<'static>,
    clouds: CloudStore,
) {
    let mut instances: Vec<InstanceData> = Vec::new();
    let mut edges: Vec<[f32; 3]> = Vec::new();
    let line_color = [1.0, 1.0, 1.0, EDGE_LINE_OPACITY];

    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut scene = ctx.borrow_mut();
            if !scene.is_alive() {
                // Torn down; let the frame chain end here.
                return;
            }
            scene.tick();
            build_instances(&scene, &clouds, &mut instances);
            collect_edges(&scene, &mut edges);

            gpu.resize_if_needed(canvas.width(), canvas.height());
            if let Err(e) = gpu.render(
                &scene.camera,
                scene.background.current(),
                &instances,
                &edges,
                line_color,
            ) {
                log::error!("render error: {:?}", e);
            }
        }

        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

pub fn build_instances(ctx: &SceneContext, clouds: &CloudStore, out: &mut Vec<InstanceData>) {
    out.clear();

    for group in &ctx.swarms {
        for member in &group.members {
            out.push(InstanceData {
                pos: member.position.to_array(),
                scale: member.radius,
                color: SWARM_COLOR,
            });
        }
        // Label tags are regenerated from the live positions every frame and
        // hang below the member they name; width follows the text length.
        for label in member_labels(group) {
            out.push(InstanceData {
                pos: label.anchor.to_array(),
                scale: LABEL_CHAR_SCALE * label.text.len() as f32,
                color: LABEL_COLOR,
            });
        }
    }

    // Orbiters and the marker plane only exist visually in detail mode.
    if ctx.zoom.showing_detail() {
        for member in &ctx.orbiters {
            out.push(InstanceData {
                pos: member.position.to_array(),
                scale: ORBIT_MEMBER_RADIUS,
                color: ORBITER_COLOR,
            });
        }
        out.push(InstanceData {
            pos: [0.0, 0.0, 0.0],
            scale: MARKER_PLANE_RADIUS,
            color: MARKER_COLOR,
        });
    }

    for cloud in clouds.borrow().iter() {
        let Some(model) = ctx.models.get(cloud.id) else {
            continue;
        };
        let alpha = model.opacity();
        if alpha <= 0.0 {
            continue;
        }
        let color = [cloud.color[0], cloud.color[1], cloud.color[2], alpha];
        for point in &cloud.points {
            out.push(InstanceData {
                pos: point.to_array(),
                scale: cloud.point_scale,
                color,
            });
        }
    }
}

pub fn collect_edges(ctx: &SceneContext, out: &mut Vec<[f32; 3]>) {
    out.clear();
    if !ctx.zoom.showing_detail() {
        return;
    }
    for graph in &ctx.graphs {
        out.extend(graph.points().iter().map(|p| p.to_array()));
    }
}
