//! DOM event wiring: orbit drag, wheel zoom, click picking, escape, resize,
//! and teardown on pagehide.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use app_core::SceneContext;

use crate::dom;

const ROTATE_SPEED: f32 = 0.005;
// A press-release excursion under this many CSS pixels still counts as a click.
const CLICK_SLOP_PX: f32 = 4.0;

#[derive(Default, Clone, Copy)]
struct DragState {
    down: bool,
    last_x: f32,
    last_y: f32,
    moved: f32,
}

pub fn register(canvas: &web::HtmlCanvasElement, ctx: &Rc<RefCell<SceneContext>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    {
        let drag = drag.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            d.down = true;
            d.last_x = ev.client_x() as f32;
            d.last_y = ev.client_y() as f32;
            d.moved = 0.0;
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let drag = drag.clone();
        let ctx = ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if !d.down {
                return;
            }
            let x = ev.client_x() as f32;
            let y = ev.client_y() as f32;
            let dx = x - d.last_x;
            let dy = y - d.last_y;
            d.last_x = x;
            d.last_y = y;
            d.moved += dx.abs() + dy.abs();
            ctx.borrow_mut()
                .rotate_camera(-dx * ROTATE_SPEED, dy * ROTATE_SPEED);
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let drag = drag.clone();
        let ctx = ctx.clone();
        let canvas_up = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            let was_click = d.down && d.moved < CLICK_SLOP_PX;
            d.down = false;
            if was_click {
                let (ndc_x, ndc_y) =
                    dom::client_to_ndc(&canvas_up, ev.client_x() as f32, ev.client_y() as f32);
                ctx.borrow_mut().on_pointer_click(ndc_x, ndc_y);
            }
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    {
        let ctx = ctx.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            // Positive deltaY scrolls away from the screen: zoom out.
            let factor = if ev.delta_y() > 0.0 { 1.1 } else { 0.9 };
            ctx.borrow_mut().zoom_camera(factor);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    if let Some(window) = web::window() {
        {
            let ctx = ctx.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.key() == "Escape" {
                    ctx.borrow_mut().on_escape();
                }
            }) as Box<dyn FnMut(_)>);
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
            closure.forget();
        }
        {
            let ctx = ctx.clone();
            let canvas_resize = canvas.clone();
            let closure = Closure::wrap(Box::new(move || {
                dom::sync_canvas_backing_size(&canvas_resize);
                ctx.borrow_mut()
                    .on_resize(canvas_resize.width(), canvas_resize.height());
            }) as Box<dyn FnMut()>);
            window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .ok();
            closure.forget();
        }
        {
            // Tearing down on pagehide lets the frame chain end cleanly when
            // the page goes away.
            let ctx = ctx.clone();
            let closure = Closure::wrap(Box::new(move || {
                ctx.borrow_mut().teardown();
            }) as Box<dyn FnMut()>);
            window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
                .ok();
            closure.forget();
        }
    }
}
