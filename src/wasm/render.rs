//! Canvas setup and the frame loop for the particle field.
//!
//! One `start` call inserts one canvas, registers one resize listener and
//! drives one `requestAnimationFrame` chain. Teardown (explicit `stop` or
//! expiry of the configured lifetime) is a single deterministic call that
//! stops the chain, deregisters the listener and removes the canvas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::{FieldOptions, FADE_OUT_MS};
use crate::field::ParticleField;

pub const CANVAS_ID: &str = "particle-canvas";

struct LoopState {
    canvas: HtmlCanvasElement,
    cancelled: Cell<bool>,
    fading: Cell<bool>,
    resize: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopState {
    fn teardown(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let Some(listener) = self.resize.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
        self.canvas.remove();
    }
}

/// Handle to one running particle field. Dropping it does not stop the
/// field; call [`FieldHandle::stop`] for that. Calling `start` twice yields
/// two fully independent fields.
pub struct FieldHandle {
    state: Rc<LoopState>,
}

impl FieldHandle {
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.state.canvas
    }

    pub fn is_stopped(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Stop the frame loop, deregister the resize listener and remove the
    /// canvas from the page.
    pub fn stop(&self) {
        self.state.teardown();
    }
}

/// Create the background canvas and start animating a particle field on it.
pub fn start(window: &Window, options: FieldOptions, seed: u64) -> Result<FieldHandle, JsValue> {
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("viewport width is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("viewport height is not a number")?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(CANVAS_ID);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    canvas.set_attribute("aria-hidden", "true")?;

    // Behind all content, non-interactive.
    let style = canvas.style();
    style.set_property("position", "fixed")?;
    style.set_property("top", "0")?;
    style.set_property("left", "0")?;
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    style.set_property("z-index", "-1")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("opacity", &options.base_opacity.to_string())?;

    body.prepend_with_node_1(&canvas)?;

    let ctx = match canvas.get_context("2d")? {
        Some(obj) => obj.dyn_into::<CanvasRenderingContext2d>()?,
        None => {
            canvas.remove();
            return Err("2d context unavailable".into());
        }
    };

    let lifetime = options.lifetime_ms;
    let mut rng = SmallRng::seed_from_u64(seed);
    let field = Rc::new(RefCell::new(ParticleField::new(
        width, height, options, &mut rng,
    )));
    log::info!(
        "particle field: {} particles over {width:.0}x{height:.0}",
        field.borrow().particles().len()
    );

    let state = Rc::new(LoopState {
        canvas: canvas.clone(),
        cancelled: Cell::new(false),
        fading: Cell::new(false),
        resize: RefCell::new(None),
    });

    // Resize only adjusts the surface dimensions; particles keep their
    // trajectories and reflect against the new bounds on later frames.
    {
        let canvas = canvas.clone();
        let field = field.clone();
        let listener = Closure::wrap(Box::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (Some(w), Some(h)) = (
                window.inner_width().ok().and_then(|v| v.as_f64()),
                window.inner_height().ok().and_then(|v| v.as_f64()),
            ) else {
                return;
            };
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            field.borrow_mut().resize(w, h);
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
        *state.resize.borrow_mut() = Some(listener);
    }

    let started_at = now_ms(window);

    // `f` holds the animation-frame closure so it can re-schedule itself;
    // the `Option` lets the closure obtain a reference to itself after
    // construction.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    {
        let state = state.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if state.cancelled.get() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };

            if let Some(lifetime) = lifetime {
                if !state.fading.get() && now_ms(&window) - started_at >= lifetime {
                    state.fading.set(true);
                    begin_fade_out(&window, &state);
                    return;
                }
            }

            draw_frame(&ctx, &mut field.borrow_mut());

            let _ = window
                .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }) as Box<dyn FnMut()>));
    }
    window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;

    Ok(FieldHandle { state })
}

/// One frame: clear, connection lines from current positions, then advance
/// and draw every particle.
fn draw_frame(ctx: &CanvasRenderingContext2d, field: &mut ParticleField) {
    ctx.clear_rect(0.0, 0.0, field.width(), field.height());

    ctx.set_line_width(0.5);
    for line in field.connections() {
        ctx.begin_path();
        ctx.set_stroke_style_str(&line.css_color());
        ctx.move_to(line.x1, line.y1);
        ctx.line_to(line.x2, line.y2);
        ctx.stroke();
    }

    field.step();
    for p in field.particles() {
        ctx.begin_path();
        ctx.set_fill_style_str(&p.css_color());
        let _ = ctx.arc(p.x, p.y, p.radius, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }
}

/// Fade the canvas out via a CSS transition, then tear the field down once
/// the transition has had time to finish.
fn begin_fade_out(window: &Window, state: &Rc<LoopState>) {
    let style = state.canvas.style();
    let _ = style.set_property("transition", &format!("opacity {FADE_OUT_MS}ms ease"));
    let _ = style.set_property("opacity", "0");

    let state = state.clone();
    let done = Closure::wrap(Box::new(move || {
        state.teardown();
    }) as Box<dyn FnMut()>);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        done.as_ref().unchecked_ref(),
        FADE_OUT_MS as i32 + 100,
    );
    // One-shot; intentionally left to the page lifetime.
    done.forget();
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
