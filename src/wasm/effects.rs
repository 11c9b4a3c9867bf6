//! Heading scramble: every page heading re-scrambles itself back to its
//! own text when the pointer enters it. Each pass is a short, finite
//! `requestAnimationFrame` chain; a hover during a running pass is
//! ignored so passes never overlap.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlElement, Window};

use crate::scramble::TextScramble;

pub fn scramble_headings(window: &Window, seed: u64) -> Result<(), JsValue> {
    let document = window.document().ok_or("no document")?;
    let headings = document.query_selector_all("h1, h2, h3")?;

    for i in 0..headings.length() {
        let Some(node) = headings.get(i) else {
            continue;
        };
        let Ok(heading) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        let text = heading.inner_text();
        if text.trim().is_empty() {
            continue;
        }
        attach_hover_scramble(heading, text, seed.wrapping_add(u64::from(i)));
    }
    Ok(())
}

fn attach_hover_scramble(heading: HtmlElement, text: String, seed: u64) {
    let busy = Rc::new(Cell::new(false));
    let mut rng = SmallRng::seed_from_u64(seed);

    let target = heading.clone();
    let listener = Closure::wrap(Box::new(move || {
        if busy.replace(true) {
            return;
        }
        let mut pass_rng = SmallRng::from_rng(&mut rng);
        let scramble = TextScramble::new(&text, &text, &mut pass_rng);
        run_pass(target.clone(), scramble, pass_rng, busy.clone());
    }) as Box<dyn FnMut()>);

    if heading
        .add_event_listener_with_callback("mouseenter", listener.as_ref().unchecked_ref())
        .is_ok()
    {
        // Listener lives as long as the page, like the heading it serves.
        listener.forget();
    }
}

fn run_pass(
    heading: HtmlElement,
    mut scramble: TextScramble,
    mut rng: SmallRng,
    busy: Rc<Cell<bool>>,
) {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        heading.set_inner_text(&scramble.step(&mut rng));
        if scramble.is_done() {
            busy.set(false);
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window
                .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let Some(window) = web_sys::window() {
        let _ =
            window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
