pub mod config;
pub mod field;
pub mod particle;
pub mod scramble;

// Browser glue only exists on wasm32; the simulation core above builds and
// tests on the host.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod effects;
    pub mod render;
    mod session;

    use crate::config::FieldOptions;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let seed = js_sys::Date::now() as u64;

        // First session gets the subtle fading intro; every later visit the
        // ambient field that runs for the lifetime of the page.
        let options = if session::is_first_visit(&window) {
            session::mark_visited(&window);
            FieldOptions::first_visit()
        } else {
            FieldOptions::default()
        };

        // Decorative effects are best-effort: a missing context or element
        // skips the effect without touching the rest of the page.
        match render::start(&window, options, seed) {
            Ok(_handle) => {}
            Err(e) => log::warn!("particle field disabled: {e:?}"),
        }
        if let Err(e) = effects::scramble_headings(&window, seed.rotate_left(17)) {
            log::warn!("heading scramble disabled: {e:?}");
        }

        Ok(())
    }
}
