//! First-visit flag in localStorage, gating the subtle intro variant of the
//! particle field.

use web_sys::Window;

const VISITED_KEY: &str = "resume_fx.visited";

/// True when no visited marker is present. An unavailable storage (privacy
/// mode, `file://`) counts as a repeat visit so the intro never replays on
/// every load.
pub fn is_first_visit(window: &Window) -> bool {
    match window.local_storage() {
        Ok(Some(storage)) => matches!(storage.get_item(VISITED_KEY), Ok(None)),
        _ => false,
    }
}

pub fn mark_visited(window: &Window) {
    if let Ok(Some(storage)) = window.local_storage() {
        if storage.set_item(VISITED_KEY, "1").is_err() {
            log::warn!("could not persist visited flag");
        }
    }
}
