mod bridge;
mod platform;

pub use bridge::OverlayHandle;

use folio_core::capability::{ThemeMode, ThemeSwitcher, ThemeTransition};
use folio_core::contact::format_budget as core_format_budget;
use folio_core::nav;
use folio_protocol::Locale;
use wasm_bindgen::prelude::*;

use crate::platform::JsThemeTransition;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

/// Switch away from `current` (`"dark"` or `"light"`) and return the new
/// mode. `transition` receives the switch plan JSON and runs the animated
/// effect; without it (or when it throws) the theme is applied directly.
#[wasm_bindgen]
pub fn toggle_theme(
    current: &str,
    transition: Option<js_sys::Function>,
) -> Result<String, JsError> {
    let current = ThemeMode::parse(current)
        .ok_or_else(|| JsError::new(&format!("unknown theme: {current}")))?;
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let effect = transition.map(JsThemeTransition);
    let switcher = ThemeSwitcher::new(
        effect.as_ref().map(|e| e as &dyn ThemeTransition),
        |mode| platform::apply_theme(&window, mode),
    );
    Ok(switcher.toggle(current).as_str().to_owned())
}

/// The current path under another locale.
#[wasm_bindgen]
pub fn switch_locale(path: &str, to: &str) -> Result<String, JsError> {
    let to = Locale::from_code(to).ok_or_else(|| JsError::new(&format!("unknown locale: {to}")))?;
    Ok(nav::switch_locale(path, nav::locale_of(path), to))
}

/// Canonical menu for `path`'s locale, with active flags, as JSON.
#[wasm_bindgen]
pub fn site_menu(path: &str) -> Result<String, JsError> {
    let items = nav::menu_items(&nav::site_menu(nav::locale_of(path)), path);
    serde_json::to_string(&items).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen]
pub fn format_budget(budget: f64) -> String {
    core_format_budget(budget)
}
