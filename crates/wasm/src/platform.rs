//! Browser implementations of the core's optional capabilities.

use folio_core::capability::{
    CapabilityError, ScrollTo, ThemeMode, ThemeSwitchPlan, ThemeTransition,
};
use folio_core::haptics::{HapticError, HapticSink};
use folio_protocol::ScrollMetrics;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

fn js_failure(err: JsValue) -> CapabilityError {
    CapabilityError::Failed(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// `navigator.vibrate`, absent on most desktop browsers and on iOS.
pub struct WebVibration {
    window: Window,
}

impl WebVibration {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl HapticSink for WebVibration {
    fn vibrate(&self, pattern_ms: &[u32]) -> Result<(), HapticError> {
        let navigator = self.window.navigator();
        let supported =
            js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false);
        if !supported {
            return Err(HapticError::Unsupported);
        }
        let pattern: js_sys::Array = pattern_ms.iter().map(|ms| JsValue::from(*ms)).collect();
        if navigator.vibrate_with_pattern(&pattern) {
            Ok(())
        } else {
            Err(HapticError::Refused("navigator.vibrate returned false".into()))
        }
    }
}

/// Plain `window.scrollTo`.
pub struct NativeScroll {
    window: Window,
}

impl NativeScroll {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ScrollTo for NativeScroll {
    fn scroll_to(&self, top: f64) -> Result<(), CapabilityError> {
        self.window.scroll_to_with_x_and_y(0.0, top);
        Ok(())
    }
}

/// A page-provided smooth scroll function taking the target offset.
pub struct SmoothScroll(pub js_sys::Function);

impl ScrollTo for SmoothScroll {
    fn scroll_to(&self, top: f64) -> Result<(), CapabilityError> {
        self.0
            .call1(&JsValue::NULL, &JsValue::from_f64(top))
            .map(|_| ())
            .map_err(js_failure)
    }
}

/// A page-provided animated theme effect taking the switch plan as JSON.
pub struct JsThemeTransition(pub js_sys::Function);

impl ThemeTransition for JsThemeTransition {
    fn run(&self, plan: ThemeSwitchPlan) -> Result<(), CapabilityError> {
        let json =
            serde_json::to_string(&plan).map_err(|e| CapabilityError::Failed(e.to_string()))?;
        self.0
            .call1(&JsValue::NULL, &JsValue::from_str(&json))
            .map(|_| ())
            .map_err(js_failure)
    }
}

/// Apply `mode` without animation: class and `data-theme` on the root.
pub fn apply_theme(window: &Window, mode: ThemeMode) {
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return;
    };
    let classes = root.class_list();
    let _ = classes.remove_1(mode.toggled().as_str());
    if let Err(err) = classes.add_1(mode.as_str()) {
        log::debug!("theme class not applied: {err:?}");
    }
    if let Err(err) = root.set_attribute("data-theme", mode.as_str()) {
        log::debug!("data-theme not applied: {err:?}");
    }
}

pub fn viewport_width(window: &Window) -> Option<f64> {
    window.inner_width().ok().and_then(|w| w.as_f64())
}

pub fn scroll_metrics(window: &Window) -> Option<ScrollMetrics> {
    let root = window.document()?.document_element()?;
    Some(ScrollMetrics {
        scroll_top: f64::from(root.scroll_top()),
        scroll_height: f64::from(root.scroll_height()),
        client_height: f64::from(root.client_height()),
    })
}

pub fn current_path(window: &Window) -> String {
    window
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_owned())
}

/// Document offset of the element with `id`.
pub fn anchor_top(window: &Window, id: &str) -> Option<f64> {
    let element = window.document()?.get_element_by_id(id)?;
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    Some(element.get_bounding_client_rect().top() + scroll_y)
}

/// Marker attribute values from `element` up to the document root.
pub fn ancestor_markers(element: Option<Element>, attribute: &str) -> Vec<Option<String>> {
    let mut markers = Vec::new();
    let mut current = element;
    while let Some(el) = current {
        markers.push(el.get_attribute(attribute));
        current = el.parent_element();
    }
    markers
}
