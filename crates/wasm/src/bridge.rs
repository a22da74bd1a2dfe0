use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use folio_core::capability::{ScrollTo, scroll_best_effort};
use folio_core::haptics::emit_best_effort;
use folio_core::nav;
use folio_core::overlay::{MARKER_ATTRIBUTE, MountEnv, Overlay, OverlayConfig, OverlayMarker};
use folio_core::sampler::PermissionOutcome;
use folio_protocol::{Effect, NavAction, TimerKind};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{DeviceOrientationEvent, Element, Event, KeyboardEvent, Window};

use crate::platform::{self, NativeScroll, SmoothScroll, WebVibration};

fn to_js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

const LOCALE_PALETTE: &str = "command-palette";

fn config_for(preset: &str, config_json: Option<String>) -> Result<OverlayConfig, JsError> {
    if let Some(json) = config_json {
        return serde_json::from_str(&json).map_err(to_js_error);
    }
    match preset {
        "progress-pill" => Ok(OverlayConfig::progress_pill()),
        "glass-stack" => Ok(OverlayConfig::glass_stack()),
        LOCALE_PALETTE => Ok(OverlayConfig::command_palette()),
        _ => Err(JsError::new(&format!("unknown overlay preset: {preset}"))),
    }
}

/// Page callbacks.
struct Hooks {
    /// Called with the visuals JSON after every change.
    on_change: js_sys::Function,
    /// Called with the `NavAction` JSON for route changes. Without it the
    /// bridge assigns `location.href`.
    navigate: Option<js_sys::Function>,
    smooth_scroll: Option<SmoothScroll>,
    /// Called without arguments once a resize took the viewport past the
    /// breakpoint and the overlay tore itself down.
    on_inert: Option<js_sys::Function>,
}

struct Bridge {
    overlay: RefCell<Overlay>,
    window: Window,
    hooks: Hooks,
    /// Menu entries are the locales of the current page.
    locale_menu: bool,
    vibration: WebVibration,
    native_scroll: NativeScroll,
    /// One live JS timeout per timer kind. Dropping a `Timeout` clears it.
    timers: RefCell<HashMap<TimerKind, Timeout>>,
    /// Outside-click and escape listeners, attached only while open.
    outside: RefCell<Vec<EventListener>>,
    ambient: RefCell<Vec<EventListener>>,
}

impl Bridge {
    fn dispatch(self: &Rc<Self>, input: impl FnOnce(&mut Overlay) -> Vec<Effect>) {
        let effects = input(&mut self.overlay.borrow_mut());
        self.run(effects);
    }

    fn run(self: &Rc<Self>, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        for effect in effects {
            match effect {
                Effect::ScheduleTimer { ticket, delay_ms } => {
                    let weak = Rc::downgrade(self);
                    let timeout = Timeout::new(delay_ms, move || {
                        if let Some(bridge) = weak.upgrade() {
                            bridge.dispatch(|overlay| overlay.on_timer(ticket));
                        }
                    });
                    self.timers.borrow_mut().insert(ticket.kind, timeout);
                }
                Effect::CancelTimer(kind) => {
                    self.timers.borrow_mut().remove(&kind);
                }
                Effect::ListenOutside(true) => self.attach_outside(),
                Effect::ListenOutside(false) => self.outside.borrow_mut().clear(),
                Effect::Haptic(pulse) => emit_best_effort(&self.vibration, pulse),
                Effect::Navigate(action) => self.navigate(action),
                Effect::ScrollToTop => self.scroll_to(0.0),
                Effect::StateChanged { .. } | Effect::Hint(_) => {}
            }
        }
        self.notify();
    }

    fn notify(&self) {
        let json = match serde_json::to_string(&self.overlay.borrow().visuals()) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to encode overlay visuals: {err}");
                return;
            }
        };
        if let Err(err) = self
            .hooks
            .on_change
            .call1(&JsValue::NULL, &JsValue::from_str(&json))
        {
            log::debug!("on_change threw: {err:?}");
        }
    }

    fn scroll_to(&self, top: f64) {
        let preferred = self.hooks.smooth_scroll.as_ref().map(|s| s as &dyn ScrollTo);
        scroll_best_effort(preferred, &self.native_scroll, top);
    }

    fn navigate(&self, action: NavAction) {
        if let NavAction::Anchor { id } = &action {
            match platform::anchor_top(&self.window, id) {
                Some(top) => self.scroll_to(top),
                None => log::debug!("no element with id {id}"),
            }
            return;
        }
        if let Some(navigate) = &self.hooks.navigate {
            match serde_json::to_string(&action) {
                Ok(json) => {
                    if let Err(err) = navigate.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::debug!("navigate hook threw: {err:?}");
                    }
                }
                Err(err) => log::error!("failed to encode navigation: {err}"),
            }
            return;
        }
        let href = match action {
            NavAction::Route { path } => path,
            NavAction::RouteThenAnchor { path, id } => format!("{path}#{id}"),
            NavAction::Anchor { .. } => return,
        };
        if let Err(err) = self.window.location().set_href(&href) {
            log::debug!("location change refused: {err:?}");
        }
    }

    fn attach_outside(self: &Rc<Self>) {
        let Some(document) = self.window.document() else {
            return;
        };
        let mut listeners = self.outside.borrow_mut();
        listeners.clear();

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "mousedown", move |event: &Event| {
            let Some(bridge) = weak.upgrade() else {
                return;
            };
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            let markers = platform::ancestor_markers(target, MARKER_ATTRIBUTE);
            bridge.dispatch(|overlay| {
                overlay.document_pointer_down(markers.iter().map(Option::as_deref))
            });
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() != "Escape" {
                return;
            }
            if let Some(bridge) = weak.upgrade() {
                bridge.dispatch(Overlay::escape);
            }
        }));
    }

    fn attach_ambient(self: &Rc<Self>, shortcut: bool) {
        let mut listeners = self.ambient.borrow_mut();

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.window, "resize", move |_: &Event| {
            let Some(bridge) = weak.upgrade() else {
                return;
            };
            let Some(width) = platform::viewport_width(&bridge.window) else {
                return;
            };
            let effects = bridge.overlay.borrow_mut().on_resize(width);
            if bridge.overlay.borrow().is_mounted() {
                return;
            }
            bridge.run(effects);
            bridge.go_inert();
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.window, "scroll", move |_: &Event| {
            let Some(bridge) = weak.upgrade() else {
                return;
            };
            let Some(metrics) = platform::scroll_metrics(&bridge.window) else {
                return;
            };
            bridge.dispatch(|overlay| overlay.on_scroll(&metrics));
        }));

        if shortcut && let Some(document) = self.window.document() {
            let weak = Rc::downgrade(self);
            let options = EventListenerOptions::enable_prevent_default();
            listeners.push(EventListener::new_with_options(
                &document,
                "keydown",
                options,
                move |event: &Event| {
                    let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if !(key.meta_key() || key.ctrl_key()) || !key.key().eq_ignore_ascii_case("k") {
                        return;
                    }
                    event.prevent_default();
                    if let Some(bridge) = weak.upgrade() {
                        bridge.dispatch(Overlay::shortcut_toggle);
                    }
                },
            ));
        }
    }

    fn on_permission(self: &Rc<Self>, outcome: PermissionOutcome) {
        self.overlay.borrow_mut().on_tilt_permission(outcome);
        if outcome != PermissionOutcome::Granted {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let options = EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: true,
        };
        let listener = EventListener::new_with_options(
            &self.window,
            "deviceorientation",
            options,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<DeviceOrientationEvent>() else {
                    return;
                };
                let Some(bridge) = weak.upgrade() else {
                    return;
                };
                let visible = {
                    let mut overlay = bridge.overlay.borrow_mut();
                    overlay.on_orientation(event.beta(), event.gamma());
                    overlay.state().is_panel_visible()
                };
                if visible {
                    bridge.notify();
                }
            },
        );
        self.ambient.borrow_mut().push(listener);
    }

    fn release(&self) {
        self.timers.borrow_mut().clear();
        self.outside.borrow_mut().clear();
    }

    /// Called from the resize listener, which is itself in `ambient`: the
    /// ambient listeners are dropped after it returns.
    fn go_inert(self: &Rc<Self>) {
        self.release();
        let weak = Rc::downgrade(self);
        spawn_local(async move {
            if let Some(bridge) = weak.upgrade() {
                bridge.ambient.borrow_mut().clear();
            }
        });
        if let Some(on_inert) = &self.hooks.on_inert
            && let Err(err) = on_inert.call0(&JsValue::NULL)
        {
            log::debug!("on_inert threw: {err:?}");
        }
    }

    fn teardown(self: &Rc<Self>) {
        self.dispatch(Overlay::unmount);
        self.release();
        self.ambient.borrow_mut().clear();
    }
}

/// One mounted overlay, owned by the page component that rendered it.
#[wasm_bindgen]
pub struct OverlayHandle {
    bridge: Rc<Bridge>,
}

#[wasm_bindgen]
impl OverlayHandle {
    /// Mount an overlay whose elements carry `data-folio-overlay="<marker_id>"`.
    ///
    /// `preset` is `progress-pill`, `glass-stack` or `command-palette`;
    /// `config_json` replaces it with a full configuration. The palette lists
    /// the locales of the current page; the other presets list the site
    /// menu. Returns `undefined` when the overlay stays inert on this
    /// viewport; `on_inert` fires if a later resize makes it inert.
    pub fn mount(
        marker_id: &str,
        preset: &str,
        config_json: Option<String>,
        on_change: js_sys::Function,
        navigate: Option<js_sys::Function>,
        smooth_scroll: Option<js_sys::Function>,
        on_inert: Option<js_sys::Function>,
    ) -> Result<Option<OverlayHandle>, JsError> {
        let config = config_for(preset, config_json)?;
        let shortcut = config.drag.is_none();
        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let current_path = platform::current_path(&window);
        let env = MountEnv {
            viewport_width: platform::viewport_width(&window),
            scroll: platform::scroll_metrics(&window),
            current_path: current_path.clone(),
        };
        let locale_menu = preset == LOCALE_PALETTE;
        let items = if locale_menu {
            nav::locale_menu(&current_path)
        } else {
            nav::site_menu(nav::locale_of(&current_path))
        };
        let Some(mounted) =
            Overlay::mount(config, OverlayMarker::new(marker_id), items, env).map_err(to_js_error)?
        else {
            return Ok(None);
        };

        let bridge = Rc::new(Bridge {
            overlay: RefCell::new(mounted.overlay),
            hooks: Hooks {
                on_change,
                navigate,
                smooth_scroll: smooth_scroll.map(SmoothScroll),
                on_inert,
            },
            locale_menu,
            vibration: WebVibration::new(window.clone()),
            native_scroll: NativeScroll::new(window.clone()),
            window,
            timers: RefCell::new(HashMap::new()),
            outside: RefCell::new(Vec::new()),
            ambient: RefCell::new(Vec::new()),
        });
        bridge.attach_ambient(shortcut);
        bridge.run(mounted.effects);
        bridge.notify();
        log::debug!("overlay {marker_id} mounted");
        Ok(Some(OverlayHandle { bridge }))
    }

    pub fn pointer_down(&self, client_y: f64, timestamp_ms: f64) {
        self.bridge.dispatch(|o| o.pointer_down(client_y, timestamp_ms));
    }

    pub fn pointer_move(&self, client_y: f64, timestamp_ms: f64) {
        let moved = self.bridge.overlay.borrow_mut().pointer_move(client_y, timestamp_ms);
        if moved.is_empty() {
            // The live offset still changed.
            self.bridge.notify();
        } else {
            self.bridge.run(moved);
        }
    }

    pub fn pointer_up(&self, client_y: f64, timestamp_ms: f64) {
        self.bridge.dispatch(|o| o.pointer_up(client_y, timestamp_ms));
    }

    pub fn pointer_cancel(&self) {
        self.bridge.dispatch(Overlay::pointer_cancel);
    }

    pub fn toggle(&self) {
        self.bridge.dispatch(Overlay::toggle);
    }

    pub fn escape(&self) {
        self.bridge.dispatch(Overlay::escape);
    }

    pub fn scroll_to_top(&self) {
        self.bridge.dispatch(Overlay::scroll_to_top);
    }

    pub fn select(&self, index: usize) {
        self.bridge.dispatch(|o| o.select(index));
    }

    /// Report a client-side route change.
    pub fn set_path(&self, path: &str) {
        self.bridge.dispatch(|o| o.set_path(path));
        if self.bridge.locale_menu {
            self.bridge.overlay.borrow_mut().set_items(nav::locale_menu(path));
            self.bridge.notify();
        }
    }

    /// Ask for device orientation access. Must run inside a user gesture on
    /// iOS; elsewhere it is granted without a prompt.
    pub fn request_tilt_permission(&self) {
        if !self.bridge.overlay.borrow_mut().request_tilt_permission() {
            return;
        }
        let global = js_sys::global();
        let ctor = js_sys::Reflect::get(&global, &JsValue::from_str("DeviceOrientationEvent"))
            .ok()
            .filter(|c| !c.is_undefined());
        let Some(ctor) = ctor else {
            self.bridge.on_permission(PermissionOutcome::Unsupported);
            return;
        };
        let request = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        let Some(request) = request else {
            self.bridge.on_permission(PermissionOutcome::Granted);
            return;
        };
        let promise = match request.call0(&ctor) {
            Ok(promise) => js_sys::Promise::from(promise),
            Err(err) => {
                log::debug!("orientation permission request threw: {err:?}");
                self.bridge.on_permission(PermissionOutcome::Denied);
                return;
            }
        };
        let weak = Rc::downgrade(&self.bridge);
        spawn_local(async move {
            let outcome = match JsFuture::from(promise).await {
                Ok(answer) if answer.as_string().as_deref() == Some("granted") => {
                    PermissionOutcome::Granted
                }
                _ => PermissionOutcome::Denied,
            };
            if let Some(bridge) = weak.upgrade() {
                bridge.on_permission(outcome);
            }
        });
    }

    pub fn state(&self) -> String {
        format!("{:?}", self.bridge.overlay.borrow().state())
    }

    pub fn visuals(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.bridge.overlay.borrow().visuals()).map_err(to_js_error)
    }

    pub fn menu_items(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.bridge.overlay.borrow().menu_items()).map_err(to_js_error)
    }

    /// Cancel every timer and detach every listener.
    pub fn unmount(&self) {
        self.bridge.teardown();
    }
}
