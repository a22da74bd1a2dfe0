//! The gesture-driven overlay controller.
//!
//! [`OverlayMachine`] is the state authority; [`Overlay`] composes it with
//! the samplers and the hint for one mounted instance and is what hosts
//! talk to. Hosts feed raw readings and discrete events in, execute the
//! returned [`Effect`]s in order, and report timer firings back.

mod config;
mod hint;
mod machine;
mod marker;

pub use config::{ConfigError, HintTiming, OverlayConfig, ScrollTopMode};
pub use hint::HintController;
pub use machine::OverlayMachine;
pub use marker::{MARKER_ATTRIBUTE, OverlayMarker};

use folio_protocol::{
    Effect, MenuItem, NavItem, OverlayEvent, OverlayState, OverlayVisuals, ScrollFraction,
    ScrollMetrics, TiltSample, TimerTicket,
};

use crate::nav;
use crate::render::{self, RenderInput};
use crate::sampler::{DragSampler, PermissionOutcome, ScrollSampler, TiltSampler};

/// Environment read once when mounting.
#[derive(Debug, Clone, Default)]
pub struct MountEnv {
    /// `None` outside a browsing context.
    pub viewport_width: Option<f64>,
    pub scroll: Option<ScrollMetrics>,
    pub current_path: String,
}

/// A successfully mounted overlay plus the effects of mounting it.
#[derive(Debug)]
pub struct Mounted {
    pub overlay: Overlay,
    pub effects: Vec<Effect>,
}

/// One mounted overlay instance.
#[derive(Debug)]
pub struct Overlay {
    machine: OverlayMachine,
    hint: Option<HintController>,
    drag: Option<DragSampler>,
    scroll: ScrollSampler,
    tilt: TiltSampler,
    marker: OverlayMarker,
    items: Vec<NavItem>,
    current_path: String,
}

impl Overlay {
    /// Mount an overlay. Returns `Ok(None)` when the device-size gate keeps
    /// it inert (or there is no browsing context): nothing is instantiated
    /// and the host must not attach any listener.
    pub fn mount(
        config: OverlayConfig,
        marker: OverlayMarker,
        items: Vec<NavItem>,
        env: MountEnv,
    ) -> Result<Option<Mounted>, ConfigError> {
        config.validate()?;
        let Some(width) = env.viewport_width else {
            return Ok(None);
        };
        if !config.is_enabled_at(width) {
            log::debug!(
                "overlay {} inert at {width}px (breakpoint {:?})",
                marker.id(),
                config.breakpoint_px
            );
            return Ok(None);
        }

        let mut effects = Vec::new();
        let mut scroll = ScrollSampler::new();
        scroll.mount(env.scroll);
        let mut hint = config.hint.map(HintController::new);
        if let Some(hint) = hint.as_mut() {
            hint.mount(&mut effects);
        }
        let drag = config.drag.map(DragSampler::new);

        Ok(Some(Mounted {
            overlay: Self {
                machine: OverlayMachine::new(config),
                hint,
                drag,
                scroll,
                tilt: TiltSampler::new(),
                marker,
                items,
                current_path: env.current_path,
            },
            effects,
        }))
    }

    pub fn state(&self) -> OverlayState {
        self.machine.state()
    }

    pub fn config(&self) -> &OverlayConfig {
        self.machine.config()
    }

    pub fn marker(&self) -> &OverlayMarker {
        &self.marker
    }

    pub fn is_mounted(&self) -> bool {
        self.machine.is_mounted()
    }

    pub fn has_pending_commit(&self) -> bool {
        self.machine.has_pending_commit()
    }

    pub fn scroll_fraction(&self) -> ScrollFraction {
        self.scroll.fraction()
    }

    pub fn tilt(&self) -> TiltSample {
        self.tilt.sample()
    }

    pub fn hint_visible(&self) -> bool {
        self.hint.as_ref().is_some_and(HintController::is_visible)
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        nav::menu_items(&self.items, &self.current_path)
    }

    pub fn visuals(&self) -> OverlayVisuals {
        render::bind(&RenderInput {
            state: self.machine.state(),
            offset_y: self.machine.offset_y(),
            config: self.machine.config(),
            tilt: self.tilt.sample(),
            hint_visible: self.hint_visible(),
            item_count: self.items.len(),
        })
    }

    // --- Drag channel ---

    pub fn pointer_down(&mut self, pointer_y: f64, timestamp_ms: f64) -> Vec<Effect> {
        if !self.is_mounted() || self.state() != OverlayState::Closed {
            return Vec::new();
        }
        let Some(drag) = self.drag.as_mut() else {
            return Vec::new();
        };
        drag.begin(pointer_y, timestamp_ms);
        self.dispatch(OverlayEvent::DragStart)
    }

    pub fn pointer_move(&mut self, pointer_y: f64, timestamp_ms: f64) -> Vec<Effect> {
        let Some(sample) = self
            .drag
            .as_mut()
            .and_then(|d| d.update(pointer_y, timestamp_ms))
        else {
            return Vec::new();
        };
        self.dispatch(OverlayEvent::DragMove(sample))
    }

    pub fn pointer_up(&mut self, pointer_y: f64, timestamp_ms: f64) -> Vec<Effect> {
        let Some(sample) = self
            .drag
            .as_mut()
            .and_then(|d| d.end(pointer_y, timestamp_ms))
        else {
            return Vec::new();
        };
        self.dispatch(OverlayEvent::DragEnd(sample))
    }

    pub fn pointer_cancel(&mut self) -> Vec<Effect> {
        if let Some(drag) = self.drag.as_mut() {
            drag.cancel();
        }
        self.dispatch(OverlayEvent::DragCancel)
    }

    // --- Discrete events ---

    pub fn toggle(&mut self) -> Vec<Effect> {
        self.dispatch(OverlayEvent::Toggle)
    }

    pub fn shortcut_toggle(&mut self) -> Vec<Effect> {
        self.dispatch(OverlayEvent::ShortcutToggle)
    }

    pub fn escape(&mut self) -> Vec<Effect> {
        if let Some(drag) = self.drag.as_mut() {
            drag.cancel();
        }
        self.dispatch(OverlayEvent::Escape)
    }

    pub fn scroll_to_top(&mut self) -> Vec<Effect> {
        self.dispatch(OverlayEvent::ScrollToTop)
    }

    /// A pointer went down somewhere in the document. `target_markers` are
    /// the marker attribute values from the target up to the root.
    pub fn document_pointer_down<'a, I>(&mut self, target_markers: I) -> Vec<Effect>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        if self.state() != OverlayState::Open || self.marker.contains(target_markers) {
            return Vec::new();
        }
        self.dispatch(OverlayEvent::OutsideClick)
    }

    /// Select the `index`-th menu item. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Vec<Effect> {
        let Some(item) = self.items.get(index) else {
            log::debug!("overlay {}: no menu item {index}", self.marker.id());
            return Vec::new();
        };
        let event = OverlayEvent::Select {
            key: item.key.clone(),
            action: nav::resolve(&item.href, &self.current_path),
        };
        self.dispatch(event)
    }

    // --- Scroll and tilt channels (never touch the state machine) ---

    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> Vec<Effect> {
        let mut out = Vec::new();
        if !self.is_mounted() {
            return out;
        }
        self.scroll.on_scroll(metrics);
        if let Some(hint) = self.hint.as_mut() {
            hint.on_scroll(&mut out);
        }
        out
    }

    /// Whether the host should ask the platform for orientation access now.
    pub fn request_tilt_permission(&mut self) -> bool {
        self.is_mounted() && self.tilt.request_permission()
    }

    pub fn on_tilt_permission(&mut self, outcome: PermissionOutcome) {
        if self.is_mounted() {
            self.tilt.on_permission(outcome);
        }
    }

    pub fn on_orientation(&mut self, beta_deg: Option<f64>, gamma_deg: Option<f64>) -> TiltSample {
        if !self.is_mounted() {
            return self.tilt.sample();
        }
        self.tilt.on_orientation(beta_deg, gamma_deg)
    }

    // --- Lifecycle ---

    /// The route changed. Leaving the page resets the overlay to `Closed`
    /// without running anything still pending.
    pub fn set_path(&mut self, path: &str) -> Vec<Effect> {
        if path == self.current_path {
            return Vec::new();
        }
        self.current_path = path.to_owned();
        if let Some(drag) = self.drag.as_mut() {
            drag.cancel();
        }
        let mut out = self.machine.reset();
        self.observe(&mut out);
        out
    }

    /// Replace the menu entries, e.g. when they are derived from the path.
    pub fn set_items(&mut self, items: Vec<NavItem>) {
        self.items = items;
    }

    /// The viewport was resized. Crossing the breakpoint tears the overlay
    /// down; the host then drops its listeners and may mount a new one
    /// once the viewport qualifies again.
    pub fn on_resize(&mut self, viewport_width: f64) -> Vec<Effect> {
        if !self.is_mounted() || self.config().is_enabled_at(viewport_width) {
            return Vec::new();
        }
        log::debug!("overlay {} disabled at {viewport_width}px", self.marker.id());
        self.unmount()
    }

    pub fn on_timer(&mut self, ticket: TimerTicket) -> Vec<Effect> {
        let mut out = Vec::new();
        if !self.is_mounted() {
            return out;
        }
        if let Some(hint) = self.hint.as_mut()
            && hint.on_timer(ticket, &mut out)
        {
            return out;
        }
        out = self.machine.on_timer(ticket);
        self.observe(&mut out);
        out
    }

    /// Tear down: cancels every timer and detaches every listener. The
    /// instance ignores all input afterwards.
    pub fn unmount(&mut self) -> Vec<Effect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.cancel();
        }
        let mut out = self.machine.unmount();
        if let Some(hint) = self.hint.as_mut() {
            hint.unmount(&mut out);
        }
        self.scroll.unmount();
        self.tilt.reset();
        out
    }

    fn dispatch(&mut self, event: OverlayEvent) -> Vec<Effect> {
        let mut out = self.machine.handle(event);
        self.observe(&mut out);
        out
    }

    /// Let the hint react to the transitions in `out`.
    fn observe(&mut self, out: &mut Vec<Effect>) {
        let Some(hint) = self.hint.as_mut() else {
            return;
        };
        let transitions: Vec<_> = out
            .iter()
            .filter_map(|e| match e {
                Effect::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        for (from, to) in transitions {
            hint.on_transition(from, to, out);
        }
    }
}
