//! Optional platform capabilities handed to the overlay host at the
//! composition root. Each one has a plain fallback so a missing effect never
//! breaks the page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("capability not available")]
    Unavailable,
    #[error("capability call failed: {0}")]
    Failed(String),
}

/// Scroll the page to `top` (px).
pub trait ScrollTo {
    fn scroll_to(&self, top: f64) -> Result<(), CapabilityError>;
}

/// Try `preferred`, fall back to `native` when it is absent or fails.
pub fn scroll_best_effort(preferred: Option<&dyn ScrollTo>, native: &dyn ScrollTo, top: f64) {
    if let Some(scroller) = preferred {
        match scroller.scroll_to(top) {
            Ok(()) => return,
            Err(err) => log::debug!("smooth scroll unavailable, using native: {err}"),
        }
    }
    if let Err(err) = native.scroll_to(top) {
        log::debug!("native scroll failed: {err}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

/// Timing of an animated theme switch: the theme flips at `switch_ms` while
/// the transition layer covers the page, and the layer is removed at
/// `cleanup_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSwitchPlan {
    pub from: ThemeMode,
    pub to: ThemeMode,
    pub switch_ms: u32,
    pub cleanup_ms: u32,
}

impl ThemeSwitchPlan {
    pub const SWITCH_MS: u32 = 200;
    pub const CLEANUP_MS: u32 = 400;

    pub fn toggle(from: ThemeMode) -> Self {
        Self {
            from,
            to: from.toggled(),
            switch_ms: Self::SWITCH_MS,
            cleanup_ms: Self::CLEANUP_MS,
        }
    }
}

/// Animated theme change. Implemented by the page's transition effect.
pub trait ThemeTransition {
    fn run(&self, plan: ThemeSwitchPlan) -> Result<(), CapabilityError>;
}

/// Switches the theme through the animated effect when present, otherwise
/// (or when it fails) through the plain `fallback`.
pub struct ThemeSwitcher<'a> {
    transition: Option<&'a dyn ThemeTransition>,
    fallback: Box<dyn Fn(ThemeMode) + 'a>,
}

impl<'a> ThemeSwitcher<'a> {
    pub fn new(
        transition: Option<&'a dyn ThemeTransition>,
        fallback: impl Fn(ThemeMode) + 'a,
    ) -> Self {
        Self {
            transition,
            fallback: Box::new(fallback),
        }
    }

    /// Switch away from `current`; returns the new mode.
    pub fn toggle(&self, current: ThemeMode) -> ThemeMode {
        let plan = ThemeSwitchPlan::toggle(current);
        if let Some(transition) = self.transition {
            match transition.run(plan) {
                Ok(()) => return plan.to,
                Err(err) => log::debug!("theme transition unavailable: {err}"),
            }
        }
        (self.fallback)(plan.to);
        plan.to
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    struct Recorder {
        calls: RefCell<Vec<f64>>,
        fail: bool,
    }

    impl Recorder {
        fn new(fail: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl ScrollTo for Recorder {
        fn scroll_to(&self, top: f64) -> Result<(), CapabilityError> {
            self.calls.borrow_mut().push(top);
            if self.fail {
                Err(CapabilityError::Failed("detached".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn smooth_scroll_preferred() {
        let smooth = Recorder::new(false);
        let native = Recorder::new(false);
        scroll_best_effort(Some(&smooth), &native, 0.0);
        assert_eq!(smooth.calls.borrow().len(), 1);
        assert!(native.calls.borrow().is_empty());
    }

    #[test]
    fn falls_back_to_native() {
        let smooth = Recorder::new(true);
        let native = Recorder::new(false);
        scroll_best_effort(Some(&smooth), &native, 0.0);
        scroll_best_effort(None, &native, 10.0);
        assert_eq!(*native.calls.borrow(), vec![0.0, 10.0]);
    }

    struct Effect(Cell<Option<ThemeSwitchPlan>>);

    impl ThemeTransition for Effect {
        fn run(&self, plan: ThemeSwitchPlan) -> Result<(), CapabilityError> {
            self.0.set(Some(plan));
            Ok(())
        }
    }

    #[test]
    fn animated_switch_uses_plan() {
        let effect = Effect(Cell::new(None));
        let fallback_hits = Cell::new(0);
        let switcher =
            ThemeSwitcher::new(Some(&effect), |_| fallback_hits.set(fallback_hits.get() + 1));
        assert_eq!(switcher.toggle(ThemeMode::Dark), ThemeMode::Light);
        let plan = effect.0.get().unwrap();
        assert_eq!((plan.switch_ms, plan.cleanup_ms), (200, 400));
        assert_eq!(fallback_hits.get(), 0);
    }

    #[test]
    fn missing_effect_uses_fallback() {
        let applied = Cell::new(None);
        let switcher = ThemeSwitcher::new(None, |mode| applied.set(Some(mode)));
        assert_eq!(switcher.toggle(ThemeMode::Light), ThemeMode::Dark);
        assert_eq!(applied.get(), Some(ThemeMode::Dark));
    }

    #[test]
    fn theme_names() {
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }
}
