use folio_protocol::HapticPulse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sampler::DragRange;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("open offset threshold must be negative, got {0}")]
    OpenOffset(f64),
    #[error("open velocity threshold must be negative, got {0}")]
    OpenVelocity(f64),
    #[error("drag range must satisfy min < 0 <= max, got {min}..{max}")]
    DragRange { min: f64, max: f64 },
    #[error("open offset {offset} lies outside the drag range starting at {min}")]
    UnreachableOffset { offset: f64, min: f64 },
    #[error("breakpoint must be positive, got {0}")]
    Breakpoint(f64),
}

/// What the scroll-to-top control does while the panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollTopMode {
    /// Only close the panel; scrolling needs a second press.
    CloseOnly,
    /// Close the panel, then scroll once it is gone.
    CloseThenScroll { delay_ms: u32 },
}

/// Swipe hint timings. An overlay without them has no hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintTiming {
    /// Auto-dismiss after mount.
    pub dismiss_ms: u32,
    /// How long the hint stays after reappearing on close.
    pub reappear_ms: u32,
}

impl Default for HintTiming {
    fn default() -> Self {
        Self {
            dismiss_ms: 5_000,
            reappear_ms: 2_000,
        }
    }
}

/// Thresholds and timings of one overlay instance.
///
/// The swipe presets disagree on purpose: each surface keeps the feel it was
/// tuned for, so nothing here is a shared constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Drag travel; `None` for overlays without a drag handle.
    pub drag: Option<DragRange>,
    /// Release above this offset (px, negative) opens the panel.
    pub open_offset_px: f64,
    /// Release faster upwards than this (px/s, negative) opens the panel.
    pub open_velocity_px_s: f64,
    /// Delay between selecting an item and the panel closing.
    pub select_commit_ms: u32,
    /// Delay for plain closes (toggle, outside click, escape). `0` is instant.
    pub close_delay_ms: u32,
    pub scroll_top: ScrollTopMode,
    /// Pulse fired when a drag commits open.
    pub open_pulse: HapticPulse,
    /// Overlay is inert at or above this viewport width. `None` disables gating.
    pub breakpoint_px: Option<f64>,
    pub hint: Option<HintTiming>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::progress_pill()
    }
}

impl OverlayConfig {
    /// Floating pill: short pull, quick commit.
    pub fn progress_pill() -> Self {
        Self {
            drag: Some(DragRange::new(-200.0, 0.0)),
            open_offset_px: -50.0,
            open_velocity_px_s: -500.0,
            select_commit_ms: 150,
            close_delay_ms: 0,
            scroll_top: ScrollTopMode::CloseOnly,
            open_pulse: HapticPulse::Medium,
            breakpoint_px: Some(768.0),
            hint: Some(HintTiming::default()),
        }
    }

    /// Full-width swipe-up bar revealing the glass card stack.
    pub fn glass_stack() -> Self {
        Self {
            drag: Some(DragRange::new(-300.0, 0.0)),
            open_offset_px: -100.0,
            open_velocity_px_s: -500.0,
            select_commit_ms: 200,
            close_delay_ms: 0,
            scroll_top: ScrollTopMode::CloseThenScroll { delay_ms: 300 },
            open_pulse: HapticPulse::Heavy,
            breakpoint_px: Some(768.0),
            hint: None,
        }
    }

    /// Language switcher palette: tap or keyboard only, on every viewport.
    pub fn command_palette() -> Self {
        Self {
            drag: None,
            select_commit_ms: 0,
            breakpoint_px: None,
            hint: None,
            ..Self::progress_pill()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.open_offset_px.is_nan() || self.open_offset_px >= 0.0 {
            return Err(ConfigError::OpenOffset(self.open_offset_px));
        }
        if self.open_velocity_px_s.is_nan() || self.open_velocity_px_s >= 0.0 {
            return Err(ConfigError::OpenVelocity(self.open_velocity_px_s));
        }
        if let Some(range) = self.drag {
            if range.min.is_nan() || range.max.is_nan() || range.min >= 0.0 || range.max < 0.0 {
                return Err(ConfigError::DragRange {
                    min: range.min,
                    max: range.max,
                });
            }
            if self.open_offset_px < range.min {
                return Err(ConfigError::UnreachableOffset {
                    offset: self.open_offset_px,
                    min: range.min,
                });
            }
        }
        if let Some(bp) = self.breakpoint_px
            && (bp.is_nan() || bp <= 0.0)
        {
            return Err(ConfigError::Breakpoint(bp));
        }
        Ok(())
    }

    /// Whether the overlay should exist at this viewport width.
    pub fn is_enabled_at(&self, viewport_width: f64) -> bool {
        match self.breakpoint_px {
            Some(bp) => viewport_width < bp,
            None => true,
        }
    }

    /// Travel used for content scale/blur: the drag range top, or the
    /// glass-stack distance for overlays without a handle.
    pub(crate) fn full_travel(&self) -> f64 {
        self.drag.map_or(-300.0, |r| r.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        OverlayConfig::progress_pill().validate().unwrap();
        OverlayConfig::glass_stack().validate().unwrap();
        OverlayConfig::command_palette().validate().unwrap();
    }

    #[test]
    fn positive_threshold_rejected() {
        let config = OverlayConfig {
            open_offset_px: 50.0,
            ..OverlayConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::OpenOffset(50.0)));
    }

    #[test]
    fn offset_beyond_travel_rejected() {
        let config = OverlayConfig {
            open_offset_px: -250.0,
            ..OverlayConfig::progress_pill()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnreachableOffset { .. })
        ));
    }

    #[test]
    fn breakpoint_gating() {
        let pill = OverlayConfig::progress_pill();
        assert!(pill.is_enabled_at(390.0));
        assert!(!pill.is_enabled_at(768.0));
        assert!(OverlayConfig::command_palette().is_enabled_at(1920.0));
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config: OverlayConfig =
            serde_json::from_str(r#"{"open_offset_px": -80.0, "select_commit_ms": 180}"#).unwrap();
        assert_eq!(config.open_offset_px, -80.0);
        assert_eq!(config.select_commit_ms, 180);
        assert_eq!(config.drag, OverlayConfig::progress_pill().drag);
    }
}
