use serde::{Deserialize, Serialize};

use crate::nav::NavAction;
use crate::types::DragSample;

/// The single authoritative state of one overlay instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OverlayState {
    /// Resting state, no panel visible.
    #[default]
    Closed,
    /// A drag gesture is in progress and has not committed either way.
    Dragging,
    /// Panel fully visible and interactive.
    Open,
    /// A close was requested; resolves to `Closed` once the commit timer fires.
    Closing,
}

impl OverlayState {
    /// Whether the panel is on screen (including while animating out).
    pub fn is_panel_visible(self) -> bool {
        matches!(self, Self::Open | Self::Closing)
    }
}

/// Discrete input to the overlay state machine.
///
/// Drag variants carry samples already produced by the drag sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverlayEvent {
    DragStart,
    DragMove(DragSample),
    DragEnd(DragSample),
    /// Pointer cancelled by the platform (e.g. a system gesture took over).
    DragCancel,
    /// Tap on the trigger.
    Toggle,
    /// Keyboard shortcut toggle (Ctrl/Cmd+K). Same as `Toggle` without a pulse.
    ShortcutToggle,
    OutsideClick,
    Escape,
    /// An item of the panel was chosen; `action` runs once the panel is closed.
    Select { key: String, action: NavAction },
    /// The scroll-to-top control on the trigger or in the panel.
    ScrollToTop,
}

/// Tactile feedback strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HapticPulse {
    Light,
    Medium,
    Heavy,
}

impl HapticPulse {
    /// Vibration pattern in milliseconds (alternating on/off).
    pub fn pattern_ms(self) -> &'static [u32] {
        match self {
            Self::Light => &[10],
            Self::Medium => &[20],
            Self::Heavy => &[10, 50, 10],
        }
    }
}

/// The timers an overlay instance owns. Each kind has at most one pending
/// firing at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Delayed `Closing -> Closed` (selection commit or delayed close).
    Commit,
    /// Auto-dismiss of the swipe hint after mount.
    HintDismiss,
    /// Hides the hint again after it reappeared on close.
    HintReappear,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [Self::Commit, Self::HintDismiss, Self::HintReappear];
}

/// Identifies one scheduled firing. A firing whose generation is no longer
/// current is stale and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerTicket {
    pub kind: TimerKind,
    pub generation: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_visibility() {
        assert!(!OverlayState::Closed.is_panel_visible());
        assert!(!OverlayState::Dragging.is_panel_visible());
        assert!(OverlayState::Open.is_panel_visible());
        assert!(OverlayState::Closing.is_panel_visible());
    }

    #[test]
    fn heavy_pulse_is_a_pattern() {
        assert_eq!(HapticPulse::Light.pattern_ms(), &[10]);
        assert_eq!(HapticPulse::Heavy.pattern_ms(), &[10, 50, 10]);
    }

    #[test]
    fn event_json_shape() {
        let json = serde_json::to_string(&OverlayEvent::Toggle).unwrap();
        assert_eq!(json, "\"Toggle\"");
        let back: OverlayEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OverlayEvent::Toggle);
    }
}
