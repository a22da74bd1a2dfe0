use serde::{Deserialize, Serialize};

use crate::overlay::OverlayState;
use crate::types::Point;

/// Glyph shown on the overlay trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerIcon {
    Chevron,
    Close,
}

/// Copy key for the drag handle. Resolved to text by the page's i18n lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleLabel {
    SwipeUp,
    ReleaseToOpen,
}

impl HandleLabel {
    /// Message key in the `mobileNav` namespace.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::SwipeUp => "swipeUpToAccess",
            Self::ReleaseToOpen => "releaseToOpen",
        }
    }
}

/// Presentation properties derived from the overlay state.
///
/// Contract-level only: renderers decide easing and animation curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayVisuals {
    pub state: OverlayState,
    /// Vertical translation of the drag handle in px.
    pub handle_offset_y: f64,
    pub handle_opacity: f64,
    pub panel_visible: bool,
    /// Scale applied to the page content behind the panel.
    pub content_scale: f64,
    /// Blur radius applied to the page content behind the panel, in px.
    pub content_blur_px: f64,
    pub trigger_icon: TriggerIcon,
    pub handle_label: HandleLabel,
    pub hint_visible: bool,
    /// Per-item parallax offset from device tilt, one entry per menu item.
    pub item_offsets: Vec<Point>,
}
