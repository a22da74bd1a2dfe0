//! Pure mapping from overlay state to presentation properties.

use folio_protocol::{HandleLabel, OverlayState, OverlayVisuals, Point, TiltSample, TriggerIcon};

use crate::overlay::OverlayConfig;
use crate::sampler::parallax_offset;

const SCALE_OPEN: f64 = 0.85;
const BLUR_OPEN_PX: f64 = 15.0;
const HANDLE_OPACITY_CLOSED: f64 = 0.3;

/// Everything [`bind`] reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub state: OverlayState,
    /// Clamped live drag offset; ignored unless `Dragging`.
    pub offset_y: f64,
    pub config: &'a OverlayConfig,
    pub tilt: TiltSample,
    pub hint_visible: bool,
    pub item_count: usize,
}

/// `value` mapped from `[from, 0]` onto `[at_from, at_zero]`, clamped.
fn lerp_from_travel(value: f64, from: f64, at_from: f64, at_zero: f64) -> f64 {
    if from.is_nan() || from >= 0.0 || !value.is_finite() {
        return at_zero;
    }
    let t = (value / from).clamp(0.0, 1.0);
    at_zero + (at_from - at_zero) * t
}

pub fn bind(input: &RenderInput<'_>) -> OverlayVisuals {
    let travel = input.config.full_travel();
    let panel_visible = input.state.is_panel_visible();
    let dragging = input.state == OverlayState::Dragging;

    let handle_offset_y = if dragging { input.offset_y } else { 0.0 };
    let effective = if panel_visible { travel } else { handle_offset_y };

    let handle_label = if dragging && handle_offset_y < input.config.open_offset_px {
        HandleLabel::ReleaseToOpen
    } else {
        HandleLabel::SwipeUp
    };

    let item_offsets = if panel_visible {
        (0..input.item_count)
            .map(|i| parallax_offset(&input.tilt, i))
            .collect()
    } else {
        vec![Point::ZERO; input.item_count]
    };

    OverlayVisuals {
        state: input.state,
        handle_offset_y,
        handle_opacity: lerp_from_travel(effective, travel, 1.0, HANDLE_OPACITY_CLOSED),
        panel_visible,
        content_scale: lerp_from_travel(effective, travel, SCALE_OPEN, 1.0),
        content_blur_px: lerp_from_travel(effective, travel, BLUR_OPEN_PX, 0.0),
        trigger_icon: if panel_visible {
            TriggerIcon::Close
        } else {
            TriggerIcon::Chevron
        },
        handle_label,
        hint_visible: input.hint_visible,
        item_offsets,
    }
}
