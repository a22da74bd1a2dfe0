use serde::{Deserialize, Serialize};

use crate::nav::NavAction;
use crate::overlay::{HapticPulse, OverlayState, TimerKind, TimerTicket};

/// A single side effect requested by the overlay controller.
///
/// The core never touches the platform. Each call returns a `Vec<Effect>`
/// that the host executes in order; every effect carries all the data it
/// needs. Platform failures while executing an effect are swallowed by the
/// host and never fed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Observable state transition, emitted after the state changed.
    StateChanged { from: OverlayState, to: OverlayState },

    /// Best-effort tactile pulse.
    Haptic(HapticPulse),

    /// Arm a timer. Replaces any pending timer of the same kind; the host
    /// reports the firing back with the same ticket.
    ScheduleTimer { ticket: TimerTicket, delay_ms: u32 },

    /// Disarm the pending timer of this kind, if any.
    CancelTimer(TimerKind),

    /// Attach (`true`) or detach (`false`) the outside-click and escape
    /// listeners. Only attached while the panel is open.
    ListenOutside(bool),

    /// Run a selection's navigation. Only emitted once the overlay is closed.
    Navigate(NavAction),

    /// Scroll the page back to the top (smooth when available).
    ScrollToTop,

    /// Show or hide the swipe hint affordance.
    Hint(bool),
}
