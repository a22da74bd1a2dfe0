use folio_protocol::{Effect, OverlayState, TimerKind, TimerTicket};

use super::config::HintTiming;
use crate::timer::TimerSlot;

/// The "swipe up" affordance next to a drag handle.
///
/// Shown on mount and dismissed after a timeout, on the first scroll, or
/// when the overlay opens. After every close it comes back briefly to
/// re-teach the gesture.
#[derive(Debug, Clone)]
pub struct HintController {
    timing: HintTiming,
    visible: bool,
    dismiss: TimerSlot,
    reappear: TimerSlot,
}

impl HintController {
    pub fn new(timing: HintTiming) -> Self {
        Self {
            timing,
            visible: false,
            dismiss: TimerSlot::new(TimerKind::HintDismiss),
            reappear: TimerSlot::new(TimerKind::HintReappear),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_reappear_pending(&self) -> bool {
        self.reappear.is_pending()
    }

    pub fn mount(&mut self, out: &mut Vec<Effect>) {
        self.set_visible(true, out);
        self.dismiss.schedule(self.timing.dismiss_ms, out);
    }

    pub fn on_scroll(&mut self, out: &mut Vec<Effect>) {
        self.hide(out);
    }

    pub fn on_transition(&mut self, from: OverlayState, to: OverlayState, out: &mut Vec<Effect>) {
        match to {
            OverlayState::Open => self.hide(out),
            // Snap-back from a drag that never opened is not a close.
            OverlayState::Closed if from.is_panel_visible() => {
                self.dismiss.cancel(out);
                self.set_visible(true, out);
                self.reappear.schedule(self.timing.reappear_ms, out);
            }
            _ => {}
        }
    }

    /// Returns whether the ticket belonged to this controller.
    pub fn on_timer(&mut self, ticket: TimerTicket, out: &mut Vec<Effect>) -> bool {
        let slot = match ticket.kind {
            TimerKind::HintDismiss => &mut self.dismiss,
            TimerKind::HintReappear => &mut self.reappear,
            TimerKind::Commit => return false,
        };
        if slot.accept(ticket) {
            self.set_visible(false, out);
        }
        true
    }

    pub fn unmount(&mut self, out: &mut Vec<Effect>) {
        self.dismiss.cancel(out);
        self.reappear.cancel(out);
        self.visible = false;
    }

    fn hide(&mut self, out: &mut Vec<Effect>) {
        self.dismiss.cancel(out);
        self.reappear.cancel(out);
        self.set_visible(false, out);
    }

    fn set_visible(&mut self, visible: bool, out: &mut Vec<Effect>) {
        if self.visible != visible {
            self.visible = visible;
            out.push(Effect::Hint(visible));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_in(effects: &[Effect], kind: TimerKind) -> TimerTicket {
        effects
            .iter()
            .rev()
            .find_map(|e| match e {
                Effect::ScheduleTimer { ticket, .. } if ticket.kind == kind => Some(*ticket),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn dismissed_after_timeout() {
        let mut hint = HintController::new(HintTiming::default());
        let mut out = Vec::new();
        hint.mount(&mut out);
        assert!(hint.is_visible());
        let ticket = ticket_in(&out, TimerKind::HintDismiss);
        let mut out = Vec::new();
        assert!(hint.on_timer(ticket, &mut out));
        assert_eq!(out, vec![Effect::Hint(false)]);
    }

    #[test]
    fn first_scroll_hides() {
        let mut hint = HintController::new(HintTiming::default());
        let mut out = Vec::new();
        hint.mount(&mut out);
        let ticket = ticket_in(&out, TimerKind::HintDismiss);
        hint.on_scroll(&mut out);
        assert!(!hint.is_visible());
        // The auto-dismiss timer was cancelled with it.
        assert!(hint.on_timer(ticket, &mut Vec::new()));
        assert!(!hint.is_visible());
    }

    #[test]
    fn reappears_after_close() {
        let mut hint = HintController::new(HintTiming::default());
        let mut out = Vec::new();
        hint.mount(&mut out);
        hint.on_transition(OverlayState::Closed, OverlayState::Open, &mut out);
        assert!(!hint.is_visible());

        let mut out = Vec::new();
        hint.on_transition(OverlayState::Closing, OverlayState::Closed, &mut out);
        assert!(hint.is_visible());
        assert!(out.contains(&Effect::ScheduleTimer {
            ticket: ticket_in(&out, TimerKind::HintReappear),
            delay_ms: 2_000
        }));
    }

    #[test]
    fn snap_back_does_not_reappear() {
        let mut hint = HintController::new(HintTiming::default());
        let mut out = Vec::new();
        hint.on_transition(OverlayState::Dragging, OverlayState::Closed, &mut out);
        assert!(out.is_empty());
        assert!(!hint.is_visible());
    }

    #[test]
    fn fast_reopen_cancels_reappearance() {
        let mut hint = HintController::new(HintTiming::default());
        let mut out = Vec::new();
        hint.on_transition(OverlayState::Closing, OverlayState::Closed, &mut out);
        let stale = ticket_in(&out, TimerKind::HintReappear);

        let mut out = Vec::new();
        hint.on_transition(OverlayState::Closed, OverlayState::Open, &mut out);
        assert!(out.contains(&Effect::CancelTimer(TimerKind::HintReappear)));
        assert!(!hint.is_reappear_pending());

        // Close again, then the first reappear timer fires late.
        let mut out = Vec::new();
        hint.on_transition(OverlayState::Open, OverlayState::Closed, &mut out);
        let current = ticket_in(&out, TimerKind::HintReappear);
        let mut out = Vec::new();
        hint.on_timer(stale, &mut out);
        assert!(out.is_empty());
        assert!(hint.is_visible());
        hint.on_timer(current, &mut out);
        assert!(!hint.is_visible());
    }
}
