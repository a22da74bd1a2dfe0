use folio_protocol::{
    DragSample, Effect, HapticPulse, NavAction, OverlayEvent, OverlayState, TimerKind, TimerTicket,
};

use super::config::{OverlayConfig, ScrollTopMode};
use crate::timer::TimerSlot;

/// What runs once a pending close has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AfterClose {
    Navigate(NavAction),
    ScrollToTop,
}

/// The single authority for one overlay's [`OverlayState`].
///
/// Pure: every input returns the effects the host must perform. The machine
/// owns exactly one commit timer slot, so at most one close can be pending.
#[derive(Debug, Clone)]
pub struct OverlayMachine {
    config: OverlayConfig,
    state: OverlayState,
    /// Live drag offset while `Dragging`, else `0`.
    offset_y: f64,
    commit: TimerSlot,
    after_close: Option<AfterClose>,
    mounted: bool,
}

impl OverlayMachine {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            state: OverlayState::Closed,
            offset_y: 0.0,
            commit: TimerSlot::new(TimerKind::Commit),
            after_close: None,
            mounted: true,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn has_pending_commit(&self) -> bool {
        self.commit.is_pending()
    }

    pub fn handle(&mut self, event: OverlayEvent) -> Vec<Effect> {
        let mut out = Vec::new();
        if !self.mounted {
            return out;
        }
        use OverlayEvent as E;
        use OverlayState as S;

        match (self.state, event) {
            (S::Closed, E::DragStart) if self.config.drag.is_some() => {
                out.push(Effect::Haptic(HapticPulse::Light));
                self.offset_y = 0.0;
                self.transition(S::Dragging, &mut out);
            }
            (S::Dragging, E::DragMove(sample)) => {
                self.offset_y = self.clamp_offset(sample.offset_y);
            }
            (S::Dragging, E::DragEnd(sample)) => {
                let commits = self.commits_open(&sample);
                self.offset_y = 0.0;
                if commits {
                    out.push(Effect::Haptic(self.config.open_pulse));
                    self.transition(S::Open, &mut out);
                } else {
                    self.transition(S::Closed, &mut out);
                }
            }
            (S::Dragging, E::DragCancel | E::Escape) => {
                self.offset_y = 0.0;
                self.transition(S::Closed, &mut out);
            }

            (S::Closed, E::Toggle) => {
                out.push(Effect::Haptic(HapticPulse::Medium));
                self.transition(S::Open, &mut out);
            }
            (S::Closed, E::ShortcutToggle) => self.transition(S::Open, &mut out),
            (S::Closed, E::ScrollToTop) => {
                out.push(Effect::Haptic(HapticPulse::Medium));
                out.push(Effect::ScrollToTop);
            }

            (S::Open, E::Toggle | E::OutsideClick) => {
                out.push(Effect::Haptic(HapticPulse::Medium));
                self.begin_close(None, self.config.close_delay_ms, &mut out);
            }
            (S::Open, E::ShortcutToggle | E::Escape) => {
                self.begin_close(None, self.config.close_delay_ms, &mut out);
            }
            (S::Open, E::Select { action, .. }) => {
                out.push(Effect::Haptic(HapticPulse::Light));
                self.begin_close(
                    Some(AfterClose::Navigate(action)),
                    self.config.select_commit_ms,
                    &mut out,
                );
            }
            (S::Open, E::ScrollToTop) => match self.config.scroll_top {
                ScrollTopMode::CloseOnly => {
                    self.begin_close(None, self.config.close_delay_ms, &mut out);
                }
                ScrollTopMode::CloseThenScroll { delay_ms } => {
                    out.push(Effect::Haptic(HapticPulse::Medium));
                    self.begin_close(Some(AfterClose::ScrollToTop), delay_ms, &mut out);
                }
            },

            // Reopen before the close committed.
            (S::Closing, E::Toggle | E::ShortcutToggle) => {
                self.commit.cancel(&mut out);
                self.after_close = None;
                self.transition(S::Open, &mut out);
            }
            // A newer selection supersedes the pending one.
            (S::Closing, E::Select { action, .. }) => {
                out.push(Effect::Haptic(HapticPulse::Light));
                self.after_close = Some(AfterClose::Navigate(action));
                self.commit.schedule(self.config.select_commit_ms, &mut out);
            }

            (state, event) => {
                log::trace!("overlay ignores {event:?} while {state:?}");
            }
        }
        out
    }

    /// Report a timer firing. Stale tickets and firings that no longer match
    /// the state are no-ops.
    pub fn on_timer(&mut self, ticket: TimerTicket) -> Vec<Effect> {
        let mut out = Vec::new();
        if !self.mounted || ticket.kind != TimerKind::Commit || !self.commit.accept(ticket) {
            return out;
        }
        if self.state != OverlayState::Closing {
            log::debug!("commit timer fired while {:?}; ignoring", self.state);
            self.after_close = None;
            return out;
        }
        self.finish_close(&mut out);
        out
    }

    /// Return to `Closed` without running any pending selection. Used when
    /// the page that owns the overlay is navigated away from.
    pub fn reset(&mut self) -> Vec<Effect> {
        let mut out = Vec::new();
        if !self.mounted {
            return out;
        }
        self.commit.cancel(&mut out);
        self.after_close = None;
        self.offset_y = 0.0;
        self.transition(OverlayState::Closed, &mut out);
        out
    }

    /// Cancel everything and stop reacting. Later calls return no effects.
    pub fn unmount(&mut self) -> Vec<Effect> {
        let out = self.reset();
        self.mounted = false;
        out
    }

    fn commits_open(&self, sample: &DragSample) -> bool {
        let offset = self.clamp_offset(sample.offset_y);
        offset < self.config.open_offset_px || sample.velocity_y < self.config.open_velocity_px_s
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        match self.config.drag {
            Some(range) => range.clamp(offset),
            None => 0.0,
        }
    }

    fn begin_close(&mut self, after: Option<AfterClose>, delay_ms: u32, out: &mut Vec<Effect>) {
        self.after_close = after;
        self.transition(OverlayState::Closing, out);
        if delay_ms == 0 {
            self.commit.cancel(out);
            self.finish_close(out);
        } else {
            self.commit.schedule(delay_ms, out);
        }
    }

    fn finish_close(&mut self, out: &mut Vec<Effect>) {
        self.transition(OverlayState::Closed, out);
        match self.after_close.take() {
            Some(AfterClose::Navigate(action)) => out.push(Effect::Navigate(action)),
            Some(AfterClose::ScrollToTop) => out.push(Effect::ScrollToTop),
            None => {}
        }
    }

    fn transition(&mut self, to: OverlayState, out: &mut Vec<Effect>) {
        let from = self.state;
        if from == to {
            return;
        }
        if from == OverlayState::Open {
            out.push(Effect::ListenOutside(false));
        }
        self.state = to;
        log::trace!("overlay {from:?} -> {to:?}");
        out.push(Effect::StateChanged { from, to });
        if to == OverlayState::Open {
            out.push(Effect::ListenOutside(true));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(offset_y: f64, velocity_y: f64) -> DragSample {
        DragSample {
            offset_y,
            velocity_y,
            timestamp_ms: 0.0,
        }
    }

    fn drag(machine: &mut OverlayMachine, offset_y: f64, velocity_y: f64) -> Vec<Effect> {
        machine.handle(OverlayEvent::DragStart);
        machine.handle(OverlayEvent::DragMove(sample(offset_y, 0.0)));
        machine.handle(OverlayEvent::DragEnd(sample(offset_y, velocity_y)))
    }

    fn scheduled(effects: &[Effect]) -> Option<TimerTicket> {
        effects.iter().rev().find_map(|e| match e {
            Effect::ScheduleTimer { ticket, .. } => Some(*ticket),
            _ => None,
        })
    }

    fn select(key: &str) -> OverlayEvent {
        OverlayEvent::Select {
            key: key.into(),
            action: NavAction::Anchor { id: key.into() },
        }
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        let effects = drag(&mut m, -30.0, -100.0);
        assert_eq!(m.state(), OverlayState::Closed);
        assert!(effects.contains(&Effect::StateChanged {
            from: OverlayState::Dragging,
            to: OverlayState::Closed
        }));
        assert_eq!(m.offset_y(), 0.0);
    }

    #[test]
    fn long_drag_opens() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        let effects = drag(&mut m, -60.0, 0.0);
        assert_eq!(m.state(), OverlayState::Open);
        assert!(effects.contains(&Effect::Haptic(HapticPulse::Medium)));
        assert!(effects.contains(&Effect::ListenOutside(true)));
    }

    #[test]
    fn fast_flick_opens() {
        let mut m = OverlayMachine::new(OverlayConfig::glass_stack());
        let effects = drag(&mut m, -20.0, -900.0);
        assert_eq!(m.state(), OverlayState::Open);
        assert!(effects.contains(&Effect::Haptic(HapticPulse::Heavy)));
    }

    #[test]
    fn thresholds_are_exclusive() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        drag(&mut m, -50.0, -500.0);
        assert_eq!(m.state(), OverlayState::Closed);
    }

    #[test]
    fn drag_offset_is_clamped() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        m.handle(OverlayEvent::DragStart);
        m.handle(OverlayEvent::DragMove(sample(-900.0, 0.0)));
        assert_eq!(m.offset_y(), -200.0);
    }

    #[test]
    fn palette_has_no_drag() {
        let mut m = OverlayMachine::new(OverlayConfig::command_palette());
        assert!(m.handle(OverlayEvent::DragStart).is_empty());
        assert_eq!(m.state(), OverlayState::Closed);
    }

    #[test]
    fn toggle_inverts() {
        let mut m = OverlayMachine::new(OverlayConfig::command_palette());
        m.handle(OverlayEvent::Toggle);
        assert_eq!(m.state(), OverlayState::Open);
        let effects = m.handle(OverlayEvent::Toggle);
        assert_eq!(m.state(), OverlayState::Closed);
        assert_eq!(
            effects,
            vec![
                Effect::Haptic(HapticPulse::Medium),
                Effect::ListenOutside(false),
                Effect::StateChanged {
                    from: OverlayState::Open,
                    to: OverlayState::Closing
                },
                Effect::StateChanged {
                    from: OverlayState::Closing,
                    to: OverlayState::Closed
                },
            ]
        );
    }

    #[test]
    fn outside_click_when_closed_is_noop() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        assert!(m.handle(OverlayEvent::OutsideClick).is_empty());
        assert!(m.handle(OverlayEvent::Escape).is_empty());
        assert_eq!(m.state(), OverlayState::Closed);
    }

    #[test]
    fn outside_click_when_open_closes() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        m.handle(OverlayEvent::Toggle);
        m.handle(OverlayEvent::OutsideClick);
        assert_eq!(m.state(), OverlayState::Closed);
    }

    #[test]
    fn selection_navigates_after_close() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        m.handle(OverlayEvent::Toggle);
        let effects = m.handle(select("projects"));
        assert_eq!(m.state(), OverlayState::Closing);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Navigate(_))));
        assert!(effects.contains(&Effect::ListenOutside(false)));

        let ticket = scheduled(&effects).unwrap();
        let effects = m.on_timer(ticket);
        assert_eq!(
            effects,
            vec![
                Effect::StateChanged {
                    from: OverlayState::Closing,
                    to: OverlayState::Closed
                },
                Effect::Navigate(NavAction::Anchor {
                    id: "projects".into()
                }),
            ]
        );
    }

    #[test]
    fn reselect_replaces_pending_selection() {
        let mut m = OverlayMachine::new(OverlayConfig::glass_stack());
        m.handle(OverlayEvent::Toggle);
        let first = scheduled(&m.handle(select("about"))).unwrap();
        let effects = m.handle(select("contact"));
        assert!(effects.contains(&Effect::CancelTimer(TimerKind::Commit)));
        let second = scheduled(&effects).unwrap();

        assert!(m.on_timer(first).is_empty());
        let effects = m.on_timer(second);
        assert!(effects.contains(&Effect::Navigate(NavAction::Anchor {
            id: "contact".into()
        })));
    }

    #[test]
    fn reopen_while_closing_cancels_commit() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        m.handle(OverlayEvent::Toggle);
        let ticket = scheduled(&m.handle(select("log"))).unwrap();
        let effects = m.handle(OverlayEvent::Toggle);
        assert!(effects.contains(&Effect::CancelTimer(TimerKind::Commit)));
        assert_eq!(m.state(), OverlayState::Open);
        assert!(m.on_timer(ticket).is_empty());
        assert_eq!(m.state(), OverlayState::Open);
    }

    #[test]
    fn scroll_to_top_modes() {
        let mut pill = OverlayMachine::new(OverlayConfig::progress_pill());
        assert!(
            pill.handle(OverlayEvent::ScrollToTop)
                .contains(&Effect::ScrollToTop)
        );
        pill.handle(OverlayEvent::Toggle);
        let effects = pill.handle(OverlayEvent::ScrollToTop);
        assert_eq!(pill.state(), OverlayState::Closed);
        assert!(!effects.contains(&Effect::ScrollToTop));

        let mut stack = OverlayMachine::new(OverlayConfig::glass_stack());
        stack.handle(OverlayEvent::Toggle);
        let ticket = scheduled(&stack.handle(OverlayEvent::ScrollToTop)).unwrap();
        assert!(stack.on_timer(ticket).contains(&Effect::ScrollToTop));
    }

    #[test]
    fn unmount_stops_everything() {
        let mut m = OverlayMachine::new(OverlayConfig::progress_pill());
        m.handle(OverlayEvent::Toggle);
        let ticket = scheduled(&m.handle(select("stack"))).unwrap();
        let effects = m.unmount();
        assert!(effects.contains(&Effect::CancelTimer(TimerKind::Commit)));
        assert_eq!(m.state(), OverlayState::Closed);

        assert!(m.on_timer(ticket).is_empty());
        assert!(m.handle(OverlayEvent::Toggle).is_empty());
        assert_eq!(m.state(), OverlayState::Closed);
    }

    #[test]
    fn unmount_while_dragging() {
        let mut m = OverlayMachine::new(OverlayConfig::glass_stack());
        m.handle(OverlayEvent::DragStart);
        m.handle(OverlayEvent::DragMove(sample(-120.0, 0.0)));
        m.unmount();
        assert!(
            m.handle(OverlayEvent::DragEnd(sample(-200.0, -900.0)))
                .is_empty()
        );
        assert_eq!(m.state(), OverlayState::Closed);
        assert_eq!(m.offset_y(), 0.0);
    }

    #[test]
    fn delayed_plain_close() {
        let config = OverlayConfig {
            close_delay_ms: 300,
            ..OverlayConfig::progress_pill()
        };
        let mut m = OverlayMachine::new(config);
        m.handle(OverlayEvent::Toggle);
        let effects = m.handle(OverlayEvent::Escape);
        assert_eq!(m.state(), OverlayState::Closing);
        let ticket = scheduled(&effects).unwrap();
        m.on_timer(ticket);
        assert_eq!(m.state(), OverlayState::Closed);
    }
}
