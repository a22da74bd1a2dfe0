//! Cancellable scheduled actions.
//!
//! Every timer an overlay owns goes through a [`TimerSlot`]. The slot never
//! runs anything itself: it hands out [`Effect::ScheduleTimer`] requests to
//! the host and later validates the firing the host reports back. Arming a
//! slot that is already armed supersedes the previous firing, so a slot has
//! at most one live ticket at any instant.

use folio_protocol::{Effect, TimerKind, TimerTicket};

#[derive(Debug, Clone)]
pub struct TimerSlot {
    kind: TimerKind,
    generation: u64,
    armed: bool,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            generation: 0,
            armed: false,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn is_pending(&self) -> bool {
        self.armed
    }

    /// The ticket a firing must carry to be accepted, if armed.
    pub fn ticket(&self) -> Option<TimerTicket> {
        self.armed.then_some(TimerTicket {
            kind: self.kind,
            generation: self.generation,
        })
    }

    /// Arm the slot, cancelling any pending firing first.
    pub fn schedule(&mut self, delay_ms: u32, out: &mut Vec<Effect>) -> TimerTicket {
        self.cancel(out);
        self.generation += 1;
        self.armed = true;
        let ticket = TimerTicket {
            kind: self.kind,
            generation: self.generation,
        };
        out.push(Effect::ScheduleTimer { ticket, delay_ms });
        ticket
    }

    /// Disarm the slot. No-op when nothing is pending.
    pub fn cancel(&mut self, out: &mut Vec<Effect>) {
        if self.armed {
            self.armed = false;
            self.generation += 1;
            out.push(Effect::CancelTimer(self.kind));
        }
    }

    /// Consume a reported firing. Returns `false` for stale or foreign
    /// tickets, which callers must ignore.
    pub fn accept(&mut self, ticket: TimerTicket) -> bool {
        if ticket.kind != self.kind || !self.armed || ticket.generation != self.generation {
            log::debug!(
                "ignoring stale {:?} timer (generation {}, current {}, armed {})",
                ticket.kind,
                ticket.generation,
                self.generation,
                self.armed
            );
            return false;
        }
        self.armed = false;
        true
    }
}
