//! Haptic feedback. Vibration is optional on every platform, so a missing or
//! failing motor never surfaces as an error to the user.

use folio_protocol::HapticPulse;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HapticError {
    #[error("vibration is not supported here")]
    Unsupported,
    #[error("vibration request was refused: {0}")]
    Refused(String),
}

/// Something that can play a vibration pattern.
pub trait HapticSink {
    fn vibrate(&self, pattern_ms: &[u32]) -> Result<(), HapticError>;
}

/// Sink for hosts without a vibration motor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn vibrate(&self, _pattern_ms: &[u32]) -> Result<(), HapticError> {
        Err(HapticError::Unsupported)
    }
}

/// Play `pulse` on `sink`, ignoring failure.
pub fn emit_best_effort(sink: &dyn HapticSink, pulse: HapticPulse) {
    if let Err(err) = sink.vibrate(pulse.pattern_ms()) {
        log::debug!("haptic {pulse:?} dropped: {err}");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Vec<u32>>>);

    impl HapticSink for Recorder {
        fn vibrate(&self, pattern_ms: &[u32]) -> Result<(), HapticError> {
            self.0.borrow_mut().push(pattern_ms.to_vec());
            Ok(())
        }
    }

    #[test]
    fn plays_pulse_pattern() {
        let sink = Recorder::default();
        emit_best_effort(&sink, HapticPulse::Heavy);
        emit_best_effort(&sink, HapticPulse::Light);
        assert_eq!(*sink.0.borrow(), vec![vec![10, 50, 10], vec![10]]);
    }

    #[test]
    fn missing_motor_is_silent() {
        emit_best_effort(&NoHaptics, HapticPulse::Medium);
    }
}
