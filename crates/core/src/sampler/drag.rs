use folio_protocol::DragSample;
use serde::{Deserialize, Serialize};

use super::VelocityTracker;

/// Allowed vertical travel of a drag handle, relative to its resting point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragRange {
    /// Upper bound of travel (negative: upwards).
    pub min: f64,
    /// Lower bound of travel, normally the resting point `0`.
    pub max: f64,
}

impl DragRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0_f64.clamp(self.min, self.max);
        }
        offset.clamp(self.min, self.max)
    }
}

/// Produces [`DragSample`]s for one pointer gesture at a time.
///
/// Offsets are clamped to the configured range; velocity is measured on the
/// raw pointer positions so a flick that hits the range end still reports
/// its release speed.
#[derive(Debug, Clone)]
pub struct DragSampler {
    range: DragRange,
    origin_y: Option<f64>,
    tracker: VelocityTracker,
}

impl DragSampler {
    pub fn new(range: DragRange) -> Self {
        Self {
            range,
            origin_y: None,
            tracker: VelocityTracker::new(),
        }
    }

    pub fn range(&self) -> DragRange {
        self.range
    }

    pub fn is_active(&self) -> bool {
        self.origin_y.is_some()
    }

    /// Start a gesture at `pointer_y`. A gesture already in progress is
    /// discarded.
    pub fn begin(&mut self, pointer_y: f64, timestamp_ms: f64) -> DragSample {
        self.tracker.reset();
        self.origin_y = Some(pointer_y);
        self.tracker.add(timestamp_ms, 0.0);
        DragSample {
            offset_y: 0.0,
            velocity_y: 0.0,
            timestamp_ms,
        }
    }

    /// Sample a pointer move. `None` outside a gesture.
    pub fn update(&mut self, pointer_y: f64, timestamp_ms: f64) -> Option<DragSample> {
        let origin = self.origin_y?;
        let raw = pointer_y - origin;
        self.tracker.add(timestamp_ms, raw);
        Some(DragSample {
            offset_y: self.range.clamp(raw),
            velocity_y: self.tracker.velocity(),
            timestamp_ms,
        })
    }

    /// Final sample carrying the release velocity. Stops the gesture.
    pub fn end(&mut self, pointer_y: f64, timestamp_ms: f64) -> Option<DragSample> {
        let sample = self.update(pointer_y, timestamp_ms);
        self.cancel();
        sample
    }

    /// Drop the gesture without a final sample.
    pub fn cancel(&mut self) {
        self.origin_y = None;
        self.tracker.reset();
    }
}
