/// Ring buffer size for velocity samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
const HORIZON_MS: f64 = 100.0;

/// A gap this long between two samples means the pointer had stopped.
const ASSUME_STOPPED_MS: f64 = 40.0;

#[derive(Debug, Clone, Copy)]
struct Point1D {
    time_ms: f64,
    position: f64,
}

/// 1D pointer velocity estimate from a least-squares fit over recent samples.
///
/// ```ignore
/// let mut tracker = VelocityTracker::new();
/// tracker.add(t0, y0);
/// tracker.add(t1, y1);
/// let px_per_s = tracker.velocity();
/// ```
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: [Option<Point1D>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    pub fn add(&mut self, time_ms: f64, position: f64) {
        if !time_ms.is_finite() || !position.is_finite() {
            return;
        }
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Point1D { time_ms, position });
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Velocity in units per second; `0.0` with fewer than two usable samples.
    pub fn velocity(&self) -> f64 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut times = [0.0f64; HISTORY_SIZE];
        let mut positions = [0.0f64; HISTORY_SIZE];
        let mut count = 0;
        let mut previous = newest;
        let mut cursor = self.index;

        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[cursor] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            let gap = previous.time_ms - sample.time_ms;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS || gap < 0.0 {
                break;
            }
            times[count] = -age;
            positions[count] = sample.position;
            count += 1;
            previous = sample;
            cursor = if cursor == 0 {
                HISTORY_SIZE - 1
            } else {
                cursor - 1
            };
        }

        if count < 2 {
            return 0.0;
        }

        let n = count as f64;
        let mean_t = times[..count].iter().sum::<f64>() / n;
        let mean_p = positions[..count].iter().sum::<f64>() / n;
        let mut num = 0.0;
        let mut den = 0.0;
        for (t, p) in times[..count].iter().zip(&positions[..count]) {
            let dt = t - mean_t;
            num += dt * (p - mean_p);
            den += dt * dt;
        }
        if den <= f64::EPSILON {
            return 0.0;
        }
        num / den * 1000.0
    }
}
