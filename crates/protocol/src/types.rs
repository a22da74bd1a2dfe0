use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One reading from an active vertical drag gesture.
///
/// `offset_y` is relative to where the gesture started (negative = upwards)
/// and already clamped to the sampler's range. `velocity_y` is in px/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSample {
    pub offset_y: f64,
    pub velocity_y: f64,
    pub timestamp_ms: f64,
}

/// Raw document scroll metrics, as read from the scrolling element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// How far the page is scrolled, always within `[0, 1]`.
///
/// A document that does not scroll (`scroll_height <= client_height`) is at
/// `0`, never `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ScrollFraction(f64);

impl ScrollFraction {
    pub const ZERO: ScrollFraction = ScrollFraction(0.0);

    pub fn from_metrics(metrics: &ScrollMetrics) -> Self {
        let range = metrics.scroll_height - metrics.client_height;
        if !range.is_finite() || range <= 0.0 {
            return Self::ZERO;
        }
        Self::from(metrics.scroll_top / range)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for ScrollFraction {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }
}

impl From<ScrollFraction> for f64 {
    fn from(value: ScrollFraction) -> Self {
        value.0
    }
}

/// Device orientation in degrees.
///
/// Both axes stay `None` until the platform grants access and delivers a
/// first event. Consumers treat `None` as "no tilt".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltSample {
    pub beta_deg: Option<f64>,
    pub gamma_deg: Option<f64>,
}

impl TiltSample {
    pub const UNAVAILABLE: TiltSample = TiltSample {
        beta_deg: None,
        gamma_deg: None,
    };

    pub fn new(beta_deg: f64, gamma_deg: f64) -> Self {
        Self {
            beta_deg: Some(beta_deg),
            gamma_deg: Some(gamma_deg),
        }
    }

    /// Both axes present and finite.
    pub fn axes(&self) -> Option<(f64, f64)> {
        match (self.beta_deg, self.gamma_deg) {
            (Some(beta), Some(gamma)) if beta.is_finite() && gamma.is_finite() => {
                Some((beta, gamma))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(top: f64, height: f64, client: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: top,
            scroll_height: height,
            client_height: client,
        }
    }

    #[test]
    fn scroll_fraction_midway() {
        let f = ScrollFraction::from_metrics(&metrics(500.0, 2000.0, 1000.0));
        assert!((f.get() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn scroll_fraction_degenerate_document_is_zero() {
        let f = ScrollFraction::from_metrics(&metrics(0.0, 800.0, 800.0));
        assert_eq!(f.get(), 0.0);
        let f = ScrollFraction::from_metrics(&metrics(10.0, 600.0, 800.0));
        assert_eq!(f.get(), 0.0);
    }

    #[test]
    fn scroll_fraction_clamps_overscroll() {
        // Elastic overscroll on touch devices reports values past the ends.
        let f = ScrollFraction::from_metrics(&metrics(1200.0, 2000.0, 1000.0));
        assert_eq!(f.get(), 1.0);
        let f = ScrollFraction::from_metrics(&metrics(-40.0, 2000.0, 1000.0));
        assert_eq!(f.get(), 0.0);
    }

    #[test]
    fn scroll_fraction_deserializes_clamped() {
        let f: ScrollFraction = serde_json::from_str("3.5").unwrap();
        assert_eq!(f.get(), 1.0);
    }

    #[test]
    fn tilt_axes_require_both() {
        assert_eq!(TiltSample::UNAVAILABLE.axes(), None);
        let half = TiltSample {
            beta_deg: Some(10.0),
            gamma_deg: None,
        };
        assert_eq!(half.axes(), None);
        assert_eq!(TiltSample::new(10.0, -5.0).axes(), Some((10.0, -5.0)));
    }
}
