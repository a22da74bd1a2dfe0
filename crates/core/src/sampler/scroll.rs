use folio_protocol::{ScrollFraction, ScrollMetrics};

/// Tracks the page scroll fraction.
///
/// Subscribes only when mounted with a browsing context; without one it
/// stays at zero and ignores input.
#[derive(Debug, Clone, Default)]
pub struct ScrollSampler {
    fraction: ScrollFraction,
    subscribed: bool,
}

impl ScrollSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the current metrics so consumers have a value before the
    /// first scroll event. Returns whether the sampler subscribed.
    pub fn mount(&mut self, metrics: Option<ScrollMetrics>) -> bool {
        match metrics {
            Some(metrics) => {
                self.subscribed = true;
                self.fraction = ScrollFraction::from_metrics(&metrics);
            }
            None => {
                self.subscribed = false;
                self.fraction = ScrollFraction::ZERO;
            }
        }
        self.subscribed
    }

    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> ScrollFraction {
        if self.subscribed {
            self.fraction = ScrollFraction::from_metrics(metrics);
        }
        self.fraction
    }

    pub fn unmount(&mut self) {
        self.subscribed = false;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn fraction(&self) -> ScrollFraction {
        self.fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: top,
            scroll_height: 3000.0,
            client_height: 1000.0,
        }
    }

    #[test]
    fn seeded_on_mount() {
        let mut sampler = ScrollSampler::new();
        assert!(sampler.mount(Some(metrics(1000.0))));
        assert!((sampler.fraction().get() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn no_browsing_context_stays_inert() {
        let mut sampler = ScrollSampler::new();
        assert!(!sampler.mount(None));
        assert_eq!(sampler.on_scroll(&metrics(2000.0)).get(), 0.0);
    }

    #[test]
    fn unmounted_sampler_ignores_scroll() {
        let mut sampler = ScrollSampler::new();
        sampler.mount(Some(metrics(0.0)));
        sampler.unmount();
        assert_eq!(sampler.on_scroll(&metrics(2000.0)).get(), 0.0);
    }
}
