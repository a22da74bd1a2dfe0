use folio_protocol::{Point, TiltSample};

/// Where the device-orientation permission stands for the current mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Unrequested,
    Pending,
    Granted,
    Denied,
    Unsupported,
}

/// What the platform answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    Unsupported,
}

/// Device tilt, gated by a one-shot permission request.
#[derive(Debug, Clone, Default)]
pub struct TiltSampler {
    permission: PermissionState,
    sample: TiltSample,
}

impl TiltSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn sample(&self) -> TiltSample {
        self.sample
    }

    /// Returns `true` exactly once per mount: the caller should then ask
    /// the platform and report back through [`TiltSampler::on_permission`].
    pub fn request_permission(&mut self) -> bool {
        if self.permission != PermissionState::Unrequested {
            return false;
        }
        self.permission = PermissionState::Pending;
        true
    }

    pub fn on_permission(&mut self, outcome: PermissionOutcome) {
        self.permission = match outcome {
            PermissionOutcome::Granted => PermissionState::Granted,
            PermissionOutcome::Denied => PermissionState::Denied,
            PermissionOutcome::Unsupported => PermissionState::Unsupported,
        };
        if self.permission != PermissionState::Granted {
            self.sample = TiltSample::UNAVAILABLE;
        }
    }

    /// Record an orientation event. Ignored unless permission was granted.
    pub fn on_orientation(&mut self, beta_deg: Option<f64>, gamma_deg: Option<f64>) -> TiltSample {
        if self.permission == PermissionState::Granted {
            self.sample = TiltSample {
                beta_deg: beta_deg.filter(|v| v.is_finite()),
                gamma_deg: gamma_deg.filter(|v| v.is_finite()),
            };
        }
        self.sample
    }

    /// Forget everything; the next mount may ask again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parallax offset of the `index`-th stacked item. Deeper items move more.
pub fn parallax_offset(tilt: &TiltSample, index: usize) -> Point {
    let Some((beta, gamma)) = tilt.axes() else {
        return Point::ZERO;
    };
    let depth = (index + 1) as f64;
    Point::new(gamma / 90.0 * depth * 5.0, beta / 180.0 * depth * 5.0)
}
