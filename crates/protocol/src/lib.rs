pub mod contact;
pub mod effects;
pub mod nav;
pub mod overlay;
pub mod types;
pub mod visuals;

pub use contact::{ContactFailure, ContactRequest, ContactSuccess};
pub use effects::Effect;
pub use nav::{Locale, MenuItem, NavAction, NavItem, Region};
pub use overlay::{HapticPulse, OverlayEvent, OverlayState, TimerKind, TimerTicket};
pub use types::{DragSample, Point, ScrollFraction, ScrollMetrics, TiltSample};
pub use visuals::{HandleLabel, OverlayVisuals, TriggerIcon};
