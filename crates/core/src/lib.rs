//! Platform-independent core of the folio site: the gesture-driven overlay
//! controller, its input samplers and render binding, navigation rules, and
//! the contact form domain shared by the page and the relay service.

pub mod capability;
pub mod contact;
pub mod haptics;
pub mod nav;
pub mod overlay;
pub mod render;
pub mod sampler;
pub mod timer;
