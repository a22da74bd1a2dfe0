//! Input samplers: turn raw platform readings into the sample types the
//! overlay consumes. Samplers hold nothing but their latest reading.

pub mod drag;
pub mod scroll;
pub mod tilt;
mod velocity;

pub use drag::{DragRange, DragSampler};
pub use scroll::ScrollSampler;
pub use tilt::{PermissionOutcome, PermissionState, TiltSampler, parallax_offset};
pub use velocity::VelocityTracker;
