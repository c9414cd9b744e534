//! Frame driving and output surfaces.
//!
//! [`Renderer`] runs one frame at a time: intake, animation, text rasterization, and the shadow
//! pass, then hands the composited blend layer to the caller.

pub mod driver;
pub mod report;
pub mod surface;

pub use driver::{Renderer, RendererOpts};
pub use report::{ErrorReporter, StderrReporter};
pub use surface::{Surface, argb32_to_rgba8_straight};
