//! Danmaku is a CPU renderer for scrolling chat-message overlays.
//!
//! Each frame it drains newly arrived messages, animates the visible entries (slide in, park at
//! the left margin, fade out, drift upward as newer messages arrive), rasterizes them as white
//! text and composites a blurred black drop shadow underneath:
//!
//! - Build a [`Renderer`] from an [`OverlayConfig`] and a [`TextRasterizer`]
//! - Feed it from any [`MessageSource`]
//! - Call [`Renderer::paint_frame`] once per display frame and consume the premultiplied ARGB32
//!   buffer handed to the callback
#![forbid(unsafe_code)]

mod foundation;

/// Per-entry motion, easing and intake with vertical reflow.
pub mod animation;
/// Box blur, drop shadow and pixel compositing.
pub mod effects;
/// Frame driver, output surfaces and error reporting.
pub mod render;
/// Message sources.
pub mod source;
/// Text measurement and rasterization.
pub mod text;

pub use crate::foundation::config::OverlayConfig;
pub use crate::foundation::error::{DanmakuError, DanmakuResult};
pub use crate::foundation::fps::FpsCounter;

pub use crate::animation::ease::Ease;
pub use crate::animation::motion::{DanmakuEntry, Phase, Pose, VerticalMotion};
pub use crate::animation::reflow::DanmakuList;
pub use crate::effects::blur::BlurBoxes;
pub use crate::effects::shadow::DropShadow;
pub use crate::render::driver::{Renderer, RendererOpts};
pub use crate::render::report::{ErrorReporter, StderrReporter};
pub use crate::render::surface::{Surface, argb32_to_rgba8_straight};
pub use crate::source::{
    ChannelSource, Message, MessageSource, QueueSource, ScriptSource, channel,
};
pub use crate::text::{ParleyRasterizer, TextExtents, TextItem, TextRasterizer};
