//! Text measurement and rasterization.
//!
//! The frame driver only needs two capabilities from a font backend: the extents of a string and
//! a way to paint positioned strings into the text layer. [`ParleyRasterizer`] provides both on
//! top of `parley` shaping and `vello_cpu` rasterization.

use crate::foundation::error::DanmakuResult;
use crate::render::surface::Surface;

/// `parley` + `vello_cpu` backed rasterizer.
pub mod engine;

pub use engine::ParleyRasterizer;

/// Rendered size of a string at the configured font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

/// One string to paint, with its baseline origin and opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextItem<'a> {
    pub text: &'a str,
    pub x: f64,
    pub baseline_y: f64,
    pub opacity: f64,
}

pub trait TextRasterizer {
    /// Extents of `text` as it would be painted.
    ///
    /// `height` is the line-box height (ascent + descent + leading), not the ink bounds of the
    /// glyphs, so every row of a given font advances by the same amount whatever its characters.
    fn measure(&mut self, text: &str) -> DanmakuResult<TextExtents>;

    /// Paint `items` in white over `layer`, each scaled by its opacity.
    fn paint(&mut self, layer: &mut Surface, items: &[TextItem<'_>]) -> DanmakuResult<()>;
}

impl<R: TextRasterizer + ?Sized> TextRasterizer for Box<R> {
    fn measure(&mut self, text: &str) -> DanmakuResult<TextExtents> {
        (**self).measure(text)
    }

    fn paint(&mut self, layer: &mut Surface, items: &[TextItem<'_>]) -> DanmakuResult<()> {
        (**self).paint(layer, items)
    }
}
