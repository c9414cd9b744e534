use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{DanmakuError, DanmakuResult};
use crate::render::surface::Surface;
use crate::text::{TextExtents, TextItem, TextRasterizer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush colour carried through Parley layouts.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Single-font rasterizer: `parley` shapes, `vello_cpu` fills glyphs.
///
/// Layouts are cached per string and pruned to the strings painted in the latest frame.
pub struct ParleyRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    font_size: f32,
    layouts: HashMap<String, Arc<parley::Layout<TextBrushRgba8>>>,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl ParleyRasterizer {
    /// Load face `index` of the font file at `path`.
    ///
    /// A missing or unreadable file yields [`DanmakuError::FontOpen`]; bytes that contain no
    /// usable font yield [`DanmakuError::FontFormat`].
    pub fn from_file(path: &Path, index: u32, font_size: f32) -> DanmakuResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| DanmakuError::FontOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_named_bytes(bytes, index, font_size, path.to_path_buf())
    }

    pub fn from_bytes(bytes: Vec<u8>, index: u32, font_size: f32) -> DanmakuResult<Self> {
        Self::from_named_bytes(bytes, index, font_size, PathBuf::from("<memory>"))
    }

    fn from_named_bytes(
        bytes: Vec<u8>,
        index: u32,
        font_size: f32,
        path: PathBuf,
    ) -> DanmakuResult<Self> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(DanmakuError::validation(
                "font size must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        // Shaping and glyph filling must agree on the face, so `index` has to exist in the file.
        let Some(family_id) = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
            .map(|(id, _)| *id)
        else {
            tracing::debug!(index, faces = families.len(), "font face index not found");
            return Err(DanmakuError::FontFormat { path });
        };
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DanmakuError::FontFormat { path: path.clone() })?
            .to_string();

        tracing::debug!(family = %family_name, path = %path.display(), "font loaded");

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            font_size,
            layouts: HashMap::new(),
            ctx: None,
            pixmap: None,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout_for(&mut self, text: &str) -> Arc<parley::Layout<TextBrushRgba8>> {
        if let Some(layout) = self.layouts.get(text) {
            return layout.clone();
        }

        let family_name = self.family_name.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.font_size));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::WHITE));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let layout = Arc::new(layout);
        self.layouts.insert(text.to_string(), layout.clone());
        layout
    }
}

impl TextRasterizer for ParleyRasterizer {
    fn measure(&mut self, text: &str) -> DanmakuResult<TextExtents> {
        let layout = self.layout_for(text);
        Ok(TextExtents {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
        })
    }

    fn paint(&mut self, layer: &mut Surface, items: &[TextItem<'_>]) -> DanmakuResult<()> {
        if layer.width() == 0 || layer.height() == 0 {
            return Ok(());
        }
        let w: u16 = layer
            .width()
            .try_into()
            .map_err(|_| DanmakuError::render("text layer width exceeds u16"))?;
        let h: u16 = layer
            .height()
            .try_into()
            .map_err(|_| DanmakuError::render("text layer height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        for item in items {
            let opacity = item.opacity.clamp(0.0, 1.0) as f32;
            if opacity <= 0.0 {
                continue;
            }
            let layout = self.layout_for(item.text);
            let ascent = layout
                .lines()
                .next()
                .map(|line| f64::from(line.metrics().baseline))
                .unwrap_or(0.0);

            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                item.x,
                item.baseline_y - ascent,
            )));
            if opacity < 1.0 {
                ctx.push_opacity_layer(opacity);
            }
            for line in layout.lines() {
                for run_item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = run_item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            if opacity < 1.0 {
                ctx.pop_layer();
            }
        }
        ctx.flush();

        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        pixmap.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut pixmap);
        let result = layer.composite_rgba8_premul(pixmap.data_as_u8_slice());

        self.ctx = Some(ctx);
        self.pixmap = Some(pixmap);

        let live: HashSet<&str> = items.iter().map(|i| i.text).collect();
        self.layouts.retain(|text, _| live.contains(text.as_str()));

        result
    }
}
