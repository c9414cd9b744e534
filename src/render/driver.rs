use std::time::Instant;

use crate::animation::reflow::DanmakuList;
use crate::effects::composite::from_straight_rgba;
use crate::effects::shadow::DropShadow;
use crate::foundation::config::OverlayConfig;
use crate::foundation::error::DanmakuResult;
use crate::foundation::fps::FpsCounter;
use crate::render::surface::Surface;
use crate::source::MessageSource;
use crate::text::{TextItem, TextRasterizer};

#[derive(Clone, Copy, Debug, Default)]
/// Output options that do not affect animation.
pub struct RendererOpts {
    /// Paint a 2x2 near-invisible grey square at (1,1) on otherwise empty frames.
    ///
    /// Some compositors stop presenting a surface that is entirely transparent.
    pub idle_marker: bool,
}

/// The three per-frame layers. Always allocated and discarded together.
#[derive(Debug)]
struct Layers {
    text: Surface,
    blur: Surface,
    blend: Surface,
}

impl Layers {
    fn new(width: u32, height: u32) -> Self {
        Self {
            text: Surface::new(width, height),
            blur: Surface::new(width, height),
            blend: Surface::new(width, height),
        }
    }
}

/// Frame driver: owns the entry list, the text rasterizer, and the layer buffers.
pub struct Renderer<R: TextRasterizer> {
    config: OverlayConfig,
    opts: RendererOpts,
    rasterizer: R,
    shadow: DropShadow,
    entries: DanmakuList,
    width: u32,
    height: u32,
    layers: Option<Layers>,
    is_eof: bool,
    fps: FpsCounter,
}

impl<R: TextRasterizer> Renderer<R> {
    pub fn new(config: OverlayConfig, rasterizer: R, opts: RendererOpts) -> DanmakuResult<Self> {
        config.validate()?;
        let shadow = DropShadow::new(config.shadow_radius)?;
        Ok(Self {
            config,
            opts,
            rasterizer,
            shadow,
            entries: DanmakuList::new(),
            width: 0,
            height: 0,
            layers: None,
            is_eof: false,
            fps: FpsCounter::new(Instant::now()),
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn entries(&self) -> &DanmakuList {
        &self.entries
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    /// Size of the currently allocated layers, if any.
    pub fn layer_size(&self) -> Option<(u32, u32)> {
        self.layers
            .as_ref()
            .map(|l| (l.blend.width(), l.blend.height()))
    }

    pub fn set_shadow_radius(&mut self, radius: f64) -> DanmakuResult<()> {
        let mut next = self.config.clone();
        next.shadow_radius = radius;
        next.validate()?;
        self.shadow.set_radius(radius)?;
        self.config = next;
        Ok(())
    }

    pub fn paint_frame<S, F>(
        &mut self,
        width: u32,
        height: u32,
        source: &mut S,
        callback: F,
    ) -> DanmakuResult<bool>
    where
        S: MessageSource + ?Sized,
        F: FnOnce(&[u32], u32) -> DanmakuResult<()>,
    {
        self.paint_frame_at(width, height, Instant::now(), source, callback)
    }

    /// Produce one frame at `now` and hand it to `callback` as premultiplied ARGB32 plus stride.
    ///
    /// Returns `true` while the source may still deliver messages or entries remain on screen.
    #[tracing::instrument(level = "trace", skip(self, source, callback))]
    pub fn paint_frame_at<S, F>(
        &mut self,
        width: u32,
        height: u32,
        now: Instant,
        source: &mut S,
        callback: F,
    ) -> DanmakuResult<bool>
    where
        S: MessageSource + ?Sized,
        F: FnOnce(&[u32], u32) -> DanmakuResult<()>,
    {
        if width != self.width || height != self.height {
            if self.layers.is_some() {
                tracing::debug!(
                    from_w = self.width,
                    from_h = self.height,
                    to_w = width,
                    to_h = height,
                    "surface resized; discarding layers"
                );
            }
            self.layers = None;
            self.width = width;
            self.height = height;
        }
        let layers = self
            .layers
            .get_or_insert_with(|| Layers::new(width, height));

        self.fps.tick(now);

        self.is_eof = source.is_eof();
        self.entries.intake(
            source,
            &mut self.rasterizer,
            &self.config,
            f64::from(height),
            now,
        )?;
        self.entries.animate(&self.config, f64::from(width), now);

        if self.entries.is_empty() {
            layers.blend.clear();
            if self.opts.idle_marker {
                layers
                    .blend
                    .fill_rect(1, 1, 2, 2, from_straight_rgba(128, 128, 128, 1));
            }
        } else {
            layers.text.clear();
            let items: Vec<TextItem<'_>> = self
                .entries
                .iter()
                .map(|e| TextItem {
                    text: e.text(),
                    x: e.x(),
                    baseline_y: e.y(),
                    opacity: e.opacity(),
                })
                .collect();
            self.rasterizer.paint(&mut layers.text, &items)?;
            layers.blend.clear();
            self.shadow
                .render(&layers.text, &mut layers.blur, &mut layers.blend)?;
        }

        callback(layers.blend.data(), layers.blend.stride())?;

        Ok(!self.is_eof || !self.entries.is_empty())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
