use std::time::Duration;

use super::*;
use crate::effects::composite::pack_argb;
use crate::source::{Message, QueueSource};
use crate::text::TextExtents;

/// Paints each item as a solid white block, 8 px per character and 10 px tall above the baseline.
#[derive(Default)]
struct Blocks {
    painted: usize,
}

impl TextRasterizer for Blocks {
    fn measure(&mut self, text: &str) -> DanmakuResult<TextExtents> {
        Ok(TextExtents {
            width: 8.0 * text.chars().count() as f64,
            height: 10.0,
        })
    }

    fn paint(&mut self, layer: &mut Surface, items: &[TextItem<'_>]) -> DanmakuResult<()> {
        self.painted += items.len();
        for item in items {
            let a = (item.opacity * 255.0).round() as u8;
            let x = item.x.max(0.0) as u32;
            let y = (item.baseline_y - 10.0).max(0.0) as u32;
            let w = 8 * item.text.chars().count() as u32;
            layer.fill_rect(x, y, w, 10, pack_argb(a, a, a, a));
        }
        Ok(())
    }
}

fn renderer() -> Renderer<Blocks> {
    Renderer::new(OverlayConfig::default(), Blocks::default(), RendererOpts::default()).unwrap()
}

#[test]
fn layers_are_allocated_lazily_at_the_requested_size() {
    let mut r = renderer();
    assert_eq!(r.layer_size(), None);
    let mut q = QueueSource::new();
    r.paint_frame_at(320, 240, Instant::now(), &mut q, |_, stride| {
        assert_eq!(stride, 320);
        Ok(())
    })
    .unwrap();
    assert_eq!(r.layer_size(), Some((320, 240)));
}

#[test]
fn resize_replaces_all_three_layers() {
    let t0 = Instant::now();
    let mut r = renderer();
    let mut q = QueueSource::new();
    q.push(Message::new(t0, "hello")).unwrap();
    r.paint_frame_at(800, 600, t0 + Duration::from_secs(1), &mut q, |_, _| Ok(()))
        .unwrap();
    {
        let layers = r.layers.as_ref().unwrap();
        assert!(layers.text.data().iter().any(|&p| p != 0));
        assert!(layers.blur.data().iter().any(|&p| p != 0));
    }

    q.finish();
    r.paint_frame_at(1024, 768, t0 + Duration::from_secs(60), &mut q, |frame, stride| {
        assert_eq!(stride, 1024);
        assert_eq!(frame.len(), 1024 * 768);
        assert!(frame.iter().all(|&p| p == 0));
        Ok(())
    })
    .unwrap();

    let layers = r.layers.as_ref().unwrap();
    for s in [&layers.text, &layers.blur, &layers.blend] {
        assert_eq!((s.width(), s.height(), s.stride()), (1024, 768, 1024));
        assert!(s.data().iter().all(|&p| p == 0));
    }
}

#[test]
fn empty_frames_skip_the_rasterizer() {
    let mut r = renderer();
    let mut q = QueueSource::new();
    r.paint_frame_at(64, 64, Instant::now(), &mut q, |_, _| Ok(()))
        .unwrap();
    assert_eq!(r.rasterizer().painted, 0);
}

#[test]
fn shadow_radius_changes_are_validated() {
    let mut r = renderer();
    assert!(r.set_shadow_radius(-1.0).is_err());
    assert_eq!(r.config().shadow_radius, 3.0);
    r.set_shadow_radius(6.0).unwrap();
    assert_eq!(r.config().shadow_radius, 6.0);
    assert_eq!(r.shadow.radius(), 6.0);
}

#[test]
fn callback_errors_propagate() {
    let mut r = renderer();
    let mut q = QueueSource::new();
    let err = r
        .paint_frame_at(16, 16, Instant::now(), &mut q, |_, _| {
            Err(crate::foundation::error::DanmakuError::render("sink closed"))
        })
        .unwrap_err();
    assert!(err.to_string().contains("sink closed"));
}
