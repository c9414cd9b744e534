use crate::effects::composite::{PremulArgb32, over, pack_argb};
use crate::foundation::error::{DanmakuError, DanmakuResult};

/// Row-major premultiplied ARGB32 pixel buffer.
///
/// `stride` is measured in pixels (32-bit units) and is never smaller than `width`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<PremulArgb32>,
}

impl Surface {
    /// Allocate a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stride: width,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn data(&self) -> &[PremulArgb32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [PremulArgb32] {
        &mut self.data
    }

    pub fn row(&self, y: u32) -> &[PremulArgb32] {
        let start = (y as usize) * (self.stride as usize);
        &self.data[start..start + self.stride as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [PremulArgb32] {
        let start = (y as usize) * (self.stride as usize);
        let end = start + self.stride as usize;
        &mut self.data[start..end]
    }

    pub fn pixel(&self, x: u32, y: u32) -> PremulArgb32 {
        self.row(y)[x as usize]
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Overwrite a rectangle, clipped to the surface bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, px: PremulArgb32) {
        let x0 = x.min(self.width) as usize;
        let x1 = x.saturating_add(w).min(self.width) as usize;
        let y1 = y.saturating_add(h).min(self.height);
        for row in y.min(self.height)..y1 {
            self.row_mut(row)[x0..x1].fill(px);
        }
    }

    /// Composite tightly packed premultiplied RGBA8 bytes over this surface.
    pub fn composite_rgba8_premul(&mut self, bytes: &[u8]) -> DanmakuResult<()> {
        let width = self.width as usize;
        let expected = width
            .saturating_mul(self.height as usize)
            .saturating_mul(4);
        if bytes.len() != expected {
            return Err(DanmakuError::render(
                "rgba8 buffer does not match surface size",
            ));
        }
        if width == 0 {
            return Ok(());
        }
        for (y, src_row) in bytes.chunks_exact(width * 4).enumerate() {
            let dst_row = self.row_mut(y as u32);
            for (d, px) in dst_row.iter_mut().zip(src_row.chunks_exact(4)) {
                *d = over(*d, pack_argb(px[3], px[0], px[1], px[2]));
            }
        }
        Ok(())
    }

    /// Convert to tightly packed straight-alpha RGBA8, as image encoders expect.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        argb32_to_rgba8_straight(&self.data, self.stride, self.width, self.height)
    }
}

/// Convert a strided premultiplied ARGB32 bitmap into tightly packed straight-alpha RGBA8.
pub fn argb32_to_rgba8_straight(bitmap: &[u32], stride: u32, width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for y in 0..height as usize {
        let start = y * stride as usize;
        for &px in &bitmap[start..start + width as usize] {
            let a = (px >> 24) as u8;
            if a == 0 {
                out.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            let unpremul = |c: u32| -> u8 {
                let c = (c & 0xff) * 255 + u32::from(a) / 2;
                (c / u32::from(a)).min(255) as u8
            };
            out.extend_from_slice(&[unpremul(px >> 16), unpremul(px >> 8), unpremul(px), a]);
        }
    }
    out
}
