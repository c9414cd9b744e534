use crate::effects::blur::{BlurBoxes, gauss_blur};
use crate::effects::composite::{PremulArgb32, over_in_place};
use crate::foundation::error::DanmakuResult;
use crate::render::surface::Surface;

/// Maps a blurred coverage value (0..=255) to an opaque-black shadow pixel.
///
/// The curve is a quadratic ease-out, `1 - (1 - v)^2`, placed in the alpha byte. Colour channels
/// stay zero, so every entry is already premultiplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GammaTable([PremulArgb32; 256]);

impl GammaTable {
    pub fn new() -> Self {
        let mut table = [0u32; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            let f = i as f64 / 255.0;
            let eased = 1.0 - (1.0 - f) * (1.0 - f);
            *slot = ((eased * f64::from(0xff00_0000u32)).round() as u32) & 0xff00_0000;
        }
        Self(table)
    }

    pub fn get(&self, v: u32) -> PremulArgb32 {
        self.0[v.min(255) as usize]
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Soft drop shadow derived from the alpha of a text layer.
///
/// Blur boxes and the gamma table are computed once per radius.
#[derive(Clone, Debug)]
pub struct DropShadow {
    radius: f64,
    boxes: BlurBoxes,
    gamma: GammaTable,
}

impl DropShadow {
    pub fn new(radius: f64) -> DanmakuResult<Self> {
        Ok(Self {
            radius,
            boxes: BlurBoxes::for_radius(radius)?,
            gamma: GammaTable::new(),
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn boxes(&self) -> BlurBoxes {
        self.boxes
    }

    pub fn gamma(&self) -> &GammaTable {
        &self.gamma
    }

    /// Recompute the blur boxes for a new radius.
    pub fn set_radius(&mut self, radius: f64) -> DanmakuResult<()> {
        self.boxes = BlurBoxes::for_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// Build the shadow of `text` into `blend` and paint `text` over it.
    ///
    /// `blur` receives the blurred coverage and `blend` doubles as blur scratch before it is
    /// overwritten with the shadow.
    ///
    /// # Panics
    ///
    /// If `blur` and `blend` do not share a row stride and height. Layers are always allocated
    /// together, so a mismatch is a programming error.
    pub fn render(&self, text: &Surface, blur: &mut Surface, blend: &mut Surface) -> DanmakuResult<()> {
        assert_eq!(
            blur.stride(),
            blend.stride(),
            "shadow and blend layers must share a row stride"
        );
        assert_eq!(
            blur.height(),
            blend.height(),
            "shadow and blend layers must share a height"
        );

        let width = text.width().min(blur.width()) as usize;
        let height = text.height().min(blur.height());
        for y in 0..height {
            let src = &text.row(y)[..width];
            let dst = blur.row_mut(y);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = s >> 24;
            }
            dst[width..].fill(0);
        }

        let (stride, rows) = (blur.stride(), blur.height());
        gauss_blur(blur.data_mut(), blend.data_mut(), stride, rows, self.boxes)?;

        for (d, &v) in blend.data_mut().iter_mut().zip(blur.data()) {
            *d = self.gamma.get(v);
        }

        over_in_place(blend, text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
