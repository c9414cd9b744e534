use crate::foundation::error::{DanmakuError, DanmakuResult};
use crate::render::surface::Surface;

/// Premultiplied ARGB32 pixel: alpha in the high byte, then red, green, blue.
pub type PremulArgb32 = u32;

/// Pack premultiplied channels into an ARGB32 word.
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> PremulArgb32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Split an ARGB32 word into `[a, r, g, b]`.
pub fn unpack_argb(px: PremulArgb32) -> [u8; 4] {
    [(px >> 24) as u8, (px >> 16) as u8, (px >> 8) as u8, px as u8]
}

/// Premultiply a straight-alpha colour into ARGB32.
pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> PremulArgb32 {
    let a16 = u16::from(a);
    let premul = |c: u8| mul_div255(u16::from(c), a16);
    pack_argb(a, premul(r), premul(g), premul(b))
}

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulArgb32, src: PremulArgb32) -> PremulArgb32 {
    let sa = (src >> 24) as u8;
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let s = unpack_argb(src);
    let d = unpack_argb(dst);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = s[i].saturating_add(mul_div255(u16::from(d[i]), inv));
    }
    pack_argb(out[0], out[1], out[2], out[3])
}

/// Paint `src` over `dst`, pixel by pixel. Both surfaces must have the same dimensions.
pub fn over_in_place(dst: &mut Surface, src: &Surface) -> DanmakuResult<()> {
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(DanmakuError::render(
            "over_in_place expects surfaces of equal size",
        ));
    }
    let width = dst.width() as usize;
    for y in 0..dst.height() {
        let s = &src.row(y)[..width];
        let d = &mut dst.row_mut(y)[..width];
        for (d, &s) in d.iter_mut().zip(s) {
            *d = over(*d, s);
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
