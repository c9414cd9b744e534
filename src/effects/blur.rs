use crate::foundation::error::{DanmakuError, DanmakuResult};

/// Number of box-blur passes used to approximate the Gaussian.
pub const BLUR_ROUNDS: u32 = 2;

/// Box widths whose repeated application approximates a Gaussian blur.
///
/// Pass `i` uses `lower` when `i < split`, `upper` otherwise. Both widths are odd and
/// `upper == lower + 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlurBoxes {
    pub lower: u32,
    pub upper: u32,
    pub split: u32,
}

impl BlurBoxes {
    /// Derive box widths for a shadow of `radius` pixels (`sigma = radius / 3`).
    pub fn for_radius(radius: f64) -> DanmakuResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(DanmakuError::validation(
                "blur radius must be finite and >= 0",
            ));
        }

        let n = f64::from(BLUR_ROUNDS);
        let sigma = radius / 3.0;
        let var12 = 12.0 * sigma * sigma;

        let w_ideal = (var12 / n + 1.0).sqrt();
        let mut lower = w_ideal.floor() as u32;
        if lower % 2 == 0 {
            lower -= 1;
        }
        let upper = lower + 2;

        let wl = f64::from(lower);
        let m_ideal = (var12 - n * wl * wl - 4.0 * n * wl - 3.0 * n) / (-4.0 * wl - 4.0);
        // `as` truncates toward zero and saturates negatives at 0.
        let split = (m_ideal as u32).min(BLUR_ROUNDS);

        Ok(Self {
            lower,
            upper,
            split,
        })
    }

    /// Box width of pass `i`.
    pub fn width(self, i: u32) -> u32 {
        if i < self.split {
            self.lower
        } else {
            self.upper
        }
    }

    /// Half-window radius of pass `i`.
    pub fn radius(self, i: u32) -> u32 {
        (self.width(i) - 1) / 2
    }
}

/// Two box-blur rounds over `buf`, using `scratch` as the intermediate buffer.
///
/// The result ends up in `buf`; `scratch` holds garbage afterwards.
pub fn gauss_blur(
    buf: &mut [u32],
    scratch: &mut [u32],
    width: u32,
    height: u32,
    boxes: BlurBoxes,
) -> DanmakuResult<()> {
    for i in 0..BLUR_ROUNDS {
        box_blur(buf, scratch, width, height, boxes.radius(i))?;
    }
    Ok(())
}

/// Separable box blur with a `(2 * radius + 1)` window: horizontal pass into `scratch`, vertical
/// pass back into `buf`.
///
/// Samples outside the buffer replicate the nearest edge sample. Averages truncate.
pub fn box_blur(
    buf: &mut [u32],
    scratch: &mut [u32],
    width: u32,
    height: u32,
    radius: u32,
) -> DanmakuResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| DanmakuError::render("blur buffer size overflow"))?;
    if buf.len() != expected_len || scratch.len() != expected_len {
        return Err(DanmakuError::render(
            "box_blur expects buffers matching width*height",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(());
    }

    let w = width as usize;
    let h = height as usize;
    let r = radius as usize;

    for y in 0..h {
        let src = &buf[y * w..(y + 1) * w];
        let dst = &mut scratch[y * w..(y + 1) * w];
        blur_line(w, r, |i| src[i], |i, v| dst[i] = v);
    }
    for x in 0..w {
        let src = &*scratch;
        blur_line(h, r, |i| src[i * w + x], |i, v| buf[i * w + x] = v);
    }
    Ok(())
}

/// Moving-sum average over one row or column of `len` samples.
fn blur_line(
    len: usize,
    r: usize,
    read: impl Fn(usize) -> u32,
    mut write: impl FnMut(usize, u32),
) {
    let last = len as isize - 1;
    let at = |i: isize| u64::from(read(i.clamp(0, last) as usize));
    let span = (2 * r + 1) as u64;
    let r = r as isize;

    // Seed with the window centred one sample before the start.
    let mut acc: u64 = (-1 - r..r).map(&at).sum();
    for i in 0..len as isize {
        acc += at(i + r);
        acc -= at(i - r - 1);
        write(i as usize, (acc / span) as u32);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
