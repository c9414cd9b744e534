/// Easing curves mapping normalized progress onto normalized travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic ease-out: fast start, settles into the target.
    OutQuad,
}

impl Ease {
    /// Apply this easing function to progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => t * (2.0 - t),
        }
    }

    /// Interpolate from `from` to `to` at progress `t`.
    pub fn lerp(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}
