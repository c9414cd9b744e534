use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::animation::ease::Ease;
use crate::foundation::config::OverlayConfig;
use crate::source::Message;

/// Lifecycle phase of an entry, derived from its age alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Sliding in from the right edge and fading in.
    Attack,
    /// Parked at the left margin, fully opaque.
    Steady,
    /// Fading out before removal.
    Decay,
}

impl Phase {
    pub fn at(cfg: &OverlayConfig, age: f64) -> Self {
        if age < cfg.attack_secs {
            Self::Attack
        } else if age < cfg.lifetime_secs - cfg.decay_secs {
            Self::Steady
        } else {
            Self::Decay
        }
    }
}

/// Horizontal position and opacity of an entry at a given age.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub phase: Phase,
    pub x: f64,
    pub opacity: f64,
}

impl Pose {
    pub fn at(cfg: &OverlayConfig, surface_width: f64, age: f64) -> Self {
        let margin = cfg.margin();
        let phase = Phase::at(cfg, age);
        match phase {
            Phase::Attack => {
                let progress = (age / cfg.attack_secs).clamp(0.0, 1.0);
                Self {
                    phase,
                    x: Ease::OutQuad.lerp(surface_width, margin, progress),
                    opacity: progress,
                }
            }
            Phase::Steady => Self {
                phase,
                x: margin,
                opacity: 1.0,
            },
            Phase::Decay => Self {
                phase,
                x: margin,
                opacity: ((cfg.lifetime_secs - age) / cfg.decay_secs).clamp(0.0, 1.0),
            },
        }
    }
}

/// Vertical state of an entry. Only reflowing entries carry tween endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalMotion {
    Resting {
        y: f64,
    },
    Reflowing {
        y: f64,
        start_y: f64,
        end_y: f64,
        start_time: Instant,
        end_time: Instant,
    },
}

impl VerticalMotion {
    /// Baseline position as of the last update.
    pub fn y(&self) -> f64 {
        match *self {
            Self::Resting { y } | Self::Reflowing { y, .. } => y,
        }
    }

    /// Where the entry will come to rest.
    pub fn target_y(&self) -> f64 {
        match *self {
            Self::Resting { y } => y,
            Self::Reflowing { end_y, .. } => end_y,
        }
    }

    pub fn is_reflowing(&self) -> bool {
        matches!(self, Self::Reflowing { .. })
    }

    /// Interpolated position at `now`, clamped to the tween endpoints.
    pub fn position_at(&self, now: Instant) -> f64 {
        match *self {
            Self::Resting { y } => y,
            Self::Reflowing {
                start_y,
                end_y,
                start_time,
                end_time,
                ..
            } => {
                if now >= end_time {
                    return end_y;
                }
                let total = end_time.saturating_duration_since(start_time).as_secs_f64();
                if total <= 0.0 {
                    return end_y;
                }
                let elapsed = now.saturating_duration_since(start_time).as_secs_f64();
                Ease::Linear.lerp(start_y, end_y, elapsed / total)
            }
        }
    }

    /// Step the tween to `now`, settling once the end time is reached.
    pub fn advance(&mut self, now: Instant) {
        if let Self::Reflowing { end_y, end_time, .. } = *self
            && now >= end_time
        {
            *self = Self::Resting { y: end_y };
            return;
        }
        let current = self.position_at(now);
        if let Self::Reflowing { y, .. } = self {
            *y = current;
        }
    }

    /// Start (or retarget) an upward tween of `height` pixels lasting `duration`.
    ///
    /// A tween already in flight restarts from its interpolated position at `now` and keeps its
    /// accumulated target.
    pub fn displace(&mut self, now: Instant, height: f64, duration: Duration) {
        let (y, start_y, end_y) = match *self {
            Self::Resting { y } => (y, y, y - height),
            Self::Reflowing { y, end_y, .. } => (y, self.position_at(now), end_y - height),
        };
        *self = Self::Reflowing {
            y,
            start_y,
            end_y,
            start_time: now,
            end_time: now + duration,
        };
    }
}

/// One visible message and its animation state.
#[derive(Clone, Debug)]
pub struct DanmakuEntry {
    message: Message,
    rendered_height: f64,
    x: f64,
    opacity: f64,
    vertical: VerticalMotion,
}

impl DanmakuEntry {
    pub fn new(message: Message, rendered_height: f64, baseline_y: f64) -> Self {
        Self {
            message,
            rendered_height,
            x: 0.0,
            opacity: 0.0,
            vertical: VerticalMotion::Resting { y: baseline_y },
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }

    pub fn rendered_height(&self) -> f64 {
        self.rendered_height
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.vertical.y()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn vertical(&self) -> &VerticalMotion {
        &self.vertical
    }

    /// Seconds since arrival; zero for timestamps in the future.
    pub fn age_secs(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.message.timestamp)
            .as_secs_f64()
    }

    /// Lifetime elapsed, or scrolled off the top beyond the shadow slack.
    pub fn is_expired(&self, cfg: &OverlayConfig, now: Instant) -> bool {
        self.age_secs(now) >= cfg.lifetime_secs || self.y() < -2.0 * cfg.margin()
    }

    pub fn animate(&mut self, cfg: &OverlayConfig, surface_width: f64, now: Instant) {
        let pose = Pose::at(cfg, surface_width, self.age_secs(now));
        self.x = pose.x;
        self.opacity = pose.opacity;
        self.vertical.advance(now);
    }

    pub(crate) fn displace(&mut self, now: Instant, height: f64, duration: Duration) {
        self.vertical.displace(now, height, duration);
    }
}

/// Drop expired entries, then pose the survivors at `now`. Returns how many were removed.
pub fn animate_entries(
    entries: &mut VecDeque<DanmakuEntry>,
    cfg: &OverlayConfig,
    surface_width: f64,
    now: Instant,
) -> usize {
    let before = entries.len();
    entries.retain(|e| !e.is_expired(cfg, now));
    for e in entries.iter_mut() {
        e.animate(cfg, surface_width, now);
    }
    before - entries.len()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
