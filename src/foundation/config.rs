use std::path::Path;
use std::time::Duration;

use crate::foundation::error::{DanmakuError, DanmakuResult};

/// Fixed rendering parameters, supplied once at construction.
///
/// Durations are in seconds. The shadow radius doubles as the left margin and as the bottom
/// padding of the baseline row.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Font size in pixels.
    pub font_size: f64,
    /// Drop shadow blur radius in pixels.
    pub shadow_radius: f64,
    /// Padding added below every line of text.
    pub extra_line_height: f64,
    /// Slide-in / fade-in time of a new entry.
    pub attack_secs: f64,
    /// Total on-screen time of an entry.
    pub lifetime_secs: f64,
    /// Fade-out time at the end of the lifetime.
    pub decay_secs: f64,
    /// Travel time of the upward reflow. Falls back to `attack_secs` when unset.
    pub reflow_secs: Option<f64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_size: 32.0,
            shadow_radius: 3.0,
            extra_line_height: 4.0,
            attack_secs: 0.3,
            lifetime_secs: 8.0,
            decay_secs: 0.5,
            reflow_secs: None,
        }
    }
}

impl OverlayConfig {
    pub fn from_json_str(s: &str) -> DanmakuResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| DanmakuError::serde(format!("invalid overlay config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> DanmakuResult<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> DanmakuResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(DanmakuError::validation("font_size must be finite and > 0"));
        }
        if !self.shadow_radius.is_finite() || self.shadow_radius < 0.0 {
            return Err(DanmakuError::validation(
                "shadow_radius must be finite and >= 0",
            ));
        }
        if !self.extra_line_height.is_finite() || self.extra_line_height < 0.0 {
            return Err(DanmakuError::validation(
                "extra_line_height must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("attack_secs", Some(self.attack_secs)),
            ("lifetime_secs", Some(self.lifetime_secs)),
            ("decay_secs", Some(self.decay_secs)),
            ("reflow_secs", self.reflow_secs),
        ] {
            if let Some(v) = v
                && (!v.is_finite() || v <= 0.0)
            {
                return Err(DanmakuError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.decay_secs >= self.lifetime_secs {
            return Err(DanmakuError::validation(
                "decay_secs must be < lifetime_secs",
            ));
        }
        if self.attack_secs >= self.lifetime_secs - self.decay_secs {
            return Err(DanmakuError::validation(
                "attack_secs must be < lifetime_secs - decay_secs",
            ));
        }
        Ok(())
    }

    /// Horizontal resting position and removal slack, in pixels.
    pub fn margin(&self) -> f64 {
        self.shadow_radius
    }

    /// Baseline of the row new entries are inserted at.
    pub fn baseline_y(&self, surface_height: f64) -> f64 {
        surface_height - self.extra_line_height - self.margin()
    }

    pub fn reflow_secs(&self) -> f64 {
        self.reflow_secs.unwrap_or(self.attack_secs)
    }

    pub fn reflow_duration(&self) -> Duration {
        Duration::from_secs_f64(self.reflow_secs())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
