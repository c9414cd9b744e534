use std::time::{Duration, Instant};

/// Counts painted frames and reports the rate roughly once per second.
#[derive(Clone, Debug)]
pub struct FpsCounter {
    checkpoint: Instant,
    count: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            checkpoint: now,
            count: 0,
        }
    }

    /// Record one frame at `now`.
    ///
    /// Returns the frame count of the elapsed window once more than a second has passed since the
    /// last report, and starts a new window.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.count = self.count.saturating_add(1);
        if now.saturating_duration_since(self.checkpoint) <= Duration::from_secs(1) {
            return None;
        }
        let fps = self.count;
        self.count = 0;
        self.checkpoint = now;
        tracing::info!(fps, "overlay frame rate");
        Some(fps)
    }
}
