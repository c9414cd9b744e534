use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::animation::motion::{DanmakuEntry, animate_entries};
use crate::foundation::config::OverlayConfig;
use crate::foundation::error::DanmakuResult;
use crate::source::{Message, MessageSource};
use crate::text::TextRasterizer;

/// Visible entries, newest first.
///
/// Every intake displaces every visible entry, which is O(n) per message. On-screen counts are
/// bounded by the surface height, so the list is kept flat.
#[derive(Clone, Debug, Default)]
pub struct DanmakuList {
    entries: VecDeque<DanmakuEntry>,
}

impl DanmakuList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &DanmakuEntry> {
        self.entries.iter()
    }

    pub fn get(&self, i: usize) -> Option<&DanmakuEntry> {
        self.entries.get(i)
    }

    /// Push every visible entry up by `rendered_height` and insert `message` at the baseline.
    pub fn admit(
        &mut self,
        message: Message,
        rendered_height: f64,
        baseline_y: f64,
        now: Instant,
        reflow: Duration,
    ) {
        for e in self.entries.iter_mut() {
            e.displace(now, rendered_height, reflow);
        }
        self.entries
            .push_front(DanmakuEntry::new(message, rendered_height, baseline_y));
    }

    /// Drain `source` and admit each message in delivery order. Returns the number admitted.
    ///
    /// A message whose text cannot be measured is dropped. The rest of the batch is still
    /// admitted, and the first measuring error is returned afterwards.
    pub fn intake<S, R>(
        &mut self,
        source: &mut S,
        rasterizer: &mut R,
        cfg: &OverlayConfig,
        surface_height: f64,
        now: Instant,
    ) -> DanmakuResult<usize>
    where
        S: MessageSource + ?Sized,
        R: TextRasterizer + ?Sized,
    {
        let mut arrived = Vec::new();
        source.pop_messages(&mut |m| arrived.push(m));

        let baseline_y = cfg.baseline_y(surface_height);
        let reflow = cfg.reflow_duration();
        let mut admitted = 0;
        let mut first_err = None;
        for message in arrived {
            let extents = match rasterizer.measure(&message.text) {
                Ok(extents) => extents,
                Err(e) => {
                    tracing::warn!(
                        text = %message.text,
                        error = %e,
                        "dropping unmeasurable message"
                    );
                    first_err.get_or_insert(e);
                    continue;
                }
            };
            let rendered_height = extents.height + cfg.extra_line_height;
            tracing::debug!(text = %message.text, rendered_height, "admitting message");
            self.admit(message, rendered_height, baseline_y, now, reflow);
            admitted += 1;
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(admitted),
        }
    }

    /// Remove expired entries and pose the rest. Returns the number removed.
    pub fn animate(&mut self, cfg: &OverlayConfig, surface_width: f64, now: Instant) -> usize {
        animate_entries(&mut self.entries, cfg, surface_width, now)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reflow.rs"]
mod tests;
