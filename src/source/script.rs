use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::foundation::error::{DanmakuError, DanmakuResult};
use crate::source::{Message, MessageSource};

/// Messages scheduled at fixed offsets from an origin instant.
///
/// Script text holds one message per line as `<offset seconds><TAB><text>`. Blank lines and lines
/// starting with `#` are skipped. A message becomes available once the clock set through
/// [`ScriptSource::set_clock`] reaches its timestamp.
#[derive(Debug)]
pub struct ScriptSource {
    scheduled: VecDeque<Message>,
    clock: Instant,
}

impl ScriptSource {
    pub fn parse(script: &str, origin: Instant) -> DanmakuResult<Self> {
        let mut scheduled = VecDeque::new();
        let mut last_offset = 0.0f64;
        for (i, raw) in script.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let (offset, text) = line.split_once('\t').ok_or_else(|| {
                DanmakuError::validation(format!("script line {line_no}: expected <offset>\\t<text>"))
            })?;
            let offset: f64 = offset.trim().parse().map_err(|e| {
                DanmakuError::validation(format!("script line {line_no}: bad offset: {e}"))
            })?;
            if !offset.is_finite() || offset < 0.0 {
                return Err(DanmakuError::validation(format!(
                    "script line {line_no}: offset must be finite and >= 0"
                )));
            }
            if offset < last_offset {
                return Err(DanmakuError::validation(format!(
                    "script line {line_no}: offsets must be nondecreasing"
                )));
            }
            last_offset = offset;
            scheduled.push_back(Message::new(
                origin + Duration::from_secs_f64(offset),
                text,
            ));
        }
        Ok(Self {
            scheduled,
            clock: origin,
        })
    }

    pub fn from_file(path: &Path, origin: Instant) -> DanmakuResult<Self> {
        let script = std::fs::read_to_string(path)?;
        Self::parse(&script, origin)
    }

    /// Advance the playback clock. Messages due at or before `now` are released on the next pop.
    pub fn set_clock(&mut self, now: Instant) {
        self.clock = self.clock.max(now);
    }

    pub fn remaining(&self) -> usize {
        self.scheduled.len()
    }
}

impl MessageSource for ScriptSource {
    fn is_eof(&self) -> bool {
        self.scheduled.is_empty()
    }

    fn pop_messages(&mut self, visit: &mut dyn FnMut(Message)) {
        while self
            .scheduled
            .front()
            .is_some_and(|m| m.timestamp <= self.clock)
        {
            if let Some(m) = self.scheduled.pop_front() {
                visit(m);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/script.rs"]
mod tests;
