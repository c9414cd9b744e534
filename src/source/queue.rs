use std::collections::VecDeque;

use crate::foundation::error::{DanmakuError, DanmakuResult};
use crate::source::{Message, MessageSource};

/// FIFO of messages pushed by the owner.
#[derive(Debug, Default)]
pub struct QueueSource {
    pending: VecDeque<Message>,
    last: Option<std::time::Instant>,
    finished: bool,
}

impl QueueSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message. Timestamps must not go backwards.
    pub fn push(&mut self, message: Message) -> DanmakuResult<()> {
        if self.finished {
            return Err(DanmakuError::validation(
                "cannot push to a finished message queue",
            ));
        }
        if let Some(last) = self.last
            && message.timestamp < last
        {
            return Err(DanmakuError::validation(
                "message timestamps must be nondecreasing",
            ));
        }
        self.last = Some(message.timestamp);
        self.pending.push_back(message);
        Ok(())
    }

    /// Mark the end of the stream. Already queued messages are still delivered.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl MessageSource for QueueSource {
    fn is_eof(&self) -> bool {
        self.finished
    }

    fn pop_messages(&mut self, visit: &mut dyn FnMut(Message)) {
        while let Some(m) = self.pending.pop_front() {
            visit(m);
        }
    }
}
