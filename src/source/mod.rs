//! Message sources feeding the overlay.
//!
//! A source hands over timestamped messages in nondecreasing timestamp order and tells the
//! renderer when no more will arrive.

use std::time::Instant;

/// `mpsc`-backed source for producers on other threads.
pub mod channel;
/// In-memory queue for tests and embedding.
pub mod queue;
/// Timed script played back against a caller-driven clock.
pub mod script;

pub use channel::{ChannelSource, channel};
pub use queue::QueueSource;
pub use script::ScriptSource;

/// One timestamped text message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Arrival time; entry age is measured from here.
    pub timestamp: Instant,
    /// Pre-decoded text content.
    pub text: String,
}

impl Message {
    pub fn new(timestamp: Instant, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

/// Supplier of messages to the frame driver.
pub trait MessageSource {
    /// `true` once the stream has ended.
    fn is_eof(&self) -> bool;

    /// Hand every pending message to `visit`, oldest first.
    fn pop_messages(&mut self, visit: &mut dyn FnMut(Message));
}

impl<S: MessageSource + ?Sized> MessageSource for &mut S {
    fn is_eof(&self) -> bool {
        (**self).is_eof()
    }

    fn pop_messages(&mut self, visit: &mut dyn FnMut(Message)) {
        (**self).pop_messages(visit)
    }
}
