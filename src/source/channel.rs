use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::source::{Message, MessageSource};

/// Receiving half of a message channel.
///
/// The stream ends once every [`Sender`] has been dropped and the backlog has been drained.
#[derive(Debug)]
pub struct ChannelSource {
    rx: Receiver<Message>,
    disconnected: bool,
}

/// Create a connected sender / source pair.
pub fn channel() -> (Sender<Message>, ChannelSource) {
    let (tx, rx) = mpsc::channel();
    (
        tx,
        ChannelSource {
            rx,
            disconnected: false,
        },
    )
}

impl MessageSource for ChannelSource {
    fn is_eof(&self) -> bool {
        self.disconnected
    }

    fn pop_messages(&mut self, visit: &mut dyn FnMut(Message)) {
        loop {
            match self.rx.try_recv() {
                Ok(m) => visit(m),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        tracing::debug!("message channel closed");
                    }
                    self.disconnected = true;
                    break;
                }
            }
        }
    }
}
