use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use smol_str::SmolStr;
use text_layout_traits::{EmitError, EventEmitter, EventPayload};

/// An event waiting in the host's queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedEvent {
    pub name: SmolStr,
    pub payload: EventPayload,
}

/// Creates a connected emitter/queue pair.
///
/// With `Some(capacity)` the queue is bounded and emitting into a full queue fails
/// with [`EmitError::QueueFull`] instead of blocking the emitting thread.
pub fn event_queue(capacity: Option<usize>) -> (QueuedEventEmitter, EventQueue) {
    let (sender, receiver) = match capacity {
        Some(capacity) => crossbeam_channel::bounded(capacity),
        None => crossbeam_channel::unbounded(),
    };
    (
        QueuedEventEmitter { sender, capacity },
        EventQueue { receiver },
    )
}

/// Sending half of an event queue; cheap to clone
#[derive(Debug, Clone)]
pub struct QueuedEventEmitter {
    sender: Sender<QueuedEvent>,
    capacity: Option<usize>,
}

impl EventEmitter for QueuedEventEmitter {
    fn emit(&self, event_name: &str, payload: EventPayload) -> Result<(), EmitError> {
        let event = QueuedEvent {
            name: SmolStr::new(event_name),
            payload,
        };
        self.sender.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => {
                let capacity = self.capacity.unwrap_or_default();
                log::warn!("Dropping '{event_name}' event: queue full ({capacity})");
                EmitError::QueueFull { capacity }
            }
            TrySendError::Disconnected(_) => EmitError::Disconnected,
        })
    }
}

/// Receiving half of an event queue, drained by the host's event loop
#[derive(Debug)]
pub struct EventQueue {
    receiver: Receiver<QueuedEvent>,
}

impl EventQueue {
    pub fn try_next(&self) -> Option<QueuedEvent> {
        self.receiver.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. Returns `None` on timeout or when every
    /// emitter has been dropped and the queue is empty.
    pub fn next_timeout(&self, timeout: Duration) -> Option<QueuedEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Takes every event currently queued, in emission order
    pub fn drain(&self) -> Vec<QueuedEvent> {
        self.receiver.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
