//! The event emission capability shared between emitters and the host runtime

/// Structured payload handed to the host together with an event name
pub type EventPayload = serde_json::Value;

/// Event carrying line and region measurements of a paragraph
pub const TEXT_LAYOUT_EVENT: &str = "textLayout";

/// Event carrying the frame of a node
pub const LAYOUT_EVENT: &str = "layout";

/// Failures raised while handing an event to the host
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Failed to serialize event payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Listener rejected event: {0}")]
    Listener(String),

    #[error("Event queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("Event queue receiver has been dropped")]
    Disconnected,
}

/// Something that can deliver a named event with a payload to listeners.
///
/// Implementations decide whether delivery is synchronous or queued. Callers may
/// invoke `emit` from any thread.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event_name: &str, payload: EventPayload) -> Result<(), EmitError>;
}

impl<T: EventEmitter + ?Sized> EventEmitter for std::sync::Arc<T> {
    fn emit(&self, event_name: &str, payload: EventPayload) -> Result<(), EmitError> {
        (**self).emit(event_name, payload)
    }
}

/// An [`EventEmitter`] that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyEventEmitter;

impl EventEmitter for DummyEventEmitter {
    fn emit(&self, _event_name: &str, _payload: EventPayload) -> Result<(), EmitError> {
        Ok(())
    }
}
