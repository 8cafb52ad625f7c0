//! Host side implementations of [`EventEmitter`](text_layout_traits::EventEmitter)
//!
//!  - [`ListenerRegistry`] calls registered callbacks on the emitting thread
//!  - [`QueuedEventEmitter`] pushes events onto a channel drained by the host's event loop

mod listeners;
mod queue;

pub use listeners::{Listener, ListenerId, ListenerRegistry};
pub use queue::{EventQueue, QueuedEvent, QueuedEventEmitter, event_queue};
