//! Deduplicating emitter for text layout results
//!
//! A layout engine measures paragraphs off the thread that owns the UI tree and
//! reports the result through a [`ParagraphEventEmitter`]. The emitter keeps the last
//! reported snapshot behind a lock and forwards a `textLayout` event to the host only
//! when the new measurements differ from it, so listeners see exactly one event per
//! change no matter how many threads report the same result.
//!
//! The host side is abstracted by [`EventEmitter`](text_layout_traits::EventEmitter).
//! Two ready-made implementations are bundled in [`bridge`]: a synchronous
//! [`ListenerRegistry`] and a channel backed [`QueuedEventEmitter`].

pub mod bridge;
mod config;
mod paragraph;
mod payload;
mod snapshot;
mod stats;

pub use bridge::{
    EventQueue, ListenerId, ListenerRegistry, QueuedEvent, QueuedEventEmitter, event_queue,
};
pub use config::{EmissionOrdering, EmitterConfig};
pub use paragraph::{LayoutReport, ParagraphEventEmitter};
pub use payload::{FramePayload, TextLayoutPayload};
pub use stats::EmitterStats;

pub use text_layout_traits::{
    DummyEventEmitter, EmitError, EventEmitter, EventPayload, LAYOUT_EVENT, LayoutFrame,
    LineMeasurement, LinesMeasurements, Rect, RegionMeasurement, RegionsMeasurements,
    TEXT_LAYOUT_EVENT, TextRange,
};
