//! Shared types and traits for reporting text layout results
//!
//! This crate holds the pieces that both the layout engine and the host runtime
//! need to agree on:
//!
//!  - [`measurement`]: the value types describing a measured paragraph (lines and regions)
//!  - [`events`]: the [`EventEmitter`](events::EventEmitter) capability used to hand a named
//!    event and its payload to the host, plus the error type it reports failures with
//!
//! The emitter that deduplicates layout results lives in the `text-layout-events` crate.

pub mod events;
pub mod measurement;

pub use events::{
    DummyEventEmitter, EmitError, EventEmitter, EventPayload, LAYOUT_EVENT, TEXT_LAYOUT_EVENT,
};
pub use measurement::{
    LayoutFrame, LineMeasurement, LinesMeasurements, Rect, RegionMeasurement,
    RegionsMeasurements, TextRange,
};
