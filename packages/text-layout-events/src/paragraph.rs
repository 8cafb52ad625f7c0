//! Event emitter owned by a paragraph node

use std::sync::Arc;

use parking_lot::Mutex;
use text_layout_traits::{
    EmitError, EventEmitter, EventPayload, LAYOUT_EVENT, LayoutFrame, LineMeasurement,
    RegionMeasurement, TEXT_LAYOUT_EVENT,
};

use crate::config::{EmissionOrdering, EmitterConfig};
use crate::payload::{FramePayload, TextLayoutPayload};
use crate::snapshot::{FrameCell, SnapshotCell};
use crate::stats::{EmitterStats, EmitterStatsInner};

/// Outcome of a successful report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutReport {
    /// The result differed from the cached one and was handed to the emitter
    Emitted,
    /// The result equalled the cached one; nothing was emitted
    Unchanged,
}

impl LayoutReport {
    pub fn was_emitted(self) -> bool {
        matches!(self, Self::Emitted)
    }
}

/// Reports text layout results of one paragraph node to the host.
///
/// The layout engine may call [`report_layout`](Self::report_layout) from any thread.
/// The last emitted lines and regions are cached behind a mutex; a report is only
/// forwarded as a `textLayout` event when it differs from the cache. Compare and
/// store happen under one lock acquisition, so concurrent reports of the same result
/// produce a single event.
///
/// With [`EmissionOrdering::Initiation`] (the default) the lock is released before
/// the emitter is called. Emissions are started in cache order but an asynchronous
/// emitter may deliver them in a different order.
pub struct ParagraphEventEmitter {
    emitter: Arc<dyn EventEmitter>,
    config: EmitterConfig,
    measurements: Mutex<SnapshotCell>,
    frame: Mutex<FrameCell>,
    stats: EmitterStatsInner,
}

impl ParagraphEventEmitter {
    pub fn new(emitter: Arc<dyn EventEmitter>) -> Self {
        Self::with_config(emitter, EmitterConfig::default())
    }

    pub fn with_config(emitter: Arc<dyn EventEmitter>, config: EmitterConfig) -> Self {
        Self {
            emitter,
            config,
            measurements: Mutex::new(SnapshotCell::default()),
            frame: Mutex::new(FrameCell::default()),
            stats: EmitterStatsInner::default(),
        }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn stats(&self) -> EmitterStats {
        self.stats.snapshot()
    }

    /// Reports the lines and regions of a finished measurement pass.
    ///
    /// Emits `textLayout` with `lineMeasurements` and `regionMeasurements` built from
    /// the arguments when they differ from the previous report. An emitter error is
    /// returned as is; the new result stays cached either way.
    pub fn report_layout(
        &self,
        lines: &[LineMeasurement],
        regions: &[RegionMeasurement],
    ) -> Result<LayoutReport, EmitError> {
        self.stats.record_report();

        match self.config.ordering {
            EmissionOrdering::Initiation => {
                let changed = self.measurements.lock().update(lines, regions);
                if !changed {
                    return Ok(self.suppressed(TEXT_LAYOUT_EVENT));
                }
                self.emit_text_layout(lines, regions)
            }
            EmissionOrdering::Serialized => {
                let mut measurements = self.measurements.lock();
                if !measurements.update(lines, regions) {
                    return Ok(self.suppressed(TEXT_LAYOUT_EVENT));
                }
                let result = self.emit_text_layout(lines, regions);
                drop(measurements);
                result
            }
        }
    }

    /// Reports the frame of the paragraph node, emitting `layout` on change
    pub fn report_frame(&self, frame: LayoutFrame) -> Result<LayoutReport, EmitError> {
        self.stats.record_report();

        match self.config.ordering {
            EmissionOrdering::Initiation => {
                let changed = self.frame.lock().update(frame);
                if !changed {
                    return Ok(self.suppressed(LAYOUT_EVENT));
                }
                self.dispatch(LAYOUT_EVENT, FramePayload::new(frame).to_payload())
            }
            EmissionOrdering::Serialized => {
                let mut cached = self.frame.lock();
                if !cached.update(frame) {
                    return Ok(self.suppressed(LAYOUT_EVENT));
                }
                let result = self.dispatch(LAYOUT_EVENT, FramePayload::new(frame).to_payload());
                drop(cached);
                result
            }
        }
    }

    fn emit_text_layout(
        &self,
        lines: &[LineMeasurement],
        regions: &[RegionMeasurement],
    ) -> Result<LayoutReport, EmitError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            label = self.config.debug_label.as_deref().unwrap_or_default(),
            lines = lines.len(),
            regions = regions.len(),
            "text layout changed"
        );

        self.dispatch(
            TEXT_LAYOUT_EVENT,
            TextLayoutPayload::new(lines, regions).to_payload(),
        )
    }

    fn dispatch(
        &self,
        event_name: &str,
        payload: Result<EventPayload, EmitError>,
    ) -> Result<LayoutReport, EmitError> {
        match payload.and_then(|payload| self.emitter.emit(event_name, payload)) {
            Ok(()) => {
                self.stats.record_emission();
                Ok(LayoutReport::Emitted)
            }
            Err(err) => {
                self.stats.record_failure();
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    label = self.config.debug_label.as_deref().unwrap_or_default(),
                    event = event_name,
                    "failed to emit event: {err}"
                );
                Err(err)
            }
        }
    }

    fn suppressed(&self, _event_name: &str) -> LayoutReport {
        self.stats.record_suppressed();
        #[cfg(feature = "tracing")]
        tracing::trace!(
            label = self.config.debug_label.as_deref().unwrap_or_default(),
            event = _event_name,
            "layout unchanged, skipping emit"
        );
        LayoutReport::Unchanged
    }
}

/// Forwards arbitrary events of the owning node to the underlying emitter.
impl EventEmitter for ParagraphEventEmitter {
    fn emit(&self, event_name: &str, payload: EventPayload) -> Result<(), EmitError> {
        self.emitter.emit(event_name, payload)
    }
}

impl std::fmt::Debug for ParagraphEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParagraphEventEmitter")
            .field("config", &self.config)
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}
