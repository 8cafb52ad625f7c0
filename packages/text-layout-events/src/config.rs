/// How emissions are ordered relative to cache updates from other threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionOrdering {
    /// The lock covers compare and store only. Emissions start in cache order, but a
    /// queued or asynchronous emitter may deliver them out of order. A slow listener
    /// never blocks other reporters.
    #[default]
    Initiation,
    /// The lock is held across the emit call as well, so emissions are delivered in
    /// cache order. Concurrent reporters wait for the listener to return.
    Serialized,
}

/// Options used when constructing a [`ParagraphEventEmitter`](crate::ParagraphEventEmitter)
#[derive(Debug, Clone, Default)]
pub struct EmitterConfig {
    /// Lock scope used for emissions
    pub ordering: EmissionOrdering,
    /// Label attached to log records, usually the owning node's id or tag
    pub debug_label: Option<String>,
}

impl EmitterConfig {
    pub fn with_ordering(mut self, ordering: EmissionOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_debug_label(mut self, label: impl Into<String>) -> Self {
        self.debug_label = Some(label.into());
        self
    }

    /// Serialized ordering with a fixed label, so tests see deterministic delivery
    pub fn for_testing() -> Self {
        Self {
            ordering: EmissionOrdering::Serialized,
            debug_label: Some("test-paragraph".to_string()),
        }
    }
}
