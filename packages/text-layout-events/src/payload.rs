//! Wire shapes of the payloads handed to the host
//!
//! Field names are part of the host contract and must not change.

use serde::Serialize;
use text_layout_traits::{
    EmitError, EventPayload, LayoutFrame, LineMeasurement, RegionMeasurement,
};

/// Payload of the `textLayout` event
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayoutPayload<'a> {
    pub line_measurements: &'a [LineMeasurement],
    pub region_measurements: &'a [RegionMeasurement],
}

impl<'a> TextLayoutPayload<'a> {
    pub fn new(lines: &'a [LineMeasurement], regions: &'a [RegionMeasurement]) -> Self {
        Self {
            line_measurements: lines,
            region_measurements: regions,
        }
    }

    pub fn to_payload(&self) -> Result<EventPayload, EmitError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Payload of the `layout` event
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FramePayload {
    pub layout: LayoutFrame,
}

impl FramePayload {
    pub fn new(layout: LayoutFrame) -> Self {
        Self { layout }
    }

    pub fn to_payload(&self) -> Result<EventPayload, EmitError> {
        Ok(serde_json::to_value(self)?)
    }
}
