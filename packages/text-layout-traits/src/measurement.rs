//! Measurement value types produced by the layout engine
//!
//! Every type here is a plain value: equality is structural and exact, with no
//! tolerance applied to floating point fields. Two measurement passes over the same
//! text are expected to produce bit-identical values.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Measurements for a single rendered line of text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMeasurement {
    /// Text content laid out on this line
    pub text: String,
    #[serde(flatten)]
    pub frame: Rect,
    pub descender: f32,
    pub cap_height: f32,
    pub ascender: f32,
    pub x_height: f32,
}

impl LineMeasurement {
    /// Line with only a frame; font metrics are left at zero
    pub fn from_frame(frame: Rect) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_metrics(
        mut self,
        ascender: f32,
        descender: f32,
        cap_height: f32,
        x_height: f32,
    ) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self.cap_height = cap_height;
        self.x_height = x_height;
        self
    }
}

/// Half-open range of characters in the source text, `start..end`
///
/// Serialized as a two element array `[start, end]`, the same shape hosts use to
/// request regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl From<[usize; 2]> for TextRange {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

impl From<TextRange> for [usize; 2] {
    fn from(range: TextRange) -> Self {
        [range.start, range.end]
    }
}

/// Bounding box of a styled sub-range or inline attachment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionMeasurement {
    /// Source text range this region was measured for
    pub range: TextRange,
    #[serde(flatten)]
    pub frame: Rect,
}

impl RegionMeasurement {
    pub const fn new(range: TextRange, frame: Rect) -> Self {
        Self { range, frame }
    }
}

/// Lines in visual order, top to bottom
pub type LinesMeasurements = Vec<LineMeasurement>;

/// Regions in source text order
pub type RegionsMeasurements = Vec<RegionMeasurement>;

/// Frame of the paragraph node itself, reported with the `layout` event
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutFrame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<Rect> for LayoutFrame {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}
