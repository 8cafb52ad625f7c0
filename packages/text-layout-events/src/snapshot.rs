//! Last reported measurement state and the change check against it

use text_layout_traits::{
    LayoutFrame, LineMeasurement, LinesMeasurements, RegionMeasurement, RegionsMeasurements,
};

/// The most recently emitted lines and regions of a paragraph
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct MeasurementSnapshot {
    lines: LinesMeasurements,
    regions: RegionsMeasurements,
}

impl MeasurementSnapshot {
    fn new(lines: &[LineMeasurement], regions: &[RegionMeasurement]) -> Self {
        Self {
            lines: lines.to_vec(),
            regions: regions.to_vec(),
        }
    }

    fn matches(&self, lines: &[LineMeasurement], regions: &[RegionMeasurement]) -> bool {
        self.lines.as_slice() == lines && self.regions.as_slice() == regions
    }

    fn overwrite(&mut self, lines: &[LineMeasurement], regions: &[RegionMeasurement]) {
        self.lines.clear();
        self.lines.extend_from_slice(lines);
        self.regions.clear();
        self.regions.extend_from_slice(regions);
    }
}

/// Cached snapshot slot guarded by the emitter's mutex.
///
/// Starts out without a snapshot, so even an empty first result counts as a change.
#[derive(Debug, Default)]
pub(crate) struct SnapshotCell {
    last: Option<MeasurementSnapshot>,
}

impl SnapshotCell {
    /// Stores `lines` and `regions` unless they equal the cached pair.
    /// Returns whether the cache changed.
    pub(crate) fn update(
        &mut self,
        lines: &[LineMeasurement],
        regions: &[RegionMeasurement],
    ) -> bool {
        if let Some(snapshot) = self.last.as_mut() {
            if snapshot.matches(lines, regions) {
                return false;
            }
            snapshot.overwrite(lines, regions);
            return true;
        }

        self.last = Some(MeasurementSnapshot::new(lines, regions));
        true
    }
}

/// Cached frame slot, same rules as [`SnapshotCell`]
#[derive(Debug, Default)]
pub(crate) struct FrameCell {
    last: Option<LayoutFrame>,
}

impl FrameCell {
    pub(crate) fn update(&mut self, frame: LayoutFrame) -> bool {
        if self.last == Some(frame) {
            return false;
        }
        self.last = Some(frame);
        true
    }
}
