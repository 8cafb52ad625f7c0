//! Counters describing how often reports turn into emissions

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct EmitterStatsInner {
    reports: AtomicU64,
    emissions: AtomicU64,
    suppressed: AtomicU64,
    failures: AtomicU64,
}

impl EmitterStatsInner {
    pub(crate) fn record_report(&self) {
        self.reports.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_emission(&self) {
        self.emissions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> EmitterStats {
        EmitterStats {
            reports: self.reports.load(Ordering::Relaxed),
            emissions: self.emissions.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of an emitter's counters
///
/// `emissions` counts successful bridge calls, `failures` counts bridge calls that
/// returned an error. Every report ends up in exactly one of `emissions`,
/// `suppressed` or `failures`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitterStats {
    pub reports: u64,
    pub emissions: u64,
    pub suppressed: u64,
    pub failures: u64,
}

impl EmitterStats {
    /// Fraction of reports that were identical to the cached result
    pub fn suppression_rate(&self) -> f32 {
        if self.reports == 0 {
            0.0
        } else {
            self.suppressed as f32 / self.reports as f32
        }
    }
}
