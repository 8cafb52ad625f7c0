//! Concurrent reporting against a single paragraph emitter

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, OnceLock, Weak};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use text_layout_events::{
    EmitError, EmitterConfig, EventEmitter, EventPayload, LayoutReport, LineMeasurement,
    ListenerRegistry, ParagraphEventEmitter, Rect, event_queue,
};
use tracing_subscriber::filter::LevelFilter;

const THREADS: usize = 8;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

fn lines_of_height(height: f32) -> Vec<LineMeasurement> {
    (0..3)
        .map(|i| LineMeasurement::from_frame(Rect::new(0.0, i as f32 * height, 320.0, height)))
        .collect()
}

/// Emitter that counts calls and sleeps inside each one
struct SlowCountingEmitter {
    calls: AtomicUsize,
    delay: Duration,
}

impl EventEmitter for SlowCountingEmitter {
    fn emit(&self, _event_name: &str, _payload: EventPayload) -> Result<(), EmitError> {
        thread::sleep(self.delay);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Emitter whose first emit reports another layout from a second thread and waits
/// for that report to return
struct ReentrantEmitter {
    target: OnceLock<Weak<ParagraphEventEmitter>>,
    fired: AtomicBool,
    other_finished: AtomicBool,
    wait: Duration,
}

impl EventEmitter for ReentrantEmitter {
    fn emit(&self, _event_name: &str, _payload: EventPayload) -> Result<(), EmitError> {
        if self.fired.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let Some(emitter) = self.target.get().and_then(Weak::upgrade) else {
            return Ok(());
        };

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        thread::spawn(move || {
            let result = emitter.report_layout(&lines_of_height(99.0), &[]);
            let _ = done_tx.send(result.is_ok());
        });

        let finished = matches!(done_rx.recv_timeout(self.wait), Ok(true));
        self.other_finished.store(finished, Ordering::SeqCst);
        Ok(())
    }
}

/// Whether a report from another thread completes while the first emit is running
fn other_report_finishes_during_emit(config: EmitterConfig) -> bool {
    let bridge = Arc::new(ReentrantEmitter {
        target: OnceLock::new(),
        fired: AtomicBool::new(false),
        other_finished: AtomicBool::new(false),
        wait: Duration::from_millis(500),
    });
    let emitter = Arc::new(ParagraphEventEmitter::with_config(
        Arc::clone(&bridge) as _,
        config,
    ));
    assert!(bridge.target.set(Arc::downgrade(&emitter)).is_ok());

    emitter.report_layout(&lines_of_height(10.0), &[]).unwrap();
    bridge.other_finished.load(Ordering::SeqCst)
}

#[cfg(test)]
mod concurrency_tests {
    use super::*;

    #[test]
    fn test_same_snapshot_from_many_threads_emits_once() {
        init_logging();
        let (bridge, queue) = event_queue(None);
        let emitter = Arc::new(ParagraphEventEmitter::new(Arc::new(bridge)));
        let barrier = Arc::new(Barrier::new(THREADS));

        let mut handles = vec![];
        for _ in 0..THREADS {
            let emitter = Arc::clone(&emitter);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                let lines = lines_of_height(16.0);
                barrier.wait();
                for _ in 0..50 {
                    emitter.report_layout(&lines, &[]).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.drain().len(), 1);
        let stats = emitter.stats();
        assert_eq!(stats.reports, (THREADS * 50) as u64);
        assert_eq!(stats.emissions, 1);
        assert_eq!(stats.suppressed, (THREADS * 50 - 1) as u64);
    }

    #[test]
    fn test_distinct_snapshots_all_emit_through_slow_emitter() {
        let bridge = Arc::new(SlowCountingEmitter {
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(20),
        });
        let emitter = Arc::new(ParagraphEventEmitter::new(Arc::clone(&bridge) as _));
        let barrier = Arc::new(Barrier::new(THREADS));

        let mut handles = vec![];
        for i in 0..THREADS {
            let emitter = Arc::clone(&emitter);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                let lines = lines_of_height(10.0 + i as f32);
                barrier.wait();
                emitter.report_layout(&lines, &[]).unwrap()
            }));
        }

        let reports: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Every thread reported a different layout, so every report is a change.
        assert!(reports.iter().all(|report| report.was_emitted()));
        assert_eq!(bridge.calls.load(Ordering::SeqCst), THREADS);
    }

    #[test]
    fn test_default_ordering_releases_lock_before_emit() {
        init_logging();
        assert!(
            other_report_finishes_during_emit(EmitterConfig::default()),
            "a report from another thread should not wait for the emitter"
        );
    }

    #[test]
    fn test_serialized_ordering_holds_lock_across_emit() {
        init_logging();
        assert!(
            !other_report_finishes_during_emit(EmitterConfig::for_testing()),
            "a report from another thread should wait for the emitter to return"
        );
    }

    #[test]
    fn test_serialized_ordering_never_overlaps_listener_calls() {
        init_logging();
        let registry = Arc::new(ListenerRegistry::new());
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let in_listener = Arc::new(AtomicUsize::new(0));

        {
            let delivered = Arc::clone(&delivered);
            let in_listener = Arc::clone(&in_listener);
            registry.add_listener("textLayout", move |payload| {
                let active = in_listener.fetch_add(1, Ordering::SeqCst);
                assert_eq!(active, 0, "listener re-entered");
                let height = payload["lineMeasurements"][0]["height"]
                    .as_f64()
                    .unwrap_or_default();
                delivered.lock().push(height);
                thread::sleep(Duration::from_millis(1));
                in_listener.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            });
        }

        let emitter = Arc::new(ParagraphEventEmitter::with_config(
            Arc::clone(&registry) as _,
            EmitterConfig::for_testing(),
        ));

        let mut handles = vec![];
        for i in 0..THREADS {
            let emitter = Arc::clone(&emitter);
            handles.push(thread::spawn(move || {
                for round in 0..10 {
                    let height = (i * 10 + round) as f32;
                    emitter.report_layout(&lines_of_height(height), &[]).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = emitter.stats();
        let delivered = delivered.lock().clone();
        assert_eq!(delivered.len() as u64, stats.emissions);
        assert_eq!(stats.emissions + stats.suppressed, stats.reports);

        // Each thread's heights arrive in the order that thread reported them.
        for i in 0..THREADS {
            let low = (i * 10) as f64;
            let own: Vec<f64> = delivered
                .iter()
                .copied()
                .filter(|height| *height >= low && *height < low + 10.0)
                .collect();
            assert_eq!(own.len(), 10);
            assert!(own.windows(2).all(|pair| pair[0] < pair[1]), "thread {i}: {own:?}");
        }

        // The last delivered payload is the cached snapshot.
        let last = *delivered.last().unwrap();
        let report = emitter.report_layout(&lines_of_height(last as f32), &[]).unwrap();
        assert_eq!(report, LayoutReport::Unchanged);
    }
}
