//! Progress tracking for a single batch run.
//!
//! One snapshot is pushed to the sink for every finished task, synchronously,
//! at the moment it finishes. Snapshots arrive in completion order, so
//! `current` names the file that finished last, not the one started last.

use crate::types::ProgressSnapshot;

/// Receives progress snapshots as tasks finish.
pub trait ProgressSink {
    /// Called once per completed task.
    fn on_progress(&mut self, snapshot: &ProgressSnapshot);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressSnapshot),
{
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) {
        self(snapshot)
    }
}

/// A sink that drops every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _snapshot: &ProgressSnapshot) {}
}

/// Counts completed tasks against a fixed total and notifies a sink.
pub struct ProgressTracker<S> {
    snapshot: ProgressSnapshot,
    sink: S,
}

impl<S: ProgressSink> ProgressTracker<S> {
    /// Create a tracker for `total` tasks.
    pub fn new(total: usize, sink: S) -> Self {
        Self {
            snapshot: ProgressSnapshot {
                completed: 0,
                total,
                current: None,
            },
            sink,
        }
    }

    /// Record one finished task and push the new snapshot to the sink.
    ///
    /// # Panics
    ///
    /// If called more than `total` times.
    pub fn on_task_completed(&mut self, label: &str) -> ProgressSnapshot {
        assert!(
            self.snapshot.completed < self.snapshot.total,
            "progress overflow: {} of {} already completed",
            self.snapshot.completed,
            self.snapshot.total
        );
        self.snapshot.completed += 1;
        self.snapshot.current = Some(label.to_string());
        self.sink.on_progress(&self.snapshot);
        self.snapshot.clone()
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    /// True once every task has reported.
    pub fn is_finished(&self) -> bool {
        self.snapshot.completed == self.snapshot.total
    }
}
