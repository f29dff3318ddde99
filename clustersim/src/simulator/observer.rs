/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Notification hooks for watching a run step by step.
//!
//! The simulator calls these at fixed points of every tick.  All hooks default
//! to no-ops and a run without any observer behaves identically.

use std::io::BufRead;

use tracing::info;

use crate::cluster::Cluster;
use crate::task::{Task, TaskRecord};

pub trait SimObserver {
    /// Start of a tick, before completions are released.
    fn on_tick_start(&mut self, _now: f64, _cluster: &Cluster) {}

    /// A task finished and gave its resources back.
    fn on_task_released(&mut self, _task: &Task, _now: f64) {}

    /// A task moved from the trace into the pending queue.
    fn on_task_arrived(&mut self, _task: &Task, _now: f64) {}

    /// A pending task was placed.
    fn on_task_assigned(&mut self, _record: &TaskRecord) {}

    /// A pending task did not fit anywhere and stays queued.
    fn on_task_deferred(&mut self, _task: &Task, _now: f64) {}

    /// End of a tick, after the scheduling pass and before time advances.
    fn on_tick_end(&mut self, _now: f64, _cluster: &Cluster) {}
}

// ── SteppingObserver ──────────────────────────────────────────────────────────

/// Verbose mode: logs every event and the cluster state around each
/// scheduling pass, optionally waiting for a line on `input` between ticks.
pub struct SteppingObserver<R> {
    input: Option<R>,
}

impl SteppingObserver<std::io::StdinLock<'static>> {
    /// Pause on stdin after every tick.
    pub fn interactive() -> Self {
        Self {
            input: Some(std::io::stdin().lock()),
        }
    }
}

impl<R: BufRead> SteppingObserver<R> {
    /// Log only, never pause.
    pub fn log_only() -> Self {
        Self { input: None }
    }

    /// Pause by reading one line from `input` after every tick.
    pub fn with_input(input: R) -> Self {
        Self { input: Some(input) }
    }

    fn report(label: &str, cluster: &Cluster) {
        info!("Cluster state {label}:");
        for node in cluster.all_nodes() {
            info!("  {node}");
        }
    }
}

impl<R: BufRead> SimObserver for SteppingObserver<R> {
    fn on_tick_start(&mut self, now: f64, cluster: &Cluster) {
        info!("----------------------------------------------------------------");
        info!(now, "tick");
        Self::report("before scheduling", cluster);
    }

    fn on_task_released(&mut self, task: &Task, now: f64) {
        info!(
            "Task {} completed on Node {} by {:.1}",
            task.id,
            task.assigned_node().unwrap_or("?"),
            now
        );
    }

    fn on_task_arrived(&mut self, task: &Task, _now: f64) {
        info!(
            "New task arrived: {} (CPU={}, GPU={}, Duration={})",
            task.id, task.cpu, task.gpu, task.duration
        );
    }

    fn on_task_assigned(&mut self, record: &TaskRecord) {
        info!("✓ Task {} has been assigned to Node {}", record.id, record.assigned_node);
    }

    fn on_task_deferred(&mut self, task: &Task, _now: f64) {
        info!("✗ Task {} could not be scheduled now; keeping it for later", task.id);
    }

    fn on_tick_end(&mut self, _now: f64, cluster: &Cluster) {
        Self::report("after scheduling", cluster);
        if let Some(input) = self.input.as_mut() {
            info!("Press Enter to advance to the next simulated time...");
            let mut line = String::new();
            // EOF or a read error stops pausing; the run continues
            if matches!(input.read_line(&mut line), Ok(0) | Err(_)) {
                self.input = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn pause_consumes_one_line_per_tick_and_stops_at_eof() {
        let cluster = Cluster::default();
        let mut obs = SteppingObserver::with_input(Cursor::new("\n\n"));

        obs.on_tick_end(0.0, &cluster);
        obs.on_tick_end(1.0, &cluster);
        assert!(obs.input.is_some());

        obs.on_tick_end(2.0, &cluster);
        assert!(obs.input.is_none(), "EOF disables pausing");
    }

    #[test]
    fn log_only_never_reads() {
        let mut obs = SteppingObserver::<Cursor<&str>>::log_only();
        obs.on_tick_end(0.0, &Cluster::default());
        assert!(obs.input.is_none());
    }
}
