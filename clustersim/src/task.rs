/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the simulator.
//!
//! Two distinct types model the two sides of a task's life:
//!
//! ```text
//! trace  ──►  Task  ──(Scheduler)──►  Task + Placement  ──(Node)──►  released
//!              │                          │
//!              pending queue              └──►  TaskRecord  ──►  MetricsRecorder
//! ```
//!
//! # Ownership model
//! A `Task` is **owned** by exactly one place at a time: the unarrived trace,
//! the pending queue, or the occupying set of the node it was assigned to.
//! Assignment moves the task into the node; the [`TaskRecord`] snapshot taken
//! at that moment is what the metrics layer keeps.

use serde::Serialize;

// ── Placement ─────────────────────────────────────────────────────────────────

/// Scheduling outcome of a task.
///
/// Start, end and node are always set together, so they live in a single
/// `Option<Placement>` on [`Task`] rather than three independent options.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Node the task was assigned to.
    pub node: String,

    /// Simulated time the task started running.
    pub start_time: f64,

    /// `start_time + duration`.
    pub end_time: f64,
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// A workload request read from the trace.
///
/// The request fields never change after creation.  `placement` is set
/// exactly once, by [`Node::assign`](crate::cluster::Node::assign).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    // ── Request ───────────────────────────────────────────────────────────────
    /// Unique task identifier.
    pub id: String,

    /// Simulated time at which the task enters the system.
    pub submit_time: f64,

    /// CPU units requested.
    pub cpu: f64,

    /// Number of GPUs requested.
    pub gpu: u32,

    /// Run time once started.
    pub duration: f64,

    // ── Outcome ───────────────────────────────────────────────────────────────
    /// `None` until the task is assigned to a node.
    pub placement: Option<Placement>,
}

impl Task {
    /// Create an unplaced task.
    pub fn new(id: impl Into<String>, submit_time: f64, cpu: f64, gpu: u32, duration: f64) -> Self {
        Self {
            id: id.into(),
            submit_time,
            cpu,
            gpu,
            duration,
            placement: None,
        }
    }

    /// `true` if the task has started and not yet reached its end time at `t`.
    pub fn is_running(&self, t: f64) -> bool {
        self.placement
            .as_ref()
            .is_some_and(|p| p.start_time <= t && t < p.end_time)
    }

    /// `true` once `t` has reached the task's end time.
    pub fn is_completed(&self, t: f64) -> bool {
        self.placement.as_ref().is_some_and(|p| t >= p.end_time)
    }

    pub fn start_time(&self) -> Option<f64> {
        self.placement.as_ref().map(|p| p.start_time)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.placement.as_ref().map(|p| p.end_time)
    }

    pub fn assigned_node(&self) -> Option<&str> {
        self.placement.as_ref().map(|p| p.node.as_str())
    }

    /// `start_time − submit_time`, once placed.
    pub fn wait_time(&self) -> Option<f64> {
        self.start_time().map(|s| s - self.submit_time)
    }

    /// `end_time − submit_time`, once placed.
    pub fn turnaround_time(&self) -> Option<f64> {
        self.end_time().map(|e| e - self.submit_time)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Task {}: CPU={}, GPU={}, Duration={}>",
            self.id, self.cpu, self.gpu, self.duration
        )
    }
}

// ── TaskRecord (archived snapshot) ────────────────────────────────────────────

/// Timing snapshot of a placed task, kept by the metrics recorder.
///
/// Field order matches the columns of `task_log.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    pub id: String,
    pub submit_time: f64,
    pub cpu: f64,
    pub gpu: u32,
    pub duration: f64,
    pub assigned_node: String,
    pub start_time: f64,
    pub end_time: f64,
    pub wait_time: f64,
    pub turnaround_time: f64,
}

impl TaskRecord {
    /// Snapshot a placed task.  Returns `None` if the task has no placement.
    pub fn from_task(task: &Task) -> Option<Self> {
        task.placement.as_ref().map(|p| Self::with_placement(task, p))
    }

    pub(crate) fn with_placement(task: &Task, p: &Placement) -> Self {
        TaskRecord {
            id: task.id.clone(),
            submit_time: task.submit_time,
            cpu: task.cpu,
            gpu: task.gpu,
            duration: task.duration,
            assigned_node: p.node.clone(),
            start_time: p.start_time,
            end_time: p.end_time,
            wait_time: p.start_time - task.submit_time,
            turnaround_time: p.end_time - task.submit_time,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(submit: f64, start: f64, duration: f64) -> Task {
        let mut task = Task::new("t1", submit, 1.0, 0, duration);
        task.placement = Some(Placement {
            node: "n-0".into(),
            start_time: start,
            end_time: start + duration,
        });
        task
    }

    #[test]
    fn unplaced_task_is_neither_running_nor_completed() {
        let task = Task::new("t1", 0.0, 1.0, 0, 10.0);
        assert!(!task.is_running(0.0));
        assert!(!task.is_completed(1_000.0));
        assert_eq!(task.start_time(), None);
        assert_eq!(task.assigned_node(), None);
        assert_eq!(task.wait_time(), None);
    }

    #[test]
    fn running_window_is_half_open() {
        let task = placed(0.0, 5.0, 10.0);
        assert!(!task.is_running(4.9));
        assert!(task.is_running(5.0));
        assert!(task.is_running(14.9));
        assert!(!task.is_running(15.0), "end_time is exclusive");
    }

    #[test]
    fn completed_from_end_time_onwards() {
        let task = placed(0.0, 5.0, 10.0);
        assert!(!task.is_completed(14.9));
        assert!(task.is_completed(15.0));
        assert!(task.is_completed(100.0));
    }

    #[test]
    fn zero_duration_task_completes_at_start() {
        let task = placed(0.0, 3.0, 0.0);
        assert!(!task.is_running(3.0));
        assert!(task.is_completed(3.0));
    }

    #[test]
    fn wait_and_turnaround_are_relative_to_submit() {
        let task = placed(2.0, 5.0, 10.0);
        assert_eq!(task.wait_time(), Some(3.0));
        assert_eq!(task.turnaround_time(), Some(13.0));
    }

    #[test]
    fn record_requires_placement() {
        assert!(TaskRecord::from_task(&Task::new("t", 0.0, 1.0, 0, 1.0)).is_none());

        let rec = TaskRecord::from_task(&placed(2.0, 5.0, 10.0)).unwrap();
        assert_eq!(rec.assigned_node, "n-0");
        assert_eq!(rec.start_time, 5.0);
        assert_eq!(rec.end_time, 15.0);
        assert_eq!(rec.wait_time, 3.0);
        assert_eq!(rec.turnaround_time, 13.0);
    }
}
