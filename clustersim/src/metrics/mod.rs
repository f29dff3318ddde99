/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Utilization sampling and per-task timing statistics.
//!
//! The recorder only ever appends: one [`UtilizationSample`] per tick and one
//! [`TaskRecord`] per placed task.  [`MetricsRecorder::summary`] derives the
//! aggregate figures on demand.

use serde::Serialize;
use tracing::info;

use crate::cluster::Cluster;
use crate::task::TaskRecord;

/// Completions between two progress log lines.
const PROGRESS_EVERY: usize = 100;

// ── Samples ───────────────────────────────────────────────────────────────────

/// Cluster-wide utilization at one tick.  Both fractions are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationSample {
    pub time: f64,
    pub cpu_utilization: f64,
    pub gpu_utilization: f64,
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Aggregate statistics of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub avg_wait_time: f64,
    pub median_wait_time: f64,
    pub avg_turnaround_time: f64,
    pub max_wait_time: f64,
    pub tasks_completed: usize,
    pub avg_cpu_utilization: f64,
    pub avg_gpu_utilization: f64,
}

impl Summary {
    /// `(key, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("avg_wait_time", self.avg_wait_time),
            ("median_wait_time", self.median_wait_time),
            ("avg_turnaround_time", self.avg_turnaround_time),
            ("max_wait_time", self.max_wait_time),
            ("tasks_completed", self.tasks_completed as f64),
            ("avg_cpu_utilization", self.avg_cpu_utilization),
            ("avg_gpu_utilization", self.avg_gpu_utilization),
        ]
    }
}

// ── MetricsRecorder ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MetricsRecorder {
    samples: Vec<UtilizationSample>,
    completed: Vec<TaskRecord>,
    /// Size of the trace, for progress logging only.
    total_tasks: usize,
}

impl MetricsRecorder {
    pub fn new(total_tasks: usize) -> Self {
        Self {
            total_tasks,
            ..Self::default()
        }
    }

    /// Sample aggregate CPU/GPU utilization of `cluster` at `now`.
    ///
    /// A resource with zero total capacity reports `0.0`.
    pub fn record_tick(&mut self, cluster: &Cluster, now: f64) {
        let cpu_total = cluster.total_cpu_capacity();
        let cpu_util = if cpu_total > 0.0 {
            (cpu_total - cluster.total_cpu_available()) / cpu_total
        } else {
            0.0
        };

        let gpu_total = cluster.total_gpu_capacity();
        let gpu_util = if gpu_total > 0 {
            (gpu_total - cluster.total_gpu_available()) as f64 / gpu_total as f64
        } else {
            0.0
        };

        self.samples.push(UtilizationSample {
            time: now,
            cpu_utilization: cpu_util,
            gpu_utilization: gpu_util,
        });
    }

    /// Archive the snapshot of a placed task.
    pub fn record_completion(&mut self, record: TaskRecord) {
        self.completed.push(record);
        let done = self.completed.len();
        if done % PROGRESS_EVERY == 0 || done == self.total_tasks {
            info!("Completed {}/{} tasks", done, self.total_tasks);
        }
    }

    /// Full utilization timeline, in tick order.
    pub fn timeline(&self) -> &[UtilizationSample] {
        &self.samples
    }

    /// Per-task timing table, in placement order.
    pub fn completed(&self) -> &[TaskRecord] {
        &self.completed
    }

    /// Aggregate statistics, or `None` if no task has been placed.
    pub fn summary(&self) -> Option<Summary> {
        if self.completed.is_empty() {
            return None;
        }
        let n = self.completed.len() as f64;

        let mut waits: Vec<f64> = self.completed.iter().map(|r| r.wait_time).collect();
        let avg_wait_time = waits.iter().sum::<f64>() / n;
        let max_wait_time = waits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        waits.sort_by(f64::total_cmp);
        let median_wait_time = median_of_sorted(&waits);

        let avg_turnaround_time =
            self.completed.iter().map(|r| r.turnaround_time).sum::<f64>() / n;

        let (avg_cpu_utilization, avg_gpu_utilization) = if self.samples.is_empty() {
            (0.0, 0.0)
        } else {
            let ticks = self.samples.len() as f64;
            (
                self.samples.iter().map(|s| s.cpu_utilization).sum::<f64>() / ticks,
                self.samples.iter().map(|s| s.gpu_utilization).sum::<f64>() / ticks,
            )
        };

        Some(Summary {
            avg_wait_time,
            median_wait_time,
            avg_turnaround_time,
            max_wait_time,
            tasks_completed: self.completed.len(),
            avg_cpu_utilization,
            avg_gpu_utilization,
        })
    }
}

/// Median of a non-empty sorted slice; mean of the middle pair for even length.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
