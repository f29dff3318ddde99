/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The discrete-event loop.
//!
//! # Tick order
//!
//! Every call to [`Simulator::step`] runs exactly one tick at `current_time`:
//!
//! 1. release completions (`end_time ≤ now`) on every node
//! 2. record a utilization sample
//! 3. admit every trace task with `submit_time ≤ now` into the pending queue
//! 4. one FCFS pass over the pending queue: placed tasks are archived, the
//!    rest stay queued in their original order
//! 5. advance time to the next arrival or the next completion, whichever
//!    comes first; with neither ahead, advance by the fallback step
//!
//! The run is [`SimState::Done`] once the trace is exhausted, the pending
//! queue is empty and no node has an occupying task.
//!
//! # Unschedulable tasks
//! A task larger than every node stays pending forever and time keeps moving
//! by the fallback step.  The loop does not detect this and never aborts on
//! its own; callers that need a bound drive [`step`](Simulator::step)
//! themselves.

pub mod observer;

pub use observer::{SimObserver, SteppingObserver};

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cluster::Cluster;
use crate::config::DEFAULT_FALLBACK_STEP;
use crate::metrics::{MetricsRecorder, Summary, UtilizationSample};
use crate::scheduler::{ScheduleOutcome, Scheduler, SchedulerError};
use crate::task::{Task, TaskRecord};

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Done,
}

/// Everything a finished run hands to persistence and plotting.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub algorithm: String,
    /// `None` when no task was ever placed.
    pub summary: Option<Summary>,
    pub tasks: Vec<TaskRecord>,
    pub timeline: Vec<UtilizationSample>,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

pub struct Simulator {
    cluster: Cluster,
    scheduler: Scheduler,
    metrics: MetricsRecorder,

    /// Not yet arrived, sorted by `submit_time`.
    arrivals: VecDeque<Task>,
    /// Arrived but unplaced, FCFS.
    pending: VecDeque<Task>,

    current_time: f64,
    fallback_step: f64,
    ticks: u64,
    stalled: bool,

    observer: Option<Box<dyn SimObserver>>,
}

impl Simulator {
    /// Prepare a run over `tasks`.
    ///
    /// Tasks are stably sorted by `submit_time`, so equal submit times keep
    /// their trace order.  Time starts at `0.0`.
    pub fn new(cluster: Cluster, scheduler: Scheduler, mut tasks: Vec<Task>) -> Self {
        tasks.sort_by(|a, b| a.submit_time.total_cmp(&b.submit_time));
        info!(
            algorithm = scheduler.algorithm(),
            task_count = tasks.len(),
            node_count = cluster.len(),
            "simulator initialised"
        );

        Self {
            metrics: MetricsRecorder::new(tasks.len()),
            cluster,
            scheduler,
            arrivals: tasks.into(),
            pending: VecDeque::new(),
            current_time: 0.0,
            fallback_step: DEFAULT_FALLBACK_STEP,
            ticks: 0,
            stalled: false,
            observer: None,
        }
    }

    /// Time advance used when no arrival or completion lies ahead.
    pub fn with_fallback_step(mut self, step: f64) -> Self {
        self.fallback_step = step;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn SimObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.arrivals.is_empty() && self.pending.is_empty() && !self.cluster.has_running_tasks()
    }

    pub fn state(&self) -> SimState {
        if self.is_finished() {
            SimState::Done
        } else {
            SimState::Running
        }
    }

    // ── Loop ──────────────────────────────────────────────────────────────────

    /// Run ticks until the terminal state and return the report.
    ///
    /// Does not return for a workload with a permanently unschedulable task.
    ///
    /// # Errors
    /// Propagates the fatal [`SchedulerError`]s of [`step`](Self::step).
    pub fn run(mut self) -> Result<Report, SchedulerError> {
        while self.step()? == SimState::Running {}

        info!(
            ticks = self.ticks,
            end_time = self.current_time,
            "All tasks processed. Simulation complete"
        );
        match self.metrics.summary() {
            Some(summary) => {
                for (key, value) in summary.entries() {
                    info!("  - {key}: {value:.2}");
                }
            }
            None => warn!("No task was placed; summary is empty"),
        }
        Ok(self.into_report())
    }

    /// Execute one tick and report the resulting state.  A no-op returning
    /// `Done` once the run has finished.
    ///
    /// # Errors
    /// [`SchedulerError::CapacityExceeded`] / [`SchedulerError::NodeNotFound`]
    /// when the strategy breaks its contract.  The tick is abandoned at that
    /// point: time does not advance and every task not yet tried stays in
    /// the pending queue in its original order.
    pub fn step(&mut self) -> Result<SimState, SchedulerError> {
        if self.is_finished() {
            return Ok(SimState::Done);
        }
        let now = self.current_time;

        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_tick_start(now, &self.cluster);
        }

        // 1. completions
        let released = self.cluster.release_resources(now);
        if let Some(obs) = self.observer.as_deref_mut() {
            for task in &released {
                obs.on_task_released(task, now);
            }
        }

        // 2. utilization sample
        self.metrics.record_tick(&self.cluster, now);

        // 3. arrivals
        while self.arrivals.front().is_some_and(|t| t.submit_time <= now) {
            let Some(task) = self.arrivals.pop_front() else {
                break;
            };
            debug!(task = %task.id, now, "task arrived");
            if let Some(obs) = self.observer.as_deref_mut() {
                obs.on_task_arrived(&task, now);
            }
            self.pending.push_back(task);
        }

        // 4. one FCFS scheduling pass
        let mut queue = std::mem::take(&mut self.pending).into_iter();
        while let Some(task) = queue.next() {
            let outcome = match self.scheduler.schedule(&mut self.cluster, task, now) {
                Ok(outcome) => outcome,
                Err(e) => {
                    // untried tasks go back behind the deferred ones; the
                    // offending task is consumed by the failed assignment
                    self.pending.extend(queue);
                    return Err(e);
                }
            };
            match outcome {
                ScheduleOutcome::Assigned { record, .. } => {
                    self.stalled = false;
                    if let Some(obs) = self.observer.as_deref_mut() {
                        obs.on_task_assigned(&record);
                    }
                    self.metrics.record_completion(record);
                }
                ScheduleOutcome::NoFit(task) => {
                    if let Some(obs) = self.observer.as_deref_mut() {
                        obs.on_task_deferred(&task, now);
                    }
                    self.pending.push_back(task);
                }
            }
        }

        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_tick_end(now, &self.cluster);
        }

        self.ticks += 1;
        if self.is_finished() {
            return Ok(SimState::Done);
        }

        // 5. time advance
        self.advance_time();
        Ok(SimState::Running)
    }

    fn advance_time(&mut self) {
        let next_arrival = self.arrivals.front().map(|t| t.submit_time);
        let next_completion = self.cluster.next_completion_after(self.current_time);

        let next = match (next_arrival, next_completion) {
            (Some(a), Some(c)) => Some(a.min(c)),
            (a, c) => a.or(c),
        };

        match next {
            Some(t) => self.current_time = t,
            None => {
                if !self.pending.is_empty() && !self.stalled {
                    warn!(
                        pending = self.pending.len(),
                        now = self.current_time,
                        step = self.fallback_step,
                        "no future event but tasks still pending; advancing by fallback step"
                    );
                    self.stalled = true;
                }
                self.current_time += self.fallback_step;
            }
        }
    }

    /// Consume the simulator and package its results.
    pub fn into_report(self) -> Report {
        let summary = self.metrics.summary();
        Report {
            algorithm: self.scheduler.algorithm().to_string(),
            summary,
            tasks: self.metrics.completed().to_vec(),
            timeline: self.metrics.timeline().to_vec(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
