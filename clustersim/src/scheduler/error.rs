/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the simulation engine.
//!
//! Two types model the two failure layers:
//!
//! * [`CapacityShortfall`] – why a single node could not take a single task
//!   (low-level, carries exact resource values).
//! * [`SchedulerError`] – fatal failure surfaced from
//!   [`Scheduler::schedule()`](super::Scheduler::schedule) and the simulator.
//!
//! "No node fits right now" is **not** an error: it is the
//! [`ScheduleOutcome::NoFit`](super::ScheduleOutcome::NoFit) variant and the
//! task is simply retried on a later tick.  Every variant below is either a
//! broken invariant (a strategy picked a node that does not fit, or one that
//! does not exist) or a configuration mistake.

use thiserror::Error;

// ── Capacity check ────────────────────────────────────────────────────────────

/// Which resource was short when a node refused a task.
#[derive(Debug, Clone, PartialEq)]
pub enum CapacityShortfall {
    /// Requested CPU exceeds the node's available CPU.
    InsufficientCpu { requested: f64, available: f64 },

    /// Requested GPUs exceed the node's available GPUs.
    InsufficientGpu { requested: u32, available: u32 },
}

impl std::fmt::Display for CapacityShortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityShortfall::InsufficientCpu {
                requested,
                available,
            } => write!(
                f,
                "task requests {} CPU but node only has {} available",
                requested, available
            ),

            CapacityShortfall::InsufficientGpu {
                requested,
                available,
            } => write!(
                f,
                "task requests {} GPU(s) but node only has {} available",
                requested, available
            ),
        }
    }
}

// ── Top-level errors ──────────────────────────────────────────────────────────

/// Fatal error type of the engine.
///
/// | Variant | Cause |
/// |---|---|
/// | `CapacityExceeded` | strategy returned a node that cannot fit the task |
/// | `NodeNotFound` | strategy returned an id that is not in the cluster |
/// | `UnknownAlgorithm` | configuration names an algorithm that does not exist |
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A task was assigned to a node without enough free resources.
    #[error("node '{node}' cannot accommodate task '{task}': {reason}")]
    CapacityExceeded {
        task: String,
        node: String,
        reason: CapacityShortfall,
    },

    /// A node id was looked up that the cluster does not contain.
    #[error("node '{node}' not found in cluster")]
    NodeNotFound { node: String },

    /// The algorithm name is not recognised.
    #[error("unknown scheduling algorithm: '{0}' (valid: best_fit, round_robin, bin_packing)")]
    UnknownAlgorithm(String),
}
