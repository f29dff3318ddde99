/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! clustersim – trace-driven cluster scheduling simulator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task.rs         – Task, Placement, TaskRecord
//! ├── cluster/        – Node resource accounting and the node collection
//! ├── strategy/       – PlacementStrategy trait + best_fit / round_robin / bin_packing
//! ├── scheduler/      – strategy → node assignment, SchedulerError
//! ├── metrics/        – utilization timeline and summary statistics
//! ├── simulator/      – the tick loop and its observer hooks
//! ├── config/         – YAML run configuration
//! ├── trace/          – trace CSV input
//! └── report/         – log directory output
//! ```

pub mod cluster;
pub mod config;
pub mod metrics;
pub mod report;
pub mod scheduler;
pub mod simulator;
pub mod strategy;
pub mod task;
pub mod trace;
