/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! A single cluster member: fixed capacity, live availability and the tasks
//! currently occupying it.
//!
//! # Invariant
//! For every node, `capacity − available` equals the sum of the requests of
//! the occupying tasks, per resource.  [`Node::assign`] and
//! [`Node::release_completed`] are the only two mutators and each moves a
//! task across the occupying-set boundary together with its resources.

use tracing::debug;

use crate::scheduler::{CapacityShortfall, SchedulerError};
use crate::task::{Placement, Task, TaskRecord};

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub cpu_capacity: f64,
    pub gpu_capacity: u32,
    cpu_available: f64,
    gpu_available: u32,
    /// Occupying tasks.  Order carries no meaning.
    running: Vec<Task>,
}

impl Node {
    /// Create a node with full availability.
    pub fn new(id: impl Into<String>, cpu_capacity: f64, gpu_capacity: u32) -> Self {
        Self {
            id: id.into(),
            cpu_capacity,
            gpu_capacity,
            cpu_available: cpu_capacity,
            gpu_available: gpu_capacity,
            running: Vec::new(),
        }
    }

    pub fn cpu_available(&self) -> f64 {
        self.cpu_available
    }

    pub fn gpu_available(&self) -> u32 {
        self.gpu_available
    }

    /// Tasks currently occupying this node.
    pub fn running_tasks(&self) -> &[Task] {
        &self.running
    }

    /// Occupied amount, CPU and GPU summed: the bin-packing fullness key.
    pub fn occupied(&self) -> f64 {
        (self.cpu_capacity - self.cpu_available)
            + f64::from(self.gpu_capacity - self.gpu_available)
    }

    /// `true` iff both requested resources fit in what is available now.
    pub fn can_fit(&self, task: &Task) -> bool {
        self.shortfall(task).is_none()
    }

    fn shortfall(&self, task: &Task) -> Option<CapacityShortfall> {
        if task.cpu > self.cpu_available {
            return Some(CapacityShortfall::InsufficientCpu {
                requested: task.cpu,
                available: self.cpu_available,
            });
        }
        if task.gpu > self.gpu_available {
            return Some(CapacityShortfall::InsufficientGpu {
                requested: task.gpu,
                available: self.gpu_available,
            });
        }
        None
    }

    /// Place `task` on this node at time `now`.
    ///
    /// Reserves the requested resources, stamps the placement on the task and
    /// moves it into the occupying set.  Returns the snapshot that the
    /// metrics recorder archives.
    ///
    /// # Errors
    /// [`SchedulerError::CapacityExceeded`] if the task does not fit.  The
    /// caller is expected to have checked [`can_fit`](Self::can_fit); hitting
    /// this is a broken strategy, not a full cluster.
    pub fn assign(&mut self, mut task: Task, now: f64) -> Result<TaskRecord, SchedulerError> {
        if let Some(reason) = self.shortfall(&task) {
            return Err(SchedulerError::CapacityExceeded {
                task: task.id,
                node: self.id.clone(),
                reason,
            });
        }

        self.cpu_available -= task.cpu;
        self.gpu_available -= task.gpu;
        let placement = Placement {
            node: self.id.clone(),
            start_time: now,
            end_time: now + task.duration,
        };
        let record = TaskRecord::with_placement(&task, &placement);
        task.placement = Some(placement);

        debug!(
            task = %task.id,
            node = %self.id,
            cpu_left = self.cpu_available,
            gpu_left = self.gpu_available,
            "task assigned"
        );

        self.running.push(task);
        Ok(record)
    }

    /// Release every occupying task that has completed by `now` and return
    /// them.
    ///
    /// A released task leaves the occupying set, so a second call at the same
    /// or a later time cannot credit its resources again.
    pub fn release_completed(&mut self, now: f64) -> Vec<Task> {
        let (done, still_running): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.running)
            .into_iter()
            .partition(|t| t.is_completed(now));
        self.running = still_running;

        for task in &done {
            // Clamp: repeated float add/sub must not leave availability
            // outside [0, capacity].
            self.cpu_available = (self.cpu_available + task.cpu).min(self.cpu_capacity);
            self.gpu_available = self.gpu_available.saturating_add(task.gpu).min(self.gpu_capacity);
            debug!(task = %task.id, node = %self.id, now, "task released");
        }
        if self.running.is_empty() {
            self.cpu_available = self.cpu_capacity;
            self.gpu_available = self.gpu_capacity;
        }

        done
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Node {}: CPU {}/{}, GPU {}/{}>",
            self.id, self.cpu_available, self.cpu_capacity, self.gpu_available, self.gpu_capacity
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
