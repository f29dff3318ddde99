/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The fixed set of nodes a run schedules onto.
//!
//! Nodes are stored in a `Vec` and never reordered, so every traversal sees
//! `n-0, n-1, …` in the same order.  Strategies rely on that order for
//! deterministic tie-breaking.

mod node;

pub use node::Node;

use tracing::info;

use crate::config::ClusterConfig;
use crate::scheduler::SchedulerError;
use crate::task::Task;

#[derive(Debug, Clone, Default)]
pub struct Cluster {
    nodes: Vec<Node>,
}

impl Cluster {
    /// Build `num_nodes` identical nodes named `n-0 … n-{N-1}`.
    pub fn from_config(config: &ClusterConfig) -> Self {
        let nodes: Vec<Node> = (0..config.num_nodes)
            .map(|i| Node::new(format!("n-{i}"), config.node_cpu, config.node_gpu))
            .collect();
        info!(
            node_count = nodes.len(),
            node_cpu = config.node_cpu,
            node_gpu = config.node_gpu,
            "cluster initialised"
        );
        Self { nodes }
    }

    /// Build a cluster from explicit nodes.  Ids must be unique.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
                ids.sort_unstable();
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate node ids"
        );
        Self { nodes }
    }

    /// All nodes, in their fixed order.
    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    ///
    /// # Errors
    /// [`SchedulerError::NodeNotFound`].  Strategies only ever return ids
    /// taken from this cluster, so this is an invariant violation.
    pub fn get_node(&self, id: &str) -> Result<&Node, SchedulerError> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| SchedulerError::NodeNotFound {
                node: id.to_string(),
            })
    }

    pub fn get_node_mut(&mut self, id: &str) -> Result<&mut Node, SchedulerError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| SchedulerError::NodeNotFound {
                node: id.to_string(),
            })
    }

    /// Release completed tasks on every node; returns everything released.
    pub fn release_resources(&mut self, now: f64) -> Vec<Task> {
        self.nodes
            .iter_mut()
            .flat_map(|n| n.release_completed(now))
            .collect()
    }

    /// `true` while any node still has an occupying task.
    pub fn has_running_tasks(&self) -> bool {
        self.nodes.iter().any(|n| !n.running_tasks().is_empty())
    }

    /// Earliest end time strictly after `t` among occupying tasks.
    pub fn next_completion_after(&self, t: f64) -> Option<f64> {
        self.nodes
            .iter()
            .flat_map(|n| n.running_tasks())
            .filter_map(Task::end_time)
            .filter(|&end| end > t)
            .min_by(f64::total_cmp)
    }

    // ── Aggregates ────────────────────────────────────────────────────────────

    pub fn total_cpu_capacity(&self) -> f64 {
        self.nodes.iter().map(|n| n.cpu_capacity).sum()
    }

    pub fn total_cpu_available(&self) -> f64 {
        self.nodes.iter().map(|n| n.cpu_available()).sum()
    }

    pub fn total_gpu_capacity(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.gpu_capacity)).sum()
    }

    pub fn total_gpu_available(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.gpu_available())).sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
