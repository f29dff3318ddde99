/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pluggable node-selection policies.
//!
//! A [`PlacementStrategy`] only *chooses* a node; it receives the cluster by
//! shared reference and cannot change it.  Reserving resources is the
//! [`Scheduler`](crate::scheduler::Scheduler)'s job, which keeps select and
//! assign together in one place.
//!
//! | Algorithm | Picks |
//! |---|---|
//! | `best_fit` | fitting node with the smallest CPU+GPU remainder after placement |
//! | `round_robin` | first fitting node from a cursor that persists across calls |
//! | `bin_packing` | fullest fitting node (occupied CPU+GPU, descending) |
//!
//! Every policy breaks ties by node order, so a given trace always produces
//! the same placements.

mod best_fit;
mod bin_packing;
mod round_robin;

pub use best_fit::BestFit;
pub use bin_packing::BinPacking;
pub use round_robin::RoundRobin;

use std::str::FromStr;

use serde::Deserialize;

use crate::cluster::Cluster;
use crate::scheduler::SchedulerError;
use crate::task::Task;

// ── Strategy trait ────────────────────────────────────────────────────────────

pub trait PlacementStrategy {
    /// Configuration name of the policy (`best_fit`, …).
    fn name(&self) -> &'static str;

    /// Choose a node for `task`, or `None` if no node fits right now.
    ///
    /// `&mut self` is for policy-local state such as the round-robin cursor;
    /// the cluster itself is read-only here.
    fn select_node(&mut self, task: &Task, cluster: &Cluster) -> Option<String>;
}

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// Configured policy name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Algorithm {
    BestFit,
    RoundRobin,
    BinPacking,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::BestFit,
        Algorithm::RoundRobin,
        Algorithm::BinPacking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::BestFit => "best_fit",
            Algorithm::RoundRobin => "round_robin",
            Algorithm::BinPacking => "bin_packing",
        }
    }

    /// Instantiate a fresh policy (round-robin cursor at `n-0`).
    pub fn build(self) -> Box<dyn PlacementStrategy> {
        match self {
            Algorithm::BestFit => Box::new(BestFit),
            Algorithm::RoundRobin => Box::new(RoundRobin::new()),
            Algorithm::BinPacking => Box::new(BinPacking),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "best_fit" => Ok(Algorithm::BestFit),
            "round_robin" => Ok(Algorithm::RoundRobin),
            "bin_packing" => Ok(Algorithm::BinPacking),
            _ => Err(SchedulerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SchedulerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Node;

    /// Nodes pre-loaded with the given (cpu_used, gpu_used), all
    /// with capacity 8 CPU / 2 GPU.
    pub(crate) fn cluster_with_load(loads: &[(f64, u32)]) -> Cluster {
        let nodes = loads
            .iter()
            .enumerate()
            .map(|(i, &(cpu_used, gpu_used))| {
                let mut node = Node::new(format!("n-{i}"), 8.0, 2);
                if cpu_used > 0.0 || gpu_used > 0 {
                    node.assign(Task::new(format!("load-{i}"), 0.0, cpu_used, gpu_used, 1e9), 0.0)
                        .unwrap();
                }
                node
            })
            .collect();
        Cluster::from_nodes(nodes)
    }

    #[test]
    fn algorithm_parses_known_names() {
        assert_eq!("best_fit".parse::<Algorithm>().unwrap(), Algorithm::BestFit);
        assert_eq!("Round_Robin".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!("bin_packing".parse::<Algorithm>().unwrap(), Algorithm::BinPacking);
    }

    #[test]
    fn unknown_algorithm_returns_error() {
        let err = "worst_fit".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownAlgorithm(ref s) if s == "worst_fit"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.to_string().parse::<Algorithm>().unwrap(), algo);
            assert_eq!(algo.build().name(), algo.as_str());
        }
    }

    #[test]
    fn no_strategy_selects_on_empty_cluster() {
        let empty = Cluster::default();
        let task = Task::new("t", 0.0, 1.0, 0, 1.0);
        for algo in Algorithm::ALL {
            assert_eq!(algo.build().select_node(&task, &empty), None, "{algo}");
        }
    }

    #[test]
    fn every_strategy_only_returns_fitting_nodes() {
        // n-0 full on CPU, n-1 full on GPU, n-2 free
        let cluster = cluster_with_load(&[(8.0, 0), (1.0, 2), (0.0, 0)]);
        let task = Task::new("t", 0.0, 2.0, 1, 1.0);
        for algo in Algorithm::ALL {
            let picked = algo.build().select_node(&task, &cluster);
            assert_eq!(picked.as_deref(), Some("n-2"), "{algo}");
        }
    }
}
