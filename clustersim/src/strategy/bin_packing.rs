/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use tracing::debug;

use super::PlacementStrategy;
use crate::cluster::{Cluster, Node};
use crate::task::Task;

/// Fullest-first packing: nodes are ranked by occupied CPU + GPU, descending,
/// and the first fitting one is chosen.
///
/// `sort_by` is stable, so equally full nodes keep their cluster order.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinPacking;

impl PlacementStrategy for BinPacking {
    fn name(&self) -> &'static str {
        "bin_packing"
    }

    fn select_node(&mut self, task: &Task, cluster: &Cluster) -> Option<String> {
        let mut ranked: Vec<&Node> = cluster.all_nodes().iter().collect();
        ranked.sort_by(|a, b| b.occupied().total_cmp(&a.occupied()));

        let node = ranked.into_iter().find(|n| n.can_fit(task))?;
        debug!(task = %task.id, node = %node.id, occupied = node.occupied(), "bin_packing pick");
        Some(node.id.clone())
    }
}
