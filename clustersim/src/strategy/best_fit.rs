/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use tracing::debug;

use super::PlacementStrategy;
use crate::cluster::Cluster;
use crate::task::Task;

/// Tightest fit: the fitting node whose CPU + GPU remainder after placement
/// is smallest.  The first node with the minimal score wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestFit;

impl PlacementStrategy for BestFit {
    fn name(&self) -> &'static str {
        "best_fit"
    }

    fn select_node(&mut self, task: &Task, cluster: &Cluster) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;

        for node in cluster.all_nodes() {
            if !node.can_fit(task) {
                continue;
            }
            let score = (node.cpu_available() - task.cpu)
                + f64::from(node.gpu_available() - task.gpu);
            // strict `<`: an equal score later in the order never displaces
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((node.id.as_str(), score));
            }
        }

        if let Some((node, score)) = best {
            debug!(task = %task.id, node, remainder = score, "best_fit candidate");
        }
        best.map(|(id, _)| id.to_string())
    }
}
