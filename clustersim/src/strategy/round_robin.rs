/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use tracing::debug;

use super::PlacementStrategy;
use crate::cluster::Cluster;
use crate::task::Task;

/// Cursor-based rotation over the node list.
///
/// Each call examines at most `N` nodes starting at the cursor and moves the
/// cursor forward by one (mod `N`) for every node it looks at, whether that
/// node fits or not.  A call that finds nothing has examined all `N` nodes
/// and leaves the cursor where it started.
#[derive(Debug, Default, Clone)]
pub struct RoundRobin {
    cursor: usize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next node to examine.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl PlacementStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn select_node(&mut self, task: &Task, cluster: &Cluster) -> Option<String> {
        let nodes = cluster.all_nodes();
        let n = nodes.len();
        if n == 0 {
            return None;
        }
        // the node list never changes size, but keep the cursor valid anyway
        self.cursor %= n;

        for _ in 0..n {
            let node = &nodes[self.cursor];
            self.cursor = (self.cursor + 1) % n;
            if node.can_fit(task) {
                debug!(task = %task.id, node = %node.id, next = self.cursor, "round_robin pick");
                return Some(node.id.clone());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::cluster_with_load;

    #[test]
    fn rotates_through_all_fitting_nodes() {
        let cluster = cluster_with_load(&[(0.0, 0); 3]);
        let task = Task::new("t", 0.0, 1.0, 0, 1.0);
        let mut rr = RoundRobin::new();

        let picks: Vec<String> = (0..6)
            .map(|_| rr.select_node(&task, &cluster).unwrap())
            .collect();
        assert_eq!(picks, vec!["n-0", "n-1", "n-2", "n-0", "n-1", "n-2"]);
    }

    #[test]
    fn cursor_advances_past_skipped_nodes() {
        // n-0 and n-1 are full; n-2, n-3 free
        let cluster = cluster_with_load(&[(8.0, 0), (8.0, 0), (0.0, 0), (0.0, 0)]);
        let task = Task::new("t", 0.0, 1.0, 0, 1.0);
        let mut rr = RoundRobin::new();

        assert_eq!(rr.select_node(&task, &cluster).as_deref(), Some("n-2"));
        assert_eq!(rr.cursor(), 3, "three nodes examined");
        assert_eq!(rr.select_node(&task, &cluster).as_deref(), Some("n-3"));
        assert_eq!(rr.cursor(), 0, "wraps modulo node count");
    }

    #[test]
    fn failed_scan_visits_every_node_and_returns_to_start() {
        let cluster = cluster_with_load(&[(8.0, 0); 3]);
        let task = Task::new("t", 0.0, 1.0, 0, 1.0);
        let mut rr = RoundRobin { cursor: 2 };

        assert_eq!(rr.select_node(&task, &cluster), None);
        assert_eq!(rr.cursor(), 2);
    }
}
