//! Binds a [`PlacementStrategy`] to the act of placing a task.
//!
//! [`Scheduler::schedule`] is the only path through which a task gets a node:
//! it asks the strategy for a candidate, resolves it in the cluster and
//! assigns the task there in one call.
//!
//! # Outcomes
//!
//! | Result | Meaning | Caller action |
//! |---|---|---|
//! | `Ok(Assigned { .. })` | task placed, record returned | archive the record |
//! | `Ok(NoFit(task))` | no node fits right now | keep `task` pending, retry next tick |
//! | `Err(SchedulerError)` | strategy broke an invariant | abort the run |
//!
//! # Example
//! ```rust,ignore
//! let mut scheduler = Scheduler::new(Algorithm::BestFit.build());
//! match scheduler.schedule(&mut cluster, task, now)? {
//!     ScheduleOutcome::Assigned { node, record } => metrics.record_completion(record),
//!     ScheduleOutcome::NoFit(task) => pending.push_back(task),
//! }
//! ```

pub mod error;

pub use error::{CapacityShortfall, SchedulerError};

use tracing::debug;

use crate::cluster::Cluster;
use crate::strategy::PlacementStrategy;
use crate::task::{Task, TaskRecord};

/// Result of one placement attempt.
#[derive(Debug)]
pub enum ScheduleOutcome {
    /// The task now occupies `node`.
    Assigned { node: String, record: TaskRecord },

    /// Nothing fits at the moment; ownership of the task is handed back.
    NoFit(Task),
}

pub struct Scheduler {
    strategy: Box<dyn PlacementStrategy>,
}

impl Scheduler {
    pub fn new(strategy: Box<dyn PlacementStrategy>) -> Self {
        Self { strategy }
    }

    /// Name of the bound strategy.
    pub fn algorithm(&self) -> &'static str {
        self.strategy.name()
    }

    /// Try to place `task` at time `now`.
    ///
    /// # Errors
    /// [`SchedulerError::NodeNotFound`] or
    /// [`SchedulerError::CapacityExceeded`] if the strategy returned an
    /// unknown or non-fitting node.
    pub fn schedule(
        &mut self,
        cluster: &mut Cluster,
        task: Task,
        now: f64,
    ) -> Result<ScheduleOutcome, SchedulerError> {
        let Some(node_id) = self.strategy.select_node(&task, cluster) else {
            debug!(task = %task.id, now, "no node fits");
            return Ok(ScheduleOutcome::NoFit(task));
        };

        let record = cluster.get_node_mut(&node_id)?.assign(task, now)?;
        Ok(ScheduleOutcome::Assigned {
            node: node_id,
            record,
        })
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClusterConfig;
    use crate::strategy::Algorithm;

    fn two_node_cluster() -> Cluster {
        Cluster::from_config(&ClusterConfig {
            num_nodes: 2,
            node_cpu: 4.0,
            node_gpu: 0,
        })
    }

    /// Always answers with a fixed node id, fit or not.
    struct Fixed(&'static str);

    impl PlacementStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn select_node(&mut self, _task: &Task, _cluster: &Cluster) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn assigns_selected_node() {
        let mut cluster = two_node_cluster();
        let mut sched = Scheduler::new(Algorithm::BestFit.build());

        let outcome = sched
            .schedule(&mut cluster, Task::new("t1", 0.0, 3.0, 0, 10.0), 2.0)
            .unwrap();
        match outcome {
            ScheduleOutcome::Assigned { node, record } => {
                assert_eq!(node, "n-0");
                assert_eq!(record.start_time, 2.0);
                assert_eq!(record.end_time, 12.0);
            }
            other => panic!("expected Assigned, got {other:?}"),
        }
        assert_eq!(cluster.get_node("n-0").unwrap().cpu_available(), 1.0);
    }

    #[test]
    fn no_fit_hands_task_back_untouched() {
        let mut cluster = two_node_cluster();
        let mut sched = Scheduler::new(Algorithm::RoundRobin.build());

        let outcome = sched
            .schedule(&mut cluster, Task::new("big", 0.0, 5.0, 0, 1.0), 0.0)
            .unwrap();
        match outcome {
            ScheduleOutcome::NoFit(task) => {
                assert_eq!(task.id, "big");
                assert!(task.placement.is_none());
            }
            other => panic!("expected NoFit, got {other:?}"),
        }
        assert_eq!(cluster.total_cpu_available(), 8.0);
    }

    #[test]
    fn unknown_node_from_strategy_is_fatal() {
        let mut cluster = two_node_cluster();
        let mut sched = Scheduler::new(Box::new(Fixed("n-9")));
        let err = sched
            .schedule(&mut cluster, Task::new("t", 0.0, 1.0, 0, 1.0), 0.0)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::NodeNotFound { .. }));
    }

    #[test]
    fn non_fitting_node_from_strategy_is_fatal() {
        let mut cluster = two_node_cluster();
        let mut sched = Scheduler::new(Box::new(Fixed("n-1")));
        let err = sched
            .schedule(&mut cluster, Task::new("t", 0.0, 6.0, 0, 1.0), 0.0)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::CapacityExceeded { .. }));
        assert_eq!(sched.algorithm(), "fixed");
    }
}
