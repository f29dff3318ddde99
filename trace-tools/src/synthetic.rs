/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Seeded synthetic workloads.
//!
//! Arrivals follow a Poisson process (exponential inter-arrival gaps).  CPU
//! requests are drawn in half-core steps, GPU requests are zero unless the
//! task is picked as a GPU task, and durations are uniform in a range.  The
//! same [`WorkloadSpec`] always produces the same trace.

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use clustersim::task::Task;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSpec {
    pub tasks: usize,
    pub seed: u64,
    pub mean_interarrival: f64,
    /// Inclusive, in cores.
    pub cpu_min: f64,
    pub cpu_max: f64,
    /// Probability that a task requests GPUs at all.
    pub gpu_probability: f64,
    /// Upper bound for a GPU task's request; lower bound is 1.
    pub gpu_max: u32,
    /// Inclusive range.
    pub duration_min: f64,
    pub duration_max: f64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            tasks: 1_000,
            seed: 42,
            mean_interarrival: 5.0,
            cpu_min: 0.5,
            cpu_max: 8.0,
            gpu_probability: 0.2,
            gpu_max: 2,
            duration_min: 10.0,
            duration_max: 600.0,
        }
    }
}

impl WorkloadSpec {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.mean_interarrival >= 0.0 && self.mean_interarrival.is_finite(),
            "mean inter-arrival must be a finite non-negative number"
        );
        ensure!(
            self.cpu_min >= 0.0 && self.cpu_min <= self.cpu_max && self.cpu_max.is_finite(),
            "cpu range {}..={} is invalid",
            self.cpu_min,
            self.cpu_max
        );
        ensure!(
            (0.0..=1.0).contains(&self.gpu_probability),
            "gpu probability {} is outside [0, 1]",
            self.gpu_probability
        );
        ensure!(
            self.gpu_probability == 0.0 || self.gpu_max >= 1,
            "gpu_max must be at least 1 when GPU tasks are requested"
        );
        ensure!(
            self.duration_min >= 0.0
                && self.duration_min <= self.duration_max
                && self.duration_max.is_finite(),
            "duration range {}..={} is invalid",
            self.duration_min,
            self.duration_max
        );
        Ok(())
    }
}

/// Generate `spec.tasks` tasks named `task-0`, `task-1`, … with
/// non-decreasing submit times starting at `0.0`.
pub fn generate(spec: &WorkloadSpec) -> Result<Vec<Task>> {
    spec.validate()?;
    let mut rng = StdRng::seed_from_u64(spec.seed);

    // CPU in half-core steps
    let cpu_lo = (spec.cpu_min * 2.0).ceil() as u64;
    let cpu_hi = ((spec.cpu_max * 2.0).floor() as u64).max(cpu_lo);

    let mut now = 0.0_f64;
    let mut tasks = Vec::with_capacity(spec.tasks);
    for k in 0..spec.tasks {
        if k > 0 && spec.mean_interarrival > 0.0 {
            let u: f64 = rng.random();
            now += -spec.mean_interarrival * (1.0 - u).ln();
        }

        let cpu = rng.random_range(cpu_lo..=cpu_hi) as f64 / 2.0;
        let gpu = if spec.gpu_probability > 0.0 && rng.random_bool(spec.gpu_probability) {
            rng.random_range(1..=spec.gpu_max)
        } else {
            0
        };
        let duration = if spec.duration_max > spec.duration_min {
            rng.random_range(spec.duration_min..=spec.duration_max)
        } else {
            spec.duration_min
        };

        tasks.push(Task::new(format!("task-{k}"), round3(now), cpu, gpu, round3(duration)));
    }

    debug!(tasks = tasks.len(), seed = spec.seed, "synthetic workload generated");
    Ok(tasks)
}

/// Millisecond resolution keeps the CSV readable.
fn round3(x: f64) -> f64 {
    (x * 1_000.0).round() / 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> WorkloadSpec {
        WorkloadSpec {
            tasks: 200,
            seed,
            ..WorkloadSpec::default()
        }
    }

    #[test]
    fn same_seed_same_trace() {
        assert_eq!(generate(&small(7)).unwrap(), generate(&small(7)).unwrap());
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(generate(&small(1)).unwrap(), generate(&small(2)).unwrap());
    }

    #[test]
    fn respects_ranges_and_ordering() {
        let spec = small(3);
        let tasks = generate(&spec).unwrap();
        assert_eq!(tasks.len(), 200);
        assert_eq!(tasks[0].submit_time, 0.0);

        for (k, t) in tasks.iter().enumerate() {
            assert_eq!(t.id, format!("task-{k}"));
            assert!((spec.cpu_min..=spec.cpu_max).contains(&t.cpu), "{t}");
            assert_eq!((t.cpu * 2.0).fract(), 0.0, "half-core step: {t}");
            assert!(t.gpu <= spec.gpu_max);
            assert!(t.duration >= spec.duration_min && t.duration <= spec.duration_max);
        }
        assert!(tasks.windows(2).all(|w| w[0].submit_time <= w[1].submit_time));
    }

    #[test]
    fn cpu_only_workload() {
        let spec = WorkloadSpec {
            gpu_probability: 0.0,
            gpu_max: 0,
            ..small(9)
        };
        assert!(generate(&spec).unwrap().iter().all(|t| t.gpu == 0));
    }

    #[test]
    fn zero_interarrival_is_a_burst() {
        let spec = WorkloadSpec {
            mean_interarrival: 0.0,
            ..small(4)
        };
        assert!(generate(&spec).unwrap().iter().all(|t| t.submit_time == 0.0));
    }

    #[test]
    fn fixed_duration() {
        let spec = WorkloadSpec {
            duration_min: 30.0,
            duration_max: 30.0,
            ..small(5)
        };
        assert!(generate(&spec).unwrap().iter().all(|t| t.duration == 30.0));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let spec = WorkloadSpec {
            cpu_min: 4.0,
            cpu_max: 1.0,
            ..small(0)
        };
        assert!(generate(&spec).is_err());

        let spec = WorkloadSpec {
            gpu_probability: 1.5,
            ..small(0)
        };
        assert!(generate(&spec).is_err());
    }

    #[test]
    fn generated_trace_survives_the_csv_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        let tasks = generate(&small(11)).unwrap();

        clustersim::trace::write_trace(&path, &tasks).unwrap();
        assert_eq!(clustersim::trace::load_trace(&path).unwrap(), tasks);
    }
}
