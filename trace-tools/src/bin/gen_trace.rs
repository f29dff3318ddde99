/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! gen-trace – write a seeded synthetic clustersim trace.
//!
//! ```text
//! gen-trace --tasks 500 --seed 7 --output traces/synthetic.csv
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use trace_tools::synthetic::{self, WorkloadSpec};

#[derive(Debug, Parser)]
#[command(name = "gen-trace", about = "Generate a synthetic trace for clustersim")]
struct Cli {
    /// Number of tasks.
    #[arg(short = 'n', long = "tasks", default_value_t = 1_000)]
    tasks: usize,

    /// RNG seed; the same seed reproduces the same file.
    #[arg(short = 's', long = "seed", default_value_t = 42)]
    seed: u64,

    /// Destination trace file.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Mean gap between arrivals (0 submits everything at t=0).
    #[arg(long = "mean-interarrival", default_value_t = 5.0)]
    mean_interarrival: f64,

    #[arg(long = "cpu-min", default_value_t = 0.5)]
    cpu_min: f64,

    #[arg(long = "cpu-max", default_value_t = 8.0)]
    cpu_max: f64,

    /// Fraction of tasks that request GPUs.
    #[arg(long = "gpu-probability", default_value_t = 0.2)]
    gpu_probability: f64,

    #[arg(long = "gpu-max", default_value_t = 2)]
    gpu_max: u32,

    #[arg(long = "duration-min", default_value_t = 10.0)]
    duration_min: f64,

    #[arg(long = "duration-max", default_value_t = 600.0)]
    duration_max: f64,
}

impl Cli {
    fn workload(&self) -> WorkloadSpec {
        WorkloadSpec {
            tasks: self.tasks,
            seed: self.seed,
            mean_interarrival: self.mean_interarrival,
            cpu_min: self.cpu_min,
            cpu_max: self.cpu_max,
            gpu_probability: self.gpu_probability,
            gpu_max: self.gpu_max,
            duration_min: self.duration_min,
            duration_max: self.duration_max,
        }
    }
}

fn run(cli: &Cli) -> Result<usize> {
    let tasks = synthetic::generate(&cli.workload())?;
    clustersim::trace::write_trace(&cli.output, &tasks)?;
    Ok(tasks.len())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(n) => info!(seed = cli.seed, "Wrote {} task(s) to {}", n, cli.output.display()),
        Err(e) => {
            error!("Trace generation failed: {:#}", e);
            process::exit(1);
        }
    }
}
