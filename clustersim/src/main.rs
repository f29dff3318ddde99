/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use clustersim::cluster::Cluster;
use clustersim::config::SimConfig;
use clustersim::report;
use clustersim::scheduler::Scheduler;
use clustersim::simulator::{SimObserver, Simulator, SteppingObserver};
use clustersim::strategy::Algorithm;
use clustersim::trace;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Replay a task trace against a simulated cluster.
///
/// Example:
///   clustersim --config config.yaml --algorithm bin_packing --no-logs
#[derive(Debug, Parser)]
#[command(
    name = "clustersim",
    about = "Trace-driven cluster scheduling simulator",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML run configuration.
    #[arg(short = 'c', long = "config", default_value = "config.yaml")]
    config: PathBuf,

    /// Placement policy; overrides `algorithm` from the config file.
    #[arg(short = 'a', long = "algorithm")]
    algorithm: Option<Algorithm>,

    /// Trace CSV; overrides `trace_file` from the config file.
    #[arg(short = 't', long = "trace")]
    trace: Option<PathBuf>,

    /// Root directory for result logs; overrides `logs_dir`.
    #[arg(short = 'l', long = "logs-dir")]
    logs_dir: Option<PathBuf>,

    /// Log every tick; implies the config file's `verbose`.
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,

    /// In verbose mode, do not wait for Enter between ticks.
    #[arg(long = "no-pause", default_value_t = false)]
    no_pause: bool,

    /// Skip writing the log directory.
    #[arg(long = "no-logs", default_value_t = false)]
    no_logs: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        error!("Simulation failed: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // ── Configuration ─────────────────────────────────────────────────────────
    let mut config = SimConfig::load_from_file(&cli.config)?;
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(trace) = cli.trace {
        config.trace_file = trace;
    }
    if let Some(logs_dir) = cli.logs_dir {
        config.logs_dir = logs_dir;
    }
    config.verbose |= cli.verbose;

    info!(
        num_nodes = config.cluster.num_nodes,
        node_cpu  = config.cluster.node_cpu,
        node_gpu  = config.cluster.node_gpu,
        algorithm = %config.algorithm,
        trace     = %config.trace_file.display(),
        verbose   = config.verbose,
        "Configuration"
    );

    // ── Trace ─────────────────────────────────────────────────────────────────
    let tasks = trace::load_trace(&config.trace_file)?;
    if tasks.is_empty() {
        warn!("Trace contains no usable tasks");
    }

    // ── Simulation ────────────────────────────────────────────────────────────
    let cluster = Cluster::from_config(&config.cluster);
    let scheduler = Scheduler::new(config.algorithm.build());
    let mut simulator =
        Simulator::new(cluster, scheduler, tasks).with_fallback_step(config.fallback_step);

    if config.verbose {
        let observer: Box<dyn SimObserver> = if cli.no_pause {
            Box::new(SteppingObserver::<std::io::Empty>::log_only())
        } else {
            Box::new(SteppingObserver::interactive())
        };
        simulator = simulator.with_observer(observer);
    }

    let report = simulator
        .run()
        .with_context(|| format!("{} run aborted", config.algorithm))?;

    // ── Persistence ───────────────────────────────────────────────────────────
    if cli.no_logs {
        info!("Log output disabled");
    } else {
        report::write_logs(&config.run_logs_dir(), &report)?;
    }
    Ok(())
}
