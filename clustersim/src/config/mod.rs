/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Simulation configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! cluster:
//!   num_nodes: 4
//!   node_cpu: 8.0
//!   node_gpu: 2
//! algorithm: best_fit        # best_fit | round_robin | bin_packing
//! trace_file: traces/trace.csv
//! verbose: false
//! logs_dir: logs             # optional
//! fallback_step: 10000.0     # optional
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::strategy::Algorithm;

/// Default time advance when no future event exists.
pub const DEFAULT_FALLBACK_STEP: f64 = 10_000.0;

// ── Cluster shape ─────────────────────────────────────────────────────────────

/// Homogeneous cluster description: `num_nodes` identical nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClusterConfig {
    pub num_nodes: usize,
    pub node_cpu: f64,
    pub node_gpu: u32,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Everything the simulator binary needs to start a run.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    pub cluster: ClusterConfig,

    /// Placement policy.  Unknown names fail to load.
    pub algorithm: Algorithm,

    /// CSV trace to replay.
    pub trace_file: PathBuf,

    /// Step-by-step tracing with a pause after every tick.
    #[serde(default)]
    pub verbose: bool,

    /// Root directory for result logs; a per-algorithm subdirectory is
    /// created below it.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,

    /// Time advance used when neither an arrival nor a completion is ahead.
    #[serde(default = "default_fallback_step")]
    pub fallback_step: f64,
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_fallback_step() -> f64 {
    DEFAULT_FALLBACK_STEP
}

impl SimConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: SimConfig =
            serde_yaml::from_str(content).context("Failed to parse simulation configuration")?;
        anyhow::ensure!(
            config.fallback_step > 0.0,
            "fallback_step must be positive, got {}",
            config.fallback_step
        );
        Ok(config)
    }

    /// Read and parse `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is
    /// structurally invalid, or the algorithm name is unknown.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading simulation configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

        debug!(
            num_nodes = config.cluster.num_nodes,
            node_cpu = config.cluster.node_cpu,
            node_gpu = config.cluster.node_gpu,
            algorithm = %config.algorithm,
            trace_file = %config.trace_file.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Directory the result logs of this run are written to.
    pub fn run_logs_dir(&self) -> PathBuf {
        self.logs_dir.join(self.algorithm.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const FULL: &str = r#"
cluster:
  num_nodes: 4
  node_cpu: 8.0
  node_gpu: 2
algorithm: round_robin
trace_file: traces/alibaba_trace.csv
verbose: true
logs_dir: out
fallback_step: 500.0
"#;

    #[test]
    fn load_full_yaml() {
        let f = yaml_tempfile(FULL);
        let cfg = SimConfig::load_from_file(f.path()).unwrap();

        assert_eq!(
            cfg.cluster,
            ClusterConfig {
                num_nodes: 4,
                node_cpu: 8.0,
                node_gpu: 2
            }
        );
        assert_eq!(cfg.algorithm, Algorithm::RoundRobin);
        assert_eq!(cfg.trace_file, PathBuf::from("traces/alibaba_trace.csv"));
        assert!(cfg.verbose);
        assert_eq!(cfg.fallback_step, 500.0);
        assert_eq!(cfg.run_logs_dir(), PathBuf::from("out/round_robin"));
    }

    #[test]
    fn optional_fields_use_defaults_when_absent() {
        let yaml = r#"
cluster:
  num_nodes: 1
  node_cpu: 4
  node_gpu: 0
algorithm: best_fit
trace_file: t.csv
"#;
        let cfg = SimConfig::from_yaml_str(yaml).unwrap();
        assert!(!cfg.verbose);
        assert_eq!(cfg.logs_dir, PathBuf::from("logs"));
        assert_eq!(cfg.fallback_step, DEFAULT_FALLBACK_STEP);
        assert_eq!(cfg.cluster.node_cpu, 4.0, "integer YAML accepted for cpu");
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let yaml = FULL.replace("round_robin", "first_fit");
        let err = SimConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(
            format!("{err:#}").contains("unknown scheduling algorithm"),
            "got: {err:#}"
        );
    }

    #[test]
    fn non_positive_fallback_step_is_rejected() {
        let yaml = FULL.replace("500.0", "0.0");
        assert!(SimConfig::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn missing_cluster_section_returns_error() {
        assert!(SimConfig::from_yaml_str("algorithm: best_fit\ntrace_file: t.csv\n").is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = SimConfig::load_from_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(SimConfig::load_from_file(f.path()).is_err());
    }
}
