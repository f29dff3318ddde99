/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Persists a finished run into a log directory.
//!
//! | File | Content |
//! |---|---|
//! | `summary.log` | one `key: value` line per summary entry, two decimals |
//! | `task_log.csv` | one row per placed task, in placement order |
//! | `cpu_utilization.csv` | `time,cpu_utilization` per tick |
//! | `gpu_utilization.csv` | `time,gpu_utilization` per tick |

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::simulator::Report;
#[cfg(doc)]
use crate::task::TaskRecord;

pub const SUMMARY_FILE: &str = "summary.log";
pub const TASK_LOG_FILE: &str = "task_log.csv";
pub const CPU_UTILIZATION_FILE: &str = "cpu_utilization.csv";
pub const GPU_UTILIZATION_FILE: &str = "gpu_utilization.csv";

/// Column order of `task_log.csv`; matches the field order of [`TaskRecord`].
const TASK_LOG_HEADER: [&str; 10] = [
    "id",
    "submit_time",
    "cpu",
    "gpu",
    "duration",
    "assigned_node",
    "start_time",
    "end_time",
    "wait_time",
    "turnaround_time",
];

#[derive(Serialize)]
struct CpuRow {
    time: f64,
    cpu_utilization: f64,
}

#[derive(Serialize)]
struct GpuRow {
    time: f64,
    gpu_utilization: f64,
}

/// Write all four log files of `report` into `dir`, creating it if needed.
///
/// Without a summary (nothing was placed) `summary.log` is written empty.
pub fn write_logs(dir: &Path, report: &Report) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    write_summary(&dir.join(SUMMARY_FILE), report)?;
    write_csv(&dir.join(TASK_LOG_FILE), &TASK_LOG_HEADER, report.tasks.iter())?;
    write_csv(
        &dir.join(CPU_UTILIZATION_FILE),
        &["time", "cpu_utilization"],
        report.timeline.iter().map(|s| CpuRow {
            time: s.time,
            cpu_utilization: s.cpu_utilization,
        }),
    )?;
    write_csv(
        &dir.join(GPU_UTILIZATION_FILE),
        &["time", "gpu_utilization"],
        report.timeline.iter().map(|s| GpuRow {
            time: s.time,
            gpu_utilization: s.gpu_utilization,
        }),
    )?;

    info!(dir = %dir.display(), algorithm = %report.algorithm, "logs written");
    Ok(())
}

fn write_summary(path: &Path, report: &Report) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    if let Some(summary) = &report.summary {
        for (key, value) in summary.entries() {
            writeln!(file, "{key}: {value:.2}")
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }
    Ok(())
}

/// Write `header` and then `rows`.  The header is written even when there
/// are no rows.
fn write_csv<T, I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(header)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}
