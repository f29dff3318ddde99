/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Raw Alibaba instance table → simulator trace.
//!
//! Only six columns of the raw table are read; any others are ignored:
//!
//! ```text
//! instance_sn, creation_time, scheduled_time, deletion_time, cpu_request, gpu_request
//! ```
//!
//! Each kept row becomes
//! `id = instance_sn, submit_time = scheduled_time, duration = deletion_time − scheduled_time`.
//! `creation_time` must parse but is otherwise unused.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use clustersim::trace::TraceRow;

/// Rows running longer than this are dropped by default.
pub const DEFAULT_MAX_DURATION: f64 = 300_000.0;

#[derive(Debug, Deserialize)]
struct RawInstance {
    instance_sn: String,
    #[allow(dead_code)]
    creation_time: f64,
    scheduled_time: f64,
    deletion_time: f64,
    cpu_request: f64,
    gpu_request: u32,
}

/// Row counts of one conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub written: usize,
    pub malformed: usize,
    pub too_long: usize,
    /// Deleted before being scheduled.
    pub negative: usize,
}

impl ConvertStats {
    pub fn skipped(&self) -> usize {
        self.malformed + self.too_long + self.negative
    }
}

/// Stream `input` to `output`, writing the trace header first.
pub fn convert<R: Read, W: Write>(input: R, output: W, max_duration: f64) -> Result<ConvertStats> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    // header is written explicitly so that an empty table still yields one
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    wtr.write_record(["id", "submit_time", "cpu", "gpu", "duration"])
        .context("Failed to write trace header")?;

    let mut stats = ConvertStats::default();
    for result in rdr.deserialize::<RawInstance>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "skipping malformed raw row");
                stats.malformed += 1;
                continue;
            }
        };

        let duration = raw.deletion_time - raw.scheduled_time;
        if !duration.is_finite() || !raw.cpu_request.is_finite() {
            stats.malformed += 1;
            continue;
        }
        if duration > max_duration {
            stats.too_long += 1;
            continue;
        }
        if duration < 0.0 {
            stats.negative += 1;
            continue;
        }

        wtr.serialize(TraceRow {
            id: raw.instance_sn,
            submit_time: raw.scheduled_time,
            cpu: raw.cpu_request,
            gpu: raw.gpu_request,
            duration,
        })
        .context("Failed to write trace row")?;
        stats.written += 1;
    }

    wtr.flush().context("Failed to flush trace output")?;
    Ok(stats)
}

/// [`convert`] between two files.
pub fn convert_file(input: &Path, output: &Path, max_duration: f64) -> Result<ConvertStats> {
    let src = File::open(input)
        .with_context(|| format!("Failed to open raw trace: {}", input.display()))?;
    let dst = File::create(output)
        .with_context(|| format!("Failed to create trace file: {}", output.display()))?;

    let stats = convert(src, dst, max_duration)
        .with_context(|| format!("Conversion of {} failed", input.display()))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        written = stats.written,
        skipped = stats.skipped(),
        "trace converted"
    );
    Ok(stats)
}
