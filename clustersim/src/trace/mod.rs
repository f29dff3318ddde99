/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Simulator trace CSV: `id,submit_time,cpu,gpu,duration`.
//!
//! Reading is skip-and-continue.  A row that does not parse, carries a
//! negative or non-finite value, or repeats an earlier id is logged with
//! `warn!` and dropped; the rest of the file is still loaded.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::task::Task;

/// One trace row as it appears on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    pub id: String,
    pub submit_time: f64,
    pub cpu: f64,
    pub gpu: u32,
    pub duration: f64,
}

impl TraceRow {
    /// Reason the row cannot become a task, if any.
    fn rejection(&self) -> Option<String> {
        if self.id.is_empty() {
            return Some("empty id".to_string());
        }
        [
            ("submit_time", self.submit_time),
            ("cpu", self.cpu),
            ("duration", self.duration),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
        .map(|(name, v)| format!("{name} = {v}"))
    }
}

impl From<TraceRow> for Task {
    fn from(row: TraceRow) -> Self {
        Task::new(row.id, row.submit_time, row.cpu, row.gpu, row.duration)
    }
}

impl From<&Task> for TraceRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            submit_time: task.submit_time,
            cpu: task.cpu,
            gpu: task.gpu,
            duration: task.duration,
        }
    }
}

/// Load the trace at `path`.
///
/// # Errors
/// Only when the file cannot be opened or its header cannot be read; bad
/// rows are skipped.
pub fn load_trace(path: &Path) -> Result<Vec<Task>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open trace file: {}", path.display()))?;
    let tasks = read_trace(file)
        .with_context(|| format!("Failed to read trace file: {}", path.display()))?;
    info!(path = %path.display(), tasks = tasks.len(), "trace loaded");
    Ok(tasks)
}

/// Parse trace rows from any reader, in file order.
pub fn read_trace<R: Read>(reader: R) -> Result<Vec<Task>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.headers().context("Trace has no readable header row")?;

    let mut seen = HashSet::new();
    let mut tasks = Vec::new();
    let mut skipped = 0usize;

    for (idx, result) in rdr.deserialize::<TraceRow>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "skipping malformed trace row");
                skipped += 1;
                continue;
            }
        };
        if let Some(reason) = row.rejection() {
            warn!(line, id = %row.id, %reason, "skipping invalid trace row");
            skipped += 1;
            continue;
        }
        if !seen.insert(row.id.clone()) {
            warn!(line, id = %row.id, "skipping duplicate task id");
            skipped += 1;
            continue;
        }
        tasks.push(Task::from(row));
    }

    if skipped > 0 {
        warn!(skipped, kept = tasks.len(), "trace rows skipped");
    }
    Ok(tasks)
}

/// Write `tasks` as a trace CSV, creating or truncating `path`.
pub fn write_trace(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create trace file: {}", path.display()))?;
    // written even for an empty trace
    wtr.write_record(["id", "submit_time", "cpu", "gpu", "duration"])
        .with_context(|| format!("Failed to write header to {}", path.display()))?;
    for task in tasks {
        wtr.serialize(TraceRow::from(task))
            .with_context(|| format!("Failed to write task {} to {}", task.id, path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to flush trace file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn reads_well_formed_rows_in_file_order() {
        let csv = "id,submit_time,cpu,gpu,duration\n\
                   b,5,1.5,0,10\n\
                   a,0,2,1,3.25\n";
        let tasks = read_trace(csv.as_bytes()).unwrap();

        assert_eq!(ids(&tasks), vec!["b", "a"], "loader keeps file order");
        assert_eq!(tasks[1], Task::new("a", 0.0, 2.0, 1, 3.25));
        assert!(tasks.iter().all(|t| t.placement.is_none()));
    }

    #[test]
    fn tolerates_whitespace_around_fields() {
        let csv = "id, submit_time, cpu, gpu, duration\n t1 , 1 , 2 , 0 , 3 \n";
        let tasks = read_trace(csv.as_bytes()).unwrap();
        assert_eq!(tasks, vec![Task::new("t1", 1.0, 2.0, 0, 3.0)]);
    }

    #[test]
    fn skips_malformed_and_invalid_rows() {
        let csv = "id,submit_time,cpu,gpu,duration\n\
                   ok1,0,1,0,1\n\
                   bad-number,zero,1,0,1\n\
                   neg-gpu,0,1,-1,1\n\
                   neg-cpu,0,-1,0,1\n\
                   neg-dur,0,1,0,-5\n\
                   nan-submit,NaN,1,0,1\n\
                   inf-dur,0,1,0,inf\n\
                   short,0,1\n\
                   ok2,1,1,0,1\n";
        let tasks = read_trace(csv.as_bytes()).unwrap();
        assert_eq!(ids(&tasks), vec!["ok1", "ok2"]);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let csv = "id,submit_time,cpu,gpu,duration\n\
                   t,0,1,0,1\n\
                   t,9,9,0,9\n";
        let tasks = read_trace(csv.as_bytes()).unwrap();
        assert_eq!(tasks, vec![Task::new("t", 0.0, 1.0, 0, 1.0)]);
    }

    #[test]
    fn empty_input_yields_no_tasks() {
        let tasks = read_trace("".as_bytes()).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn load_from_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "id,submit_time,cpu,gpu,duration").unwrap();
        writeln!(f, "x,1,1,0,1").unwrap();
        let tasks = load_trace(f.path()).unwrap();
        assert_eq!(ids(&tasks), vec!["x"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_trace(Path::new("/nonexistent/trace.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/trace.csv"));
    }

    #[test]
    fn written_trace_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        let tasks = vec![
            Task::new("a", 0.0, 1.5, 0, 10.0),
            Task::new("b", 2.5, 4.0, 2, 0.0),
        ];
        write_trace(&path, &tasks).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("id,submit_time,cpu,gpu,duration\n"));
        assert_eq!(load_trace(&path).unwrap(), tasks);
    }

    #[test]
    fn empty_trace_is_written_with_header() {
        let file = NamedTempFile::new().unwrap();
        write_trace(file.path(), &[]).unwrap();
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "id,submit_time,cpu,gpu,duration\n"
        );
        assert!(load_trace(file.path()).unwrap().is_empty());
    }
}
