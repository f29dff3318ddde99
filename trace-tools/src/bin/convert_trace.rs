/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! convert-trace – raw Alibaba instance table → clustersim trace CSV.
//!
//! ```text
//! convert-trace --input raw/raw_trace_alibaba.csv --output traces/alibaba_trace.csv
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use trace_tools::alibaba::{self, DEFAULT_MAX_DURATION};

#[derive(Debug, Parser)]
#[command(name = "convert-trace", about = "Convert a raw Alibaba trace for clustersim")]
struct Cli {
    /// Raw instance table (CSV with header).
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Destination trace file.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Drop instances that ran longer than this.
    #[arg(long = "max-duration", default_value_t = DEFAULT_MAX_DURATION)]
    max_duration: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match alibaba::convert_file(&cli.input, &cli.output, cli.max_duration) {
        Ok(stats) => {
            info!("Wrote {} task(s) to {}", stats.written, cli.output.display());
            if stats.skipped() > 0 {
                warn!(
                    malformed = stats.malformed,
                    too_long = stats.too_long,
                    negative = stats.negative,
                    "Skipped {} row(s)",
                    stats.skipped()
                );
            }
        }
        Err(e) => {
            error!("Conversion failed: {:#}", e);
            process::exit(1);
        }
    }
}
