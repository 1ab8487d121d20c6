//! CLI entry point: ingest a CSV transfer batch and print the detection
//! result as JSON.
//!
//! Usage: `mule_detect <path-to-transfers.csv>`

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::time::Instant;

use mule_ring_detector::{detect, ingest, DetectorConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: mule_detect <path-to-transfers.csv>");
        return ExitCode::FAILURE;
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("failed to open {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (transactions, report) = match ingest::ingest(BufReader::new(file)) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("failed to parse {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(accepted = report.accepted, skipped = report.skipped, "ingested transfers");

    let start = Instant::now();
    let mut result = detect(&transactions, &DetectorConfig::default());
    result.summary.processing_time_seconds = start.elapsed().as_secs_f64();

    match serde_json::to_string_pretty(&result) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            ExitCode::FAILURE
        }
    }
}
