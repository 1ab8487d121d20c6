//! # Mule Ring Detector
//!
//! A graph-based money-muling fraud ring detector.
//!
//! Given a batch of financial transfers, this crate builds a directed
//! weighted multigraph, runs four independent pattern detectors (circular
//! fund routing, aggregation and dispersion smurfing, layered shell
//! chains), exempts structurally benign high-volume accounts from hub
//! eligibility, and assembles the surviving hits into scored fraud rings
//! and per-account suspicion records.
//!
//! The crate is a pure function of its input: [`detect`] takes a batch and
//! a [`DetectorConfig`] and returns a complete [`DetectionResult`]. It does
//! not parse CSV on its own behalf, serve HTTP, persist state, or generate
//! narrative commentary — see [`ingest`] for the CSV boundary this crate
//! does provide, and [`projection::Summary::ai_insight`] for the hook a
//! caller can fill in with an externally generated explanation.

pub mod config;
pub mod detectors;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod legitimacy;
pub mod projection;
pub mod scoring;
pub mod temporal;

pub use config::DetectorConfig;
pub use error::DetectionError;
pub use projection::DetectionResult;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use graph::Graph;
use scoring::RingAssembler;

/// A single transfer between two accounts, already parsed. Callers reading
/// from CSV should go through [`ingest::ingest`]; other callers construct
/// these directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Run the full detection pipeline over a transaction batch.
///
/// An empty batch is not an error: it returns a result with zeroed
/// counters. Detector hits are folded into rings in the fixed order
/// cycles → fan-in → fan-out → shell, so ring ids are stable for a fixed
/// input order regardless of whether the `parallel` feature runs the
/// detectors concurrently.
pub fn detect(transactions: &[Transaction], config: &DetectorConfig) -> DetectionResult {
    tracing::debug!(transactions = transactions.len(), "building graph");
    let graph = Graph::build(transactions);

    let legitimate = legitimacy::classify(&graph);
    tracing::debug!(legitimate_accounts = legitimate.len(), "classified legitimacy");

    #[cfg(feature = "parallel")]
    let (cycles, fan_in, fan_out, shell) = {
        std::thread::scope(|scope| {
            let cycle_handle = scope.spawn(|| detectors::cycle::detect(&graph, config));
            let fan_in_handle = scope.spawn(|| detectors::fan::detect_fan_in(&graph, config));
            let fan_out_handle = scope.spawn(|| detectors::fan::detect_fan_out(&graph, config));
            let shell_handle = scope.spawn(|| detectors::shell::detect(&graph, config));
            (
                cycle_handle.join().expect("cycle detector panicked"),
                fan_in_handle.join().expect("fan-in detector panicked"),
                fan_out_handle.join().expect("fan-out detector panicked"),
                shell_handle.join().expect("shell detector panicked"),
            )
        })
    };

    #[cfg(not(feature = "parallel"))]
    let (cycles, fan_in, fan_out, shell) = (
        detectors::cycle::detect(&graph, config),
        detectors::fan::detect_fan_in(&graph, config),
        detectors::fan::detect_fan_out(&graph, config),
        detectors::shell::detect(&graph, config),
    );

    tracing::debug!(
        cycles = cycles.len(),
        fan_in = fan_in.len(),
        fan_out = fan_out.len(),
        shell = shell.len(),
        "detector hits"
    );

    let mut assembler = RingAssembler::new();
    assembler.process_cycles(&cycles, &legitimate);
    assembler.process_fan_in(&fan_in, &legitimate);
    assembler.process_fan_out(&fan_out, &legitimate);
    assembler.process_shell(&shell, &legitimate);
    let (rings, accounts) = assembler.finish();

    tracing::info!(rings = rings.len(), suspicious_accounts = accounts.len(), "analysis complete");

    projection::build(&graph, rings, accounts)
}
