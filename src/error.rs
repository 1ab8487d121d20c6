//! Error types surfaced by the detection core and its ingestion boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors the detection engine can surface to a caller.
///
/// Per the engine's contract, malformed rows are skipped at the ingestion
/// boundary rather than failing the whole batch, and an empty batch is not
/// an error at all (`detect` just returns a zeroed result). `Internal`
/// represents a consistency violation that should be unreachable for any
/// input that respects the documented invariants.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum DetectionError {
    #[error("malformed transaction record: {0}")]
    MalformedInput(String),

    #[error("internal consistency violation: {0}")]
    Internal(String),
}
