//! CSV ingestion boundary (spec §6): parses a transaction batch from CSV,
//! skipping malformed rows rather than failing the whole file.
//!
//! This mirrors the source's `pandas.read_csv(..., on_bad_lines='skip')`
//! policy: a row that fails to parse is dropped and counted, not fatal.

use std::io::Read;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DetectionError;
use crate::Transaction;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const REQUIRED_COLUMNS: [&str; 5] = [
    "transaction_id",
    "sender_id",
    "receiver_id",
    "amount",
    "timestamp",
];

#[derive(Debug, Deserialize)]
struct Row {
    transaction_id: String,
    sender_id: String,
    receiver_id: String,
    amount: String,
    timestamp: String,
}

/// Outcome of an ingestion pass: the parsed transactions plus a count of
/// rows that were skipped for malformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub skipped: usize,
}

/// Parse a CSV document into a transaction batch. Returns
/// [`DetectionError::MalformedInput`] only if the header is missing one of
/// the five required columns; individual bad rows are silently skipped and
/// reflected in the returned [`IngestReport`].
pub fn ingest<R: Read>(reader: R) -> Result<(Vec<Transaction>, IngestReport), DetectionError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    {
        let headers = csv_reader
            .headers()
            .map_err(|e| DetectionError::MalformedInput(e.to_string()))?;
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(DetectionError::MalformedInput(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }
    }

    let mut transactions = Vec::new();
    let mut skipped = 0usize;

    for record in csv_reader.deserialize::<Row>() {
        let row = match record {
            Ok(row) => row,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        match parse_row(row) {
            Some(tx) => transactions.push(tx),
            None => skipped += 1,
        }
    }

    let accepted = transactions.len();
    Ok((transactions, IngestReport { accepted, skipped }))
}

fn parse_row(row: Row) -> Option<Transaction> {
    let amount: f64 = row.amount.trim().parse().ok()?;
    if amount < 0.0 {
        return None;
    }
    let timestamp = NaiveDateTime::parse_from_str(row.timestamp.trim(), TIMESTAMP_FORMAT).ok()?;

    Some(Transaction {
        transaction_id: row.transaction_id,
        sender_id: row.sender_id,
        receiver_id: row.receiver_id,
        amount,
        timestamp: timestamp.and_utc(),
    })
}
