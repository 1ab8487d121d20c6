//! Projection (spec §4.9): the final result object, sorted and rounded for
//! a caller that serializes it straight to JSON.

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::scoring::{FraudRing, PatternType, SuspiciousAccount};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousAccountView {
    pub account_id: String,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<String>,
    pub ring_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudRingView {
    pub ring_id: String,
    pub member_accounts: Vec<String>,
    pub pattern_type: PatternType,
    pub risk_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_accounts_analyzed: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    pub processing_time_seconds: f64,
    /// Caller-supplied narrative commentary; the core never populates this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub total_sent: f64,
    pub total_received: f64,
    pub transaction_count: usize,
    pub is_suspicious: bool,
    pub suspicion_score: f64,
    pub ring_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub suspicious_accounts: Vec<SuspiciousAccountView>,
    pub fraud_rings: Vec<FraudRingView>,
    pub summary: Summary,
    pub graph_data: GraphData,
}

/// Build the final result from the graph and the ring assembler's output.
/// `processing_time_seconds` is filled in by the caller after timing the
/// call; the core reports 0.0 since it has no clock access.
pub fn build(graph: &Graph, rings: Vec<FraudRing>, accounts: Vec<SuspiciousAccount>) -> DetectionResult {
    let mut suspicious_accounts: Vec<SuspiciousAccountView> = accounts
        .into_iter()
        .map(|a| SuspiciousAccountView {
            account_id: a.account_id,
            suspicion_score: a.suspicion_score,
            detected_patterns: a.detected_patterns.into_iter().collect(),
            ring_id: a.ring_ids.first().cloned(),
        })
        .collect();
    suspicious_accounts.sort_by(|a, b| {
        b.suspicion_score
            .partial_cmp(&a.suspicion_score)
            .expect("suspicion scores are always finite")
    });

    let fraud_rings: Vec<FraudRingView> = rings
        .into_iter()
        .map(|r| FraudRingView {
            ring_id: r.ring_id,
            member_accounts: r.member_accounts,
            pattern_type: r.pattern_type,
            risk_score: r.risk_score,
        })
        .collect();

    let nodes: Vec<GraphNode> = graph
        .node_order()
        .iter()
        .map(|id| {
            let node = graph.node(id).expect("node_order is exhaustive");
            let overlay = suspicious_accounts.iter().find(|a| &a.account_id == id);
            let ring_ids = overlay
                .map(|_| ring_ids_for(&fraud_rings, id))
                .unwrap_or_default();
            GraphNode {
                id: id.clone(),
                total_sent: round2(node.total_sent),
                total_received: round2(node.total_received),
                transaction_count: node.transaction_count,
                is_suspicious: overlay.is_some(),
                suspicion_score: overlay.map(|a| a.suspicion_score).unwrap_or(0.0),
                ring_ids,
            }
        })
        .collect();

    let edges: Vec<GraphEdge> = graph
        .edges()
        .map(|e| GraphEdge {
            source: e.from.clone(),
            target: e.to.clone(),
            weight: round2(e.weight),
            count: e.count,
        })
        .collect();

    let summary = Summary {
        total_accounts_analyzed: graph.node_count(),
        suspicious_accounts_flagged: suspicious_accounts.len(),
        fraud_rings_detected: fraud_rings.len(),
        processing_time_seconds: 0.0,
        ai_insight: None,
    };

    DetectionResult {
        suspicious_accounts,
        fraud_rings,
        summary,
        graph_data: GraphData { nodes, edges },
    }
}

fn ring_ids_for(rings: &[FraudRingView], account_id: &str) -> Vec<String> {
    rings
        .iter()
        .filter(|r| r.member_accounts.iter().any(|m| m == account_id))
        .map(|r| r.ring_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RingAssembler;
    use crate::Transaction;
    use chrono::{TimeZone, Utc};

    fn tx(from: &str, to: &str, hour: u32) -> Transaction {
        Transaction {
            transaction_id: format!("{from}-{to}"),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount: 100.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn sorts_suspicious_accounts_descending() {
        let txs = vec![tx("A", "B", 0), tx("B", "C", 1), tx("C", "A", 2)];
        let graph = Graph::build(&txs);
        let mut assembler = RingAssembler::new();
        assembler.process_cycles(
            &[crate::detectors::CycleMatch {
                members: vec!["A".into(), "B".into(), "C".into()],
            }],
            &crate::legitimacy::LegitimateSet::default(),
        );
        let (rings, accounts) = assembler.finish();
        let result = build(&graph, rings, accounts);
        assert_eq!(result.summary.total_accounts_analyzed, 3);
        assert_eq!(result.summary.fraud_rings_detected, 1);
        for pair in result.suspicious_accounts.windows(2) {
            assert!(pair[0].suspicion_score >= pair[1].suspicion_score);
        }
    }

    #[test]
    fn graph_data_rounds_to_two_decimals() {
        let txs = vec![Transaction {
            transaction_id: "T1".into(),
            sender_id: "A".into(),
            receiver_id: "B".into(),
            amount: 100.005,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }];
        let graph = Graph::build(&txs);
        let result = build(&graph, Vec::new(), Vec::new());
        let edge = &result.graph_data.edges[0];
        assert_eq!(edge.weight, round2(100.005));
    }
}
