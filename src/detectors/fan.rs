//! Fan-In and Fan-Out Detectors (spec §4.3-4.4): smurfing via aggregation
//! or dispersion across many counterparties within a time window.

use crate::config::DetectorConfig;
use crate::graph::Graph;
use crate::temporal;

#[derive(Debug, Clone)]
pub struct FanMatch {
    pub account: String,
    /// Counterparts (senders for fan-in, receivers for fan-out) in
    /// discovery order.
    pub counterparts: Vec<String>,
}

/// Detect hubs whose distinct predecessors number at least `fan_threshold`
/// and whose combined incoming transfers cluster temporally.
pub fn detect_fan_in(graph: &Graph, config: &DetectorConfig) -> Vec<FanMatch> {
    detect(graph, config, |g, node| g.predecessors(node), |g, node, counterpart| {
        g.edge(counterpart, node)
    })
}

/// Detect hubs whose distinct successors number at least `fan_threshold`
/// and whose combined outgoing transfers cluster temporally.
pub fn detect_fan_out(graph: &Graph, config: &DetectorConfig) -> Vec<FanMatch> {
    detect(graph, config, |g, node| g.successors(node), |g, node, counterpart| {
        g.edge(node, counterpart)
    })
}

fn detect<'g>(
    graph: &'g Graph,
    config: &DetectorConfig,
    counterparts_of: impl Fn(&'g Graph, &str) -> &'g [String],
    edge_between: impl Fn(&'g Graph, &str, &str) -> Option<&'g crate::graph::Edge>,
) -> Vec<FanMatch> {
    let mut matches = Vec::new();

    for node in graph.node_order() {
        let counterparts = counterparts_of(graph, node);
        if counterparts.len() < config.fan_threshold {
            continue;
        }

        let mut transfers = Vec::new();
        for counterpart in counterparts {
            if let Some(edge) = edge_between(graph, node, counterpart) {
                transfers.extend(edge.transfers.iter().copied());
            }
        }

        if temporal::is_clustered(&transfers, config.temporal_window_hours) {
            matches.push(FanMatch {
                account: node.clone(),
                counterparts: counterparts.to_vec(),
            });
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transaction;
    use chrono::{TimeZone, Utc};

    fn tx(from: &str, to: &str, hour: u32) -> Transaction {
        Transaction {
            transaction_id: format!("{from}-{to}-{hour}"),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount: 1000.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(hour as i64),
        }
    }

    #[test]
    fn fan_in_at_threshold_is_detected() {
        let txs: Vec<_> = (0..10).map(|i| tx(&format!("S{i}"), "H", i)).collect();
        let graph = Graph::build(&txs);
        let hits = detect_fan_in(&graph, &DetectorConfig::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].account, "H");
        assert_eq!(hits[0].counterparts.len(), 10);
    }

    #[test]
    fn fan_in_below_threshold_is_not_detected() {
        let txs: Vec<_> = (0..9).map(|i| tx(&format!("S{i}"), "H", i)).collect();
        let graph = Graph::build(&txs);
        let hits = detect_fan_in(&graph, &DetectorConfig::default());
        assert!(hits.is_empty());
    }

    #[test]
    fn fan_out_at_threshold_is_detected() {
        let txs: Vec<_> = (0..10).map(|i| tx("H", &format!("R{i}"), i)).collect();
        let graph = Graph::build(&txs);
        let hits = detect_fan_out(&graph, &DetectorConfig::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].account, "H");
    }

    #[test]
    fn fan_in_outside_temporal_window_is_not_detected() {
        let txs: Vec<_> = (0..10).map(|i| tx(&format!("S{i}"), "H", i * 100)).collect();
        let graph = Graph::build(&txs);
        let hits = detect_fan_in(&graph, &DetectorConfig::default());
        assert!(hits.is_empty());
    }
}
