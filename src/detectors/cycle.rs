//! Cycle Detector (spec §4.2): bounded DFS enumeration of simple directed
//! cycles of length `min_length..=max_length`, deduped by vertex set.

use std::collections::HashSet;

use crate::config::DetectorConfig;
use crate::graph::Graph;

#[derive(Debug, Clone)]
pub struct CycleMatch {
    /// The cycle's member accounts, in first-discovered path order.
    pub members: Vec<String>,
}

/// Enumerate cycles starting from every node in discovery order. A
/// vertex-set (sorted, unordered) dedup key means only the first path
/// found over a given set of accounts is kept, even if another distinct
/// edge ordering over the same accounts exists.
pub fn detect(graph: &Graph, config: &DetectorConfig) -> Vec<CycleMatch> {
    let mut cycles = Vec::new();
    let mut visited_cycles: HashSet<Vec<String>> = HashSet::new();

    for start in graph.node_order() {
        let mut path = vec![start.clone()];
        walk(graph, config, start, &mut path, 1, &mut visited_cycles, &mut cycles);
    }

    cycles
}

fn walk(
    graph: &Graph,
    config: &DetectorConfig,
    start: &str,
    path: &mut Vec<String>,
    depth: usize,
    visited_cycles: &mut HashSet<Vec<String>>,
    cycles: &mut Vec<CycleMatch>,
) {
    if depth > config.max_cycle_length {
        return;
    }

    let current = path.last().expect("path always has the start node").clone();
    for neighbor in graph.successors(&current).to_vec() {
        if neighbor == start && path.len() >= config.min_cycle_length {
            let mut canonical = path.clone();
            canonical.sort();
            if visited_cycles.insert(canonical) {
                cycles.push(CycleMatch {
                    members: path.clone(),
                });
            }
        } else if !path.contains(&neighbor) && depth < config.max_cycle_length {
            path.push(neighbor);
            walk(graph, config, start, path, depth + 1, visited_cycles, cycles);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn finds_triangle_cycle() {
        let txs = vec![tx("A", "B", 0), tx("B", "C", 1), tx("C", "A", 2)];
        let graph = Graph::build(&txs);
        let cycles = detect(&graph, &DetectorConfig::default());
        assert_eq!(cycles.len(), 1);
        let mut members = cycles[0].members.clone();
        members.sort();
        assert_eq!(members, vec!["A", "B", "C"]);
    }

    #[test]
    fn no_cycle_in_acyclic_chain() {
        let txs = vec![tx("A", "B", 0), tx("B", "C", 1)];
        let graph = Graph::build(&txs);
        let cycles = detect(&graph, &DetectorConfig::default());
        assert!(cycles.is_empty());
    }

    #[test]
    fn two_cycles_same_vertex_set_collapse_to_one() {
        // A->B->C->A and A->C->B->A share the vertex set {A,B,C}; only the
        // first-discovered path survives the canonicalization dedup.
        let txs = vec![
            tx("A", "B", 0),
            tx("B", "C", 1),
            tx("C", "A", 2),
            tx("A", "C", 3),
            tx("C", "B", 4),
            tx("B", "A", 5),
        ];
        let graph = Graph::build(&txs);
        let cycles = detect(&graph, &DetectorConfig::default());
        assert_eq!(cycles.len(), 1);
    }

    #[test]
    fn respects_min_and_max_length() {
        let txs = vec![tx("A", "B", 0), tx("B", "A", 1)];
        let graph = Graph::build(&txs);
        let cycles = detect(&graph, &DetectorConfig::default());
        assert!(cycles.is_empty(), "2-cycles are below min_cycle_length");
    }
}
