//! Shell-Chain Detector (spec §4.5): layered chains of low-activity
//! ("thin") intermediary accounts.

use std::collections::HashSet;

use crate::config::DetectorConfig;
use crate::graph::Graph;

#[derive(Debug, Clone)]
pub struct ShellMatch {
    /// The chain's member accounts, root first.
    pub members: Vec<String>,
}

/// Walk outward from every thin node in discovery order, extending through
/// successors that are themselves thin and not already on the path. A root
/// is marked visited only once its own walk fully completes, so it can
/// still be threaded through as an interior node of a chain rooted earlier.
pub fn detect(graph: &Graph, config: &DetectorConfig) -> Vec<ShellMatch> {
    let mut chains = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();

    for node in graph.node_order() {
        let tx_count = graph.node(node).expect("node_order is exhaustive").transaction_count;
        if tx_count <= config.shell_max_transactions {
            let mut path = vec![node.clone()];
            walk(graph, config, &mut path, &visited, &mut chains);
            visited.insert(node.clone());
        }
    }

    chains
}

fn walk(
    graph: &Graph,
    config: &DetectorConfig,
    path: &mut Vec<String>,
    visited: &HashSet<String>,
    chains: &mut Vec<ShellMatch>,
) {
    let current = path.last().expect("path always has the root").clone();
    for successor in graph.successors(&current).to_vec() {
        if path.contains(&successor) || visited.contains(&successor) {
            continue;
        }
        let tx_count = graph
            .node(&successor)
            .expect("successor is a graph node")
            .transaction_count;
        if tx_count > config.shell_max_transactions {
            continue;
        }

        path.push(successor);
        // min_chain_length counts hops (edges), not members, so a path of N
        // members has reached the threshold once N - 1 >= min_chain_length.
        if path.len() > config.shell_min_chain_length {
            chains.push(ShellMatch {
                members: path.clone(),
            });
        }
        walk(graph, config, path, visited, chains);
        path.pop();
    }
}
