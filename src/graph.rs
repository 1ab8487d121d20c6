//! Graph Builder: folds a transaction batch into a directed, weighted,
//! time-annotated multigraph with per-node and per-edge aggregates.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::Transaction;

/// An account node keyed by account id.
#[derive(Debug, Clone)]
pub struct AccountNode {
    pub account_id: String,
    pub total_sent: f64,
    pub total_received: f64,
    pub transaction_count: usize,
    pub timestamps: Vec<DateTime<Utc>>,
    successors: Vec<String>,
    successor_set: HashSet<String>,
    predecessors: Vec<String>,
    predecessor_set: HashSet<String>,
}

impl AccountNode {
    fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            total_sent: 0.0,
            total_received: 0.0,
            transaction_count: 0,
            timestamps: Vec::new(),
            successors: Vec::new(),
            successor_set: HashSet::new(),
            predecessors: Vec::new(),
            predecessor_set: HashSet::new(),
        }
    }

    pub fn in_degree(&self) -> usize {
        self.predecessors.len()
    }

    pub fn out_degree(&self) -> usize {
        self.successors.len()
    }

    fn note_successor(&mut self, to: &str) {
        if self.successor_set.insert(to.to_string()) {
            self.successors.push(to.to_string());
        }
    }

    fn note_predecessor(&mut self, from: &str) {
        if self.predecessor_set.insert(from.to_string()) {
            self.predecessors.push(from.to_string());
        }
    }
}

/// One (amount, timestamp) transfer within a merged edge.
pub type Transfer = (f64, DateTime<Utc>);

/// A directed edge, merged across all transfers for the same ordered pair.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f64,
    pub count: usize,
    pub transfers: Vec<Transfer>,
}

impl Edge {
    fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            weight: 0.0,
            count: 0,
            transfers: Vec::new(),
        }
    }
}

/// The transaction graph. Built once per batch, then read only by the
/// legitimacy classifier and the pattern detectors.
pub struct Graph {
    nodes: HashMap<String, AccountNode>,
    node_order: Vec<String>,
    edges: HashMap<(String, String), Edge>,
}

impl Graph {
    /// Fold a transaction batch into a graph. Self-loops are accepted as
    /// ordinary edges; zero-amount transfers are accepted and contribute to
    /// `count` but not `weight`. Transactions are not deduplicated by id.
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut graph = Graph {
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: HashMap::new(),
        };

        for tx in transactions {
            graph.ensure_node(&tx.sender_id);
            graph.ensure_node(&tx.receiver_id);

            {
                let sender = graph.nodes.get_mut(&tx.sender_id).unwrap();
                sender.total_sent += tx.amount;
                sender.transaction_count += 1;
                sender.timestamps.push(tx.timestamp);
                sender.note_successor(&tx.receiver_id);
            }
            {
                let receiver = graph.nodes.get_mut(&tx.receiver_id).unwrap();
                receiver.total_received += tx.amount;
                receiver.transaction_count += 1;
                receiver.timestamps.push(tx.timestamp);
                receiver.note_predecessor(&tx.sender_id);
            }

            let key = (tx.sender_id.clone(), tx.receiver_id.clone());
            let edge = graph
                .edges
                .entry(key)
                .or_insert_with(|| Edge::new(&tx.sender_id, &tx.receiver_id));
            edge.weight += tx.amount;
            edge.count += 1;
            edge.transfers.push((tx.amount, tx.timestamp));
        }

        graph
    }

    fn ensure_node(&mut self, account_id: &str) {
        if !self.nodes.contains_key(account_id) {
            self.nodes
                .insert(account_id.to_string(), AccountNode::new(account_id));
            self.node_order.push(account_id.to_string());
        }
    }

    /// Account ids in first-seen order, for deterministic detector iteration.
    pub fn node_order(&self) -> &[String] {
        &self.node_order
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, account_id: &str) -> Option<&AccountNode> {
        self.nodes.get(account_id)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.get(&(from.to_string(), to.to_string()))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        // Edge iteration order for the output projection follows node
        // discovery order, then each node's successor discovery order, so
        // it stays stable across runs despite the underlying HashMap.
        self.node_order.iter().flat_map(move |from| {
            let successors = self
                .nodes
                .get(from)
                .map(|n| n.successors.as_slice())
                .unwrap_or(&[]);
            successors
                .iter()
                .filter_map(move |to| self.edges.get(&(from.clone(), to.clone())))
        })
    }

    /// Successors of a node in discovery order (first outgoing transfer to
    /// each distinct receiver wins the position).
    pub fn successors(&self, account_id: &str) -> &[String] {
        self.nodes
            .get(account_id)
            .map(|n| n.successors.as_slice())
            .unwrap_or(&[])
    }

    /// Predecessors of a node in discovery order.
    pub fn predecessors(&self, account_id: &str) -> &[String] {
        self.nodes
            .get(account_id)
            .map(|n| n.predecessors.as_slice())
            .unwrap_or(&[])
    }
}
