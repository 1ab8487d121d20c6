//! Legitimacy Classifier: marks likely-benign high-volume accounts so the
//! ring assembler can exempt them from hub/membership-minimum filtering.

use std::collections::HashSet;

use crate::graph::Graph;

const NAME_KEYWORDS: [&str; 6] = ["MERCHANT", "PAYROLL", "SALARY", "CORP", "INC", "LLC"];

/// The set of account ids the ring assembler exempts from being a ring hub
/// or contributing to a ring's minimum-suspicious-member count.
#[derive(Debug, Default)]
pub struct LegitimateSet(HashSet<String>);

impl LegitimateSet {
    #[cfg(test)]
    pub(crate) fn from_ids(ids: &[&str]) -> Self {
        Self(ids.iter().map(|id| id.to_string()).collect())
    }

    pub fn contains(&self, account_id: &str) -> bool {
        self.0.contains(account_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Classify every account in the graph. An account is legitimate if any of
/// the merchant-like degree profile, payroll-like payout uniformity, or
/// name heuristic rules fires.
pub fn classify(graph: &Graph) -> LegitimateSet {
    let mut legitimate = HashSet::new();

    for account_id in graph.node_order() {
        let node = graph.node(account_id).expect("node_order is exhaustive");
        let in_degree = node.in_degree();
        let out_degree = node.out_degree();

        if in_degree > 20 && out_degree <= 2 {
            legitimate.insert(account_id.clone());
            continue;
        }

        if out_degree > 10 && has_uniform_payouts(graph, account_id, out_degree) {
            legitimate.insert(account_id.clone());
            continue;
        }

        if matches_name_heuristic(account_id) {
            legitimate.insert(account_id.clone());
        }
    }

    LegitimateSet(legitimate)
}

fn has_uniform_payouts(graph: &Graph, account_id: &str, out_degree: usize) -> bool {
    let _ = out_degree;
    let mut amounts = Vec::new();
    for successor in graph.successors(account_id) {
        if let Some(edge) = graph.edge(account_id, successor) {
            amounts.extend(edge.transfers.iter().map(|(amount, _)| *amount));
        }
    }

    if amounts.len() < 6 {
        return false;
    }

    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
    if mean == 0.0 {
        return false;
    }
    let variance = amounts.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / amounts.len() as f64;
    let std_dev = variance.sqrt();

    std_dev < 0.1 * mean
}

fn matches_name_heuristic(account_id: &str) -> bool {
    let upper = account_id.to_uppercase();
    NAME_KEYWORDS.iter().any(|kw| upper.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transaction;
    use chrono::{TimeZone, Utc};

    fn tx(from: &str, to: &str, amount: f64, hour: u32) -> Transaction {
        Transaction {
            transaction_id: format!("{from}-{to}-{hour}"),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, hour % 24, 0, 0).unwrap(),
        }
    }

    #[test]
    fn merchant_degree_profile() {
        let mut txs = Vec::new();
        for i in 0..25 {
            txs.push(tx(&format!("CUSTOMER_{i}"), "HUB", 100.0, i));
        }
        let graph = Graph::build(&txs);
        let legit = classify(&graph);
        assert!(legit.contains("HUB"));
    }

    #[test]
    fn payroll_uniform_payouts() {
        let mut txs = Vec::new();
        for i in 0..12 {
            let amount = 2000.0 + (i as f64 % 3.0) * 10.0;
            txs.push(tx("PAYER", &format!("EMP_{i}"), amount, i));
        }
        let graph = Graph::build(&txs);
        let legit = classify(&graph);
        assert!(legit.contains("PAYER"));
    }

    #[test]
    fn name_heuristic_case_insensitive() {
        let txs = vec![tx("A", "merchant_store", 100.0, 0)];
        let graph = Graph::build(&txs);
        let legit = classify(&graph);
        assert!(legit.contains("merchant_store"));
    }

    #[test]
    fn ordinary_account_is_not_legitimate() {
        let txs = vec![tx("A", "B", 100.0, 0)];
        let graph = Graph::build(&txs);
        let legit = classify(&graph);
        assert!(!legit.contains("A"));
        assert!(!legit.contains("B"));
    }
}
