//! Ring Assembler & Scorer (spec §4.8): filters detector hits by the
//! legitimacy mask, allocates ring ids in fixed order, and aggregates
//! per-account suspicion scores from the union of triggered tags.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::detectors::{CycleMatch, FanMatch, ShellMatch};
use crate::legitimacy::LegitimateSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Cycle,
    FanIn,
    FanOut,
    ShellNetwork,
}

impl PatternType {
    fn base_score(self) -> i64 {
        match self {
            PatternType::Cycle => 85,
            PatternType::FanIn => 75,
            PatternType::FanOut => 75,
            PatternType::ShellNetwork => 80,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FraudRing {
    pub ring_id: String,
    pub member_accounts: Vec<String>,
    pub pattern_type: PatternType,
    pub risk_score: f64,
}

#[derive(Debug)]
pub struct SuspiciousAccount {
    pub account_id: String,
    pub suspicion_score: f64,
    pub detected_patterns: HashSet<String>,
    pub ring_ids: Vec<String>,
}

fn tag_weight(tag: &str) -> i64 {
    match tag {
        "cycle_length_3" => 30,
        "cycle_length_4" => 25,
        "cycle_length_5" => 20,
        "smurfing_aggregation" => 25,
        "smurfing_dispersion" => 25,
        "high_velocity" => 20,
        "layered_shell" => 25,
        "low_transaction_intermediary" => 15,
        _ => 10,
    }
}

/// Accumulates rings and the per-account suspicious record map across the
/// fixed cycles → fan-in → fan-out → shell processing order.
#[derive(Default)]
pub struct RingAssembler {
    rings: Vec<FraudRing>,
    accounts: HashMap<String, SuspiciousAccount>,
    account_order: Vec<String>,
    ring_counter: u32,
}

impl RingAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_cycles(&mut self, matches: &[CycleMatch], legitimate: &LegitimateSet) {
        for m in matches {
            let suspicious_count = m.members.iter().filter(|a| !legitimate.contains(a)).count();
            if suspicious_count < 2 {
                continue;
            }
            let tag = format!("cycle_length_{}", m.members.len());
            self.add_ring(m.members.clone(), PatternType::Cycle, &[tag]);
        }
    }

    pub fn process_fan_in(&mut self, matches: &[FanMatch], legitimate: &LegitimateSet) {
        for m in matches {
            if legitimate.contains(&m.account) {
                continue;
            }
            let mut members = vec![m.account.clone()];
            members.extend(m.counterparts.iter().take(5).cloned());
            self.add_ring(
                members,
                PatternType::FanIn,
                &["smurfing_aggregation".to_string(), "high_velocity".to_string()],
            );
        }
    }

    pub fn process_fan_out(&mut self, matches: &[FanMatch], legitimate: &LegitimateSet) {
        for m in matches {
            if legitimate.contains(&m.account) {
                continue;
            }
            let mut members = vec![m.account.clone()];
            members.extend(m.counterparts.iter().take(5).cloned());
            self.add_ring(
                members,
                PatternType::FanOut,
                &["smurfing_dispersion".to_string(), "high_velocity".to_string()],
            );
        }
    }

    pub fn process_shell(&mut self, matches: &[ShellMatch], legitimate: &LegitimateSet) {
        for m in matches {
            let suspicious_count = m.members.iter().filter(|a| !legitimate.contains(a)).count();
            if suspicious_count < 3 {
                continue;
            }
            self.add_ring(
                m.members.clone(),
                PatternType::ShellNetwork,
                &["layered_shell".to_string(), "low_transaction_intermediary".to_string()],
            );
        }
    }

    fn add_ring(&mut self, members: Vec<String>, pattern_type: PatternType, tags: &[String]) {
        self.ring_counter += 1;
        let ring_id = format!("RING_{:03}", self.ring_counter);

        let size_factor = ((members.len() as i64) * 2).min(15);
        let risk_score = (pattern_type.base_score() + size_factor).min(100) as f64;

        for account in &members {
            let record = self.accounts.entry(account.clone()).or_insert_with(|| {
                self.account_order.push(account.clone());
                SuspiciousAccount {
                    account_id: account.clone(),
                    suspicion_score: 0.0,
                    detected_patterns: HashSet::new(),
                    ring_ids: Vec::new(),
                }
            });
            record.detected_patterns.extend(tags.iter().cloned());
            record.ring_ids.push(ring_id.clone());

            let total_score: i64 = record.detected_patterns.iter().map(|t| tag_weight(t)).sum();
            let ring_bonus = (record.ring_ids.len() as i64 - 1) * 10;
            record.suspicion_score = (total_score + ring_bonus).min(100) as f64;
        }

        self.rings.push(FraudRing {
            ring_id,
            member_accounts: members,
            pattern_type,
            risk_score,
        });
    }

    /// Consume the assembler, returning rings in allocation order and
    /// suspicious accounts in first-touched order (the projection sorts
    /// the latter by score).
    pub fn finish(mut self) -> (Vec<FraudRing>, Vec<SuspiciousAccount>) {
        let accounts = self
            .account_order
            .into_iter()
            .map(|id| {
                self.accounts
                    .remove(&id)
                    .expect("tracked in account_order")
            })
            .collect();
        (self.rings, accounts)
    }
}
