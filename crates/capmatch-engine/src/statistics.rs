//! Round statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::proposal::ProposalOutcome;

/// Proposal counts for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    /// Round number (1-based, equal to the preference rank proposed at).
    pub round: usize,
    pub proposals: usize,
    pub accepted: usize,
    pub rejected_no_coverage: usize,
    pub rejected_at_capacity: usize,
    pub rejected_unknown_topic: usize,
}

impl RoundSummary {
    pub fn new(round: usize) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    /// Records a proposal outcome.
    pub fn record(&mut self, outcome: &ProposalOutcome) {
        self.proposals += 1;
        match outcome {
            ProposalOutcome::Accepted(_) => self.accepted += 1,
            ProposalOutcome::NoCoverage => self.rejected_no_coverage += 1,
            ProposalOutcome::AtCapacity => self.rejected_at_capacity += 1,
            ProposalOutcome::UnknownTopic => self.rejected_unknown_topic += 1,
        }
    }

    /// Total rejected proposals.
    pub fn rejected(&self) -> usize {
        self.proposals - self.accepted
    }
}

/// Statistics of a complete run.
///
/// # Example
///
/// ```
/// use capmatch_engine::{RoundStatistics, RoundSummary};
///
/// let mut first = RoundSummary::new(1);
/// first.accepted = 3;
/// first.proposals = 4;
/// let mut second = RoundSummary::new(2);
/// second.proposals = 1;
///
/// let stats = RoundStatistics::from_rounds(vec![first, second], 4);
/// assert_eq!(stats.total_rounds, 2);
/// assert_eq!(stats.matched_count, 3);
/// assert_eq!(stats.unmatched_count, 1);
/// assert_eq!(stats.round_counts.get(&1), Some(&3));
/// assert_eq!(stats.round_counts.get(&2), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundStatistics {
    /// Number of rounds in which at least one proposal was made.
    pub total_rounds: usize,
    /// Round number → students matched in that round. Rounds without a
    /// match are omitted.
    pub round_counts: BTreeMap<usize, usize>,
    pub matched_count: usize,
    pub unmatched_count: usize,
    /// Per-round proposal breakdown, in round order.
    pub rounds: Vec<RoundSummary>,
}

impl RoundStatistics {
    /// Builds run statistics from the executed rounds.
    pub fn from_rounds(rounds: Vec<RoundSummary>, total_students: usize) -> Self {
        let round_counts: BTreeMap<usize, usize> = rounds
            .iter()
            .filter(|r| r.accepted > 0)
            .map(|r| (r.round, r.accepted))
            .collect();
        let matched_count: usize = round_counts.values().sum();

        Self {
            total_rounds: rounds.len(),
            round_counts,
            matched_count,
            unmatched_count: total_students.saturating_sub(matched_count),
            rounds,
        }
    }

    pub fn total_students(&self) -> usize {
        self.matched_count + self.unmatched_count
    }

    /// Students matched in rounds `1..=round`.
    pub fn cumulative(&self, round: usize) -> usize {
        self.round_counts.range(..=round).map(|(_, c)| c).sum()
    }

    /// Matched share of all students (0.0 for an empty run).
    pub fn match_rate(&self) -> f64 {
        let total = self.total_students();
        if total == 0 {
            0.0
        } else {
            self.matched_count as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capmatch_core::{ExpertiseLevel, Route};

    #[test]
    fn test_record() {
        let mut summary = RoundSummary::new(2);
        summary.record(&ProposalOutcome::Accepted(Route {
            supervisor: "SUP01".into(),
            expertise: ExpertiseLevel::Expert,
        }));
        summary.record(&ProposalOutcome::AtCapacity);
        summary.record(&ProposalOutcome::NoCoverage);
        summary.record(&ProposalOutcome::UnknownTopic);

        assert_eq!(summary.round, 2);
        assert_eq!(summary.proposals, 4);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected(), 3);
        assert_eq!(summary.rejected_at_capacity, 1);
        assert_eq!(summary.rejected_no_coverage, 1);
        assert_eq!(summary.rejected_unknown_topic, 1);
    }

    #[test]
    fn test_cumulative() {
        let rounds = (1..=3)
            .map(|round| RoundSummary {
                round,
                proposals: 5,
                accepted: round,
                ..RoundSummary::default()
            })
            .collect();
        let stats = RoundStatistics::from_rounds(rounds, 10);

        assert_eq!(stats.cumulative(0), 0);
        assert_eq!(stats.cumulative(1), 1);
        assert_eq!(stats.cumulative(2), 3);
        assert_eq!(stats.cumulative(5), 6);
        assert_eq!(stats.unmatched_count, 4);
        assert!((stats.match_rate() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let stats = RoundStatistics::from_rounds(Vec::new(), 0);
        assert_eq!(stats.total_rounds, 0);
        assert!(stats.round_counts.is_empty());
        assert_eq!(stats.match_rate(), 0.0);
    }
}
