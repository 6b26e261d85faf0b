//! Student satisfaction over matched students.

use serde::Serialize;

use capmatch_engine::Assignment;

use crate::metrics;

/// Rank statistics of matched students. Every rank field is `None` when
/// nobody was matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSatisfaction {
    pub average_rank: Option<f64>,
    pub median_rank: Option<f64>,
    pub std_rank: Option<f64>,
    pub min_rank: Option<usize>,
    pub max_rank: Option<usize>,
    pub students_matched: usize,
    pub students_unmatched: usize,
}

impl StudentSatisfaction {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let ranks: Vec<usize> = assignments.iter().filter_map(|a| a.student_rank).collect();
        let values: Vec<f64> = ranks.iter().map(|&r| r as f64).collect();

        Self {
            average_rank: metrics::mean(&values),
            median_rank: metrics::median(&values),
            std_rank: metrics::std_dev(&values),
            min_rank: ranks.iter().copied().min(),
            max_rank: ranks.iter().copied().max(),
            students_matched: ranks.len(),
            students_unmatched: assignments.len() - ranks.len(),
        }
    }

    pub fn band(&self) -> Option<SatisfactionBand> {
        self.average_rank.map(SatisfactionBand::from_average_rank)
    }
}

/// Qualitative reading of an average rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfactionBand {
    /// Average rank up to 1.5.
    Excellent,
    /// Up to 2.5.
    Good,
    /// Up to 3.5.
    Fair,
    Poor,
}

impl SatisfactionBand {
    pub fn from_average_rank(average: f64) -> Self {
        if average <= 1.5 {
            SatisfactionBand::Excellent
        } else if average <= 2.5 {
            SatisfactionBand::Good
        } else if average <= 3.5 {
            SatisfactionBand::Fair
        } else {
            SatisfactionBand::Poor
        }
    }
}
