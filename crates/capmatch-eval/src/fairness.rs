//! Distribution of satisfaction across matched students.

use serde::Serialize;

use capmatch_engine::Assignment;

use crate::metrics;

/// Inequality measures over the ranks of matched students.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fairness {
    /// `None` without matched students.
    pub gini_coefficient: Option<f64>,
    pub variance: Option<f64>,
    /// Standard deviation over mean.
    pub coefficient_of_variation: Option<f64>,
}

impl Fairness {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let ranks: Vec<f64> = assignments
            .iter()
            .filter_map(|a| a.student_rank)
            .map(|r| r as f64)
            .collect();

        let coefficient_of_variation = match (metrics::std_dev(&ranks), metrics::mean(&ranks)) {
            (Some(std), Some(mean)) if mean > 0.0 => Some(std / mean),
            _ => None,
        };

        Self {
            gini_coefficient: metrics::gini(&ranks),
            variance: metrics::variance(&ranks),
            coefficient_of_variation,
        }
    }

    pub fn band(&self) -> Option<FairnessBand> {
        self.gini_coefficient.map(FairnessBand::from_gini)
    }
}

/// Qualitative reading of a Gini coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessBand {
    /// Below 0.2.
    Excellent,
    /// Below 0.3.
    Good,
    /// Below 0.4.
    Moderate,
    Poor,
}

impl FairnessBand {
    pub fn from_gini(gini: f64) -> Self {
        if gini < 0.2 {
            FairnessBand::Excellent
        } else if gini < 0.3 {
            FairnessBand::Good
        } else if gini < 0.4 {
            FairnessBand::Moderate
        } else {
            FairnessBand::Poor
        }
    }
}
