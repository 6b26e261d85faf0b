//! Match rate and topic utilization.

use std::collections::BTreeSet;

use serde::Serialize;

use capmatch_core::Problem;
use capmatch_engine::Assignment;

/// How much of the student body and the topic pool a run used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Efficiency {
    /// `matched_students / total_students` (0.0 without students).
    pub student_match_rate: f64,
    /// `filled_projects / total_projects` (0.0 without topics).
    pub project_utilization: f64,
    pub matched_students: usize,
    pub total_students: usize,
    /// Topics with at least one assigned student.
    pub filled_projects: usize,
    pub total_projects: usize,
}

impl Efficiency {
    pub fn compute(problem: &Problem, assignments: &[Assignment]) -> Self {
        let matched_students = assignments.iter().filter(|a| a.is_matched()).count();
        let total_students = assignments.len();
        let filled: BTreeSet<_> = assignments
            .iter()
            .filter_map(|a| a.project_id.as_ref())
            .filter(|t| problem.topic(t).is_some())
            .collect();
        let total_projects = problem.topic_count();

        Self {
            student_match_rate: ratio(matched_students, total_students),
            project_utilization: ratio(filled.len(), total_projects),
            matched_students,
            total_students,
            filled_projects: filled.len(),
            total_projects,
        }
    }

    pub fn quality(&self) -> MatchQuality {
        MatchQuality::from_rate(self.student_match_rate)
    }

    pub fn unmatched_students(&self) -> usize {
        self.total_students - self.matched_students
    }
}

pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Qualitative reading of a match rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    /// 90% or more matched.
    Excellent,
    /// 70% or more.
    Good,
    /// 50% or more.
    Fair,
    Poor,
}

impl MatchQuality {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 0.9 {
            MatchQuality::Excellent
        } else if rate >= 0.7 {
            MatchQuality::Good
        } else if rate >= 0.5 {
            MatchQuality::Fair
        } else {
            MatchQuality::Poor
        }
    }
}
