//! Evaluation of a finished run.

use serde::Serialize;
use tracing::{debug, warn};

use capmatch_config::AdvisorConfig;
use capmatch_engine::{EngineState, StabilityReport};

use crate::advisor::{self, AdvisorContext, Recommendation};
use crate::breakdown::{ProgramBreakdown, ProgramCoverage};
use crate::constraints::ConstraintSatisfaction;
use crate::diagnostics::{UnmatchedDiagnostic, UnmatchedSummary};
use crate::efficiency::Efficiency;
use crate::fairness::Fairness;
use crate::satisfaction::StudentSatisfaction;

/// The five independent sections of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub stability: StabilityReport,
    pub student_satisfaction: StudentSatisfaction,
    pub efficiency: Efficiency,
    pub fairness: Fairness,
    pub constraint_satisfaction: ConstraintSatisfaction,
}

impl EvaluationReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Returns true if the run broke stability or capacity.
    ///
    /// Unmatched students alone are never a defect.
    pub fn has_defects(&self) -> bool {
        !self.stability.is_stable || !self.constraint_satisfaction.all_constraints_satisfied
    }
}

/// Read-only evaluator over an engine state.
///
/// # Examples
///
/// ```
/// use capmatch_eval::Evaluator;
///
/// let problem = capmatch_test::scenario_b();
/// let state = capmatch_engine::run(&problem).unwrap();
/// let report = Evaluator::new(&state).generate_full_report();
///
/// assert!(report.stability.is_stable);
/// assert_eq!(report.efficiency.matched_students, 2);
/// assert!(report.to_json().unwrap().contains("\"student_match_rate\""));
/// ```
pub struct Evaluator<'s, 'p> {
    state: &'s EngineState<'p>,
}

impl<'s, 'p> Evaluator<'s, 'p> {
    pub fn new(state: &'s EngineState<'p>) -> Self {
        Self { state }
    }

    pub fn stability(&self) -> StabilityReport {
        self.state.stability()
    }

    pub fn student_satisfaction(&self) -> StudentSatisfaction {
        StudentSatisfaction::from_assignments(self.state.get_results())
    }

    pub fn efficiency(&self) -> Efficiency {
        Efficiency::compute(self.state.problem(), self.state.get_results())
    }

    pub fn fairness(&self) -> Fairness {
        Fairness::from_assignments(self.state.get_results())
    }

    pub fn constraint_satisfaction(&self) -> ConstraintSatisfaction {
        let report = ConstraintSatisfaction::check(
            self.state.problem(),
            self.state.get_results(),
            self.state.loads(),
        );
        for violation in &report.violations {
            warn!(event = "constraint_violation", %violation);
        }
        report
    }

    /// Computes every section.
    pub fn generate_full_report(&self) -> EvaluationReport {
        let report = EvaluationReport {
            stability: self.stability(),
            student_satisfaction: self.student_satisfaction(),
            efficiency: self.efficiency(),
            fairness: self.fairness(),
            constraint_satisfaction: self.constraint_satisfaction(),
        };
        debug!(
            event = "evaluation",
            match_rate = report.efficiency.student_match_rate,
            blocking_pairs = report.stability.blocking_pairs,
            violations = report.constraint_satisfaction.violation_count,
        );
        report
    }

    /// One diagnostic per unmatched student, in student id order.
    pub fn unmatched_diagnostics(&self) -> Vec<UnmatchedDiagnostic> {
        let problem = self.state.problem();
        self.state
            .unmatched()
            .filter_map(|a| problem.student(&a.student_id))
            .map(|student| {
                UnmatchedDiagnostic::replay(problem, self.state.routing(), self.state.loads(), student)
            })
            .collect()
    }

    pub fn unmatched_summary(&self) -> UnmatchedSummary {
        UnmatchedSummary::from_diagnostics(&self.unmatched_diagnostics())
    }

    pub fn program_breakdown(&self) -> Vec<ProgramBreakdown> {
        ProgramBreakdown::collect(self.state.get_results())
    }

    pub fn supervisor_coverage(&self) -> Vec<ProgramCoverage> {
        ProgramCoverage::collect(self.state.problem(), self.state.routing())
    }

    /// Recommendations against the given thresholds; empty when every
    /// metric is within bounds.
    pub fn recommendations(&self, config: &AdvisorConfig) -> Vec<Recommendation> {
        let report = self.generate_full_report();
        self.recommendations_for(&report, config)
    }

    /// Like [`recommendations`](Self::recommendations) but reuses a report
    /// already computed for this state.
    pub fn recommendations_for(
        &self,
        report: &EvaluationReport,
        config: &AdvisorConfig,
    ) -> Vec<Recommendation> {
        let coverage = self.supervisor_coverage();
        let ctx = AdvisorContext {
            problem: self.state.problem(),
            assignments: self.state.get_results(),
            coverage: &coverage,
        };
        advisor::advise(report, &ctx, config)
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
