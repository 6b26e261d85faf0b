//! The matching engine and the state of a finished run.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use capmatch_config::MatchConfig;
use capmatch_core::{
    Problem, Result, RoutingIndex, Student, StudentId, SupervisorId, TopicId, PREFERENCE_COUNT,
};

use crate::assignment::Assignment;
use crate::order::ProposalOrder;
use crate::proposal::ProposalOutcome;
use crate::scope::{Placement, RunScope};
use crate::stability::{StabilityReport, StabilityVerifier};
use crate::statistics::{RoundStatistics, RoundSummary};

/// Bounded round-based deferred-acceptance engine.
///
/// Construction builds the routing index and fails on ambiguous routing, so
/// no round ever runs on inconsistent input. The engine itself is immutable:
/// every [`MatchingEngine::run`] works on a fresh arena and may be called any
/// number of times, including concurrently.
#[derive(Debug, Clone)]
pub struct MatchingEngine<'p> {
    problem: &'p Problem,
    routing: Arc<RoutingIndex>,
    config: MatchConfig,
}

impl<'p> MatchingEngine<'p> {
    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`capmatch_core::MatchError::AmbiguousRouting`] if two
    /// supervisors claim the same (topic, program) pair.
    pub fn new(problem: &'p Problem) -> Result<Self> {
        let routing = RoutingIndex::for_problem(problem)?;
        Ok(Self {
            problem,
            routing: Arc::new(routing),
            config: MatchConfig::default(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    pub fn routing(&self) -> &RoutingIndex {
        &self.routing
    }

    /// Executes the full protocol with the engine's configuration.
    pub fn run(&self) -> Result<EngineState<'p>> {
        self.run_with(&self.config)
    }

    /// Executes the full protocol with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Only in [`capmatch_config::EnvironmentMode::FullAssert`]: returns
    /// [`capmatch_core::MatchError::InvariantViolated`] if a round leaves the
    /// run in an inconsistent state.
    pub fn run_with(&self, config: &MatchConfig) -> Result<EngineState<'p>> {
        let mut scope = RunScope::new(self.problem);
        let mut order = ProposalOrder::new(config.tie_break, config.seed());

        info!(
            event = "match_start",
            students = self.problem.student_count(),
            topics = self.problem.topic_count(),
            supervisors = self.problem.supervisor_count(),
            tie_break = config.tie_break.as_str(),
        );

        for round in 1..=PREFERENCE_COUNT {
            let mut candidates = scope.candidates(round);
            if candidates.is_empty() {
                debug!(event = "round_skipped", round = round);
                break;
            }
            order.arrange(&mut candidates, scope.students());

            debug!(event = "round_start", round = round, candidates = candidates.len());
            let mut summary = RoundSummary::new(round);

            for idx in candidates {
                let student = scope.student(idx);
                let Some(topic) = student.preference_at(round) else {
                    continue;
                };

                let outcome = self.propose(&scope, student, topic);
                trace!(
                    event = "proposal",
                    round = round,
                    student = %student.id(),
                    topic = %topic,
                    outcome = outcome.as_str(),
                );
                summary.record(&outcome);
                scope.advance(idx);

                if let ProposalOutcome::Accepted(route) = outcome {
                    scope.accept(
                        idx,
                        Placement {
                            topic: topic.clone(),
                            supervisor: route.supervisor,
                            expertise: route.expertise,
                            rank: round,
                            round,
                        },
                    );
                }
            }

            info!(
                event = "round_end",
                round = round,
                proposals = summary.proposals,
                accepted = summary.accepted,
                rejected = summary.rejected(),
            );
            scope.finish_round(summary);

            if config.environment_mode.is_asserted() {
                scope.assert_invariants()?;
            }
        }

        let matched = scope.matched_count();
        let duration = scope.elapsed();
        let (assignments, load, rounds) = scope.finish();
        let statistics = RoundStatistics::from_rounds(rounds, assignments.len());

        info!(
            event = "match_end",
            rounds = statistics.total_rounds,
            matched = matched,
            unmatched = statistics.unmatched_count,
            duration_ms = duration.as_millis() as u64,
        );

        Ok(EngineState {
            problem: self.problem,
            routing: Arc::clone(&self.routing),
            assignments,
            load,
            statistics,
            duration,
        })
    }

    // Decides a single proposal against the current load.
    fn propose(&self, scope: &RunScope<'_>, student: &Student, topic: &TopicId) -> ProposalOutcome {
        if self.problem.topic(topic).is_none() {
            return ProposalOutcome::UnknownTopic;
        }
        let Some(route) = self.routing.route(topic, student.program()) else {
            return ProposalOutcome::NoCoverage;
        };
        let capacity = self
            .problem
            .supervisor(&route.supervisor)
            .map(|s| s.capacity())
            .unwrap_or(0);
        if scope.load_of(&route.supervisor) < capacity {
            ProposalOutcome::Accepted(route.clone())
        } else {
            ProposalOutcome::AtCapacity
        }
    }
}

/// Constructs an engine with the default configuration and runs it.
///
/// # Errors
///
/// Returns a data-integrity error if the routing index cannot be built.
pub fn run(problem: &Problem) -> Result<EngineState<'_>> {
    MatchingEngine::new(problem)?.run()
}

/// The read-only result of a finished run.
#[derive(Debug, Clone)]
pub struct EngineState<'p> {
    problem: &'p Problem,
    routing: Arc<RoutingIndex>,
    assignments: Vec<Assignment>,
    load: BTreeMap<SupervisorId, usize>,
    statistics: RoundStatistics,
    duration: Duration,
}

impl<'p> EngineState<'p> {
    /// One record per student, in ascending student identifier order,
    /// unmatched students included.
    pub fn get_results(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn get_round_statistics(&self) -> &RoundStatistics {
        &self.statistics
    }

    /// Returns true iff the final matching has no blocking pair.
    pub fn is_stable(&self) -> bool {
        self.stability().is_stable
    }

    /// Runs the stability verifier against the final state.
    pub fn stability(&self) -> StabilityReport {
        let report = StabilityVerifier::new(self).verify();
        if report.is_stable {
            debug!(event = "stability_check", blocking_pairs = 0u64);
        } else {
            warn!(
                event = "stability_check",
                blocking_pairs = report.blocking_pairs,
                "matching has blocking pairs"
            );
        }
        report
    }

    /// The record of one student.
    pub fn assignment(&self, student: &StudentId) -> Option<&Assignment> {
        self.assignments
            .binary_search_by(|a| a.student_id.cmp(student))
            .ok()
            .map(|i| &self.assignments[i])
    }

    /// Final load of a supervisor (0 for unknown identifiers).
    pub fn supervisor_load(&self, supervisor: &SupervisorId) -> usize {
        self.load.get(supervisor).copied().unwrap_or(0)
    }

    /// Final load of every supervisor.
    pub fn loads(&self) -> &BTreeMap<SupervisorId, usize> {
        &self.load
    }

    pub fn matched(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| a.is_matched())
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| !a.is_matched())
    }

    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    pub fn routing(&self) -> &RoutingIndex {
        &self.routing
    }

    /// Wall-clock time of the run.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
