//! Post-hoc stability verification.
//!
//! A blocking pair is a (student, topic) pair where the student strictly
//! prefers the topic to their current assignment (any rank if unmatched) and
//! the responsible supervisor still had a free slot when the run finished.
//! A correct run never produces one; a non-zero count signals a defect.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use capmatch_core::{Problem, RoutingIndex, StudentId, SupervisorId, TopicId, PREFERENCE_COUNT};

use crate::assignment::Assignment;
use crate::engine::EngineState;

/// A (student, topic) pair that contradicts stability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockingPair {
    pub student_id: StudentId,
    pub topic_id: TopicId,
    pub supervisor_id: SupervisorId,
    /// Rank of the blocking topic on the student's list.
    pub preferred_rank: usize,
    /// Rank of the current assignment, `None` if unmatched.
    pub current_rank: Option<usize>,
}

/// Result of a stability check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityReport {
    pub is_stable: bool,
    pub blocking_pairs: usize,
    /// `1.0 - blocking_pairs / (students × 5)`; 1.0 means perfectly stable.
    pub stability_score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pairs: Vec<BlockingPair>,
}

/// Scans a final matching for blocking pairs.
pub struct StabilityVerifier<'a> {
    problem: &'a Problem,
    routing: &'a RoutingIndex,
    assignments: HashMap<&'a StudentId, &'a Assignment>,
    load: &'a BTreeMap<SupervisorId, usize>,
}

impl<'a> StabilityVerifier<'a> {
    /// Verifies the final state of an engine run.
    pub fn new(state: &'a EngineState<'_>) -> Self {
        Self::from_parts(
            state.problem(),
            state.routing(),
            state.get_results(),
            state.loads(),
        )
    }

    /// Verifies an arbitrary matching, e.g. one produced elsewhere.
    pub fn from_parts(
        problem: &'a Problem,
        routing: &'a RoutingIndex,
        assignments: &'a [Assignment],
        load: &'a BTreeMap<SupervisorId, usize>,
    ) -> Self {
        Self {
            problem,
            routing,
            assignments: assignments.iter().map(|a| (&a.student_id, a)).collect(),
            load,
        }
    }

    /// Enumerates every student's five preferences against the final state.
    pub fn verify(&self) -> StabilityReport {
        let mut pairs = Vec::new();

        for student in self.problem.students() {
            let assignment = self.assignments.get(student.id());
            let current_topic = assignment.and_then(|a| a.project_id.as_ref());
            let current_rank = assignment.and_then(|a| a.student_rank);

            for (i, topic) in student.preferences().iter().enumerate() {
                let rank = i + 1;
                if Some(topic) == current_topic {
                    continue;
                }
                if current_rank.is_some_and(|current| rank >= current) {
                    continue;
                }
                if self.problem.topic(topic).is_none() {
                    continue;
                }
                let Some(supervisor) = self.routing.lookup(topic, student.program()) else {
                    continue;
                };
                let capacity = self
                    .problem
                    .supervisor(supervisor)
                    .map(|s| s.capacity())
                    .unwrap_or(0);
                let load = self.load.get(supervisor).copied().unwrap_or(0);
                if load < capacity {
                    pairs.push(BlockingPair {
                        student_id: student.id().clone(),
                        topic_id: topic.clone(),
                        supervisor_id: supervisor.clone(),
                        preferred_rank: rank,
                        current_rank,
                    });
                }
            }
        }

        let candidates = self.problem.student_count() * PREFERENCE_COUNT;
        let stability_score = if candidates == 0 {
            1.0
        } else {
            1.0 - pairs.len() as f64 / candidates as f64
        };

        StabilityReport {
            is_stable: pairs.is_empty(),
            blocking_pairs: pairs.len(),
            stability_score,
            pairs,
        }
    }
}
