//! Post-hoc capacity verification.

use std::collections::BTreeMap;

use serde::Serialize;

use capmatch_core::{Problem, SupervisorId};
use capmatch_engine::Assignment;

/// Final load of one supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorLoad {
    pub supervisor_id: SupervisorId,
    pub load: usize,
    pub capacity: usize,
}

/// Recomputed capacity constraints.
///
/// Any violation is a defect signal: a correct run never produces one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintSatisfaction {
    pub all_constraints_satisfied: bool,
    pub violation_count: usize,
    pub violations: Vec<String>,
    pub supervisor_loads: Vec<SupervisorLoad>,
}

impl ConstraintSatisfaction {
    /// Recounts every supervisor's load from the assignment records and
    /// checks it against capacity and against the engine's own counter.
    pub fn check(
        problem: &Problem,
        assignments: &[Assignment],
        counters: &BTreeMap<SupervisorId, usize>,
    ) -> Self {
        let mut violations = Vec::new();
        let mut recount: BTreeMap<&SupervisorId, usize> = BTreeMap::new();

        for a in assignments {
            let Some(supervisor) = a.supervisor_id.as_ref() else {
                continue;
            };
            if problem.supervisor(supervisor).is_none() {
                violations.push(format!(
                    "Student {} assigned to unknown supervisor {}",
                    a.student_id, supervisor
                ));
            }
            *recount.entry(supervisor).or_insert(0) += 1;

            if a.matching_round != a.student_rank {
                violations.push(format!(
                    "Student {} matched in round {:?} at rank {:?}",
                    a.student_id, a.matching_round, a.student_rank
                ));
            }
        }

        let mut supervisor_loads = Vec::with_capacity(problem.supervisor_count());
        for supervisor in problem.supervisors() {
            let load = recount.get(supervisor.id()).copied().unwrap_or(0);
            if load > supervisor.capacity() {
                violations.push(format!(
                    "Supervisor {} over capacity: {}/{}",
                    supervisor.id(),
                    load,
                    supervisor.capacity()
                ));
            }
            let counter = counters.get(supervisor.id()).copied().unwrap_or(0);
            if counter != load {
                violations.push(format!(
                    "Supervisor {} load counter reads {} but {} students are assigned",
                    supervisor.id(),
                    counter,
                    load
                ));
            }
            supervisor_loads.push(SupervisorLoad {
                supervisor_id: supervisor.id().clone(),
                load,
                capacity: supervisor.capacity(),
            });
        }

        Self {
            all_constraints_satisfied: violations.is_empty(),
            violation_count: violations.len(),
            violations,
            supervisor_loads,
        }
    }
}
