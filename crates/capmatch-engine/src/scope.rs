//! Per-run mutable bookkeeping.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use capmatch_core::{
    ExpertiseLevel, MatchError, Problem, Result, Student, SupervisorId, TopicId,
};

use crate::assignment::Assignment;
use crate::statistics::RoundSummary;

/// A committed acceptance.
#[derive(Debug, Clone)]
pub(crate) struct Placement {
    pub(crate) topic: TopicId,
    pub(crate) supervisor: SupervisorId,
    pub(crate) expertise: ExpertiseLevel,
    pub(crate) rank: usize,
    pub(crate) round: usize,
}

/// Arena holding all mutable state of a single run.
///
/// Created fresh by every call to `MatchingEngine::run` and consumed when the
/// run finishes, so load counters are never shared between runs.
pub(crate) struct RunScope<'p> {
    problem: &'p Problem,
    /// Students in ascending identifier order.
    students: Vec<&'p Student>,
    /// Committed placement per student, parallel to `students`.
    placements: Vec<Option<Placement>>,
    /// Number of preferences each student has proposed to so far.
    cursors: Vec<usize>,
    load: BTreeMap<SupervisorId, usize>,
    rounds: Vec<RoundSummary>,
    start_time: Instant,
}

impl<'p> RunScope<'p> {
    pub(crate) fn new(problem: &'p Problem) -> Self {
        let students: Vec<&Student> = problem.students().collect();
        let n = students.len();
        Self {
            problem,
            students,
            placements: vec![None; n],
            cursors: vec![0; n],
            load: problem.supervisors().map(|s| (s.id().clone(), 0)).collect(),
            rounds: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub(crate) fn students(&self) -> &[&'p Student] {
        &self.students
    }

    pub(crate) fn student(&self, idx: usize) -> &'p Student {
        self.students[idx]
    }

    /// Indices of students that are unassigned and still hold an untried
    /// preference at `round`.
    pub(crate) fn candidates(&self, round: usize) -> Vec<usize> {
        (0..self.students.len())
            .filter(|&i| self.placements[i].is_none())
            .filter(|&i| self.cursors[i] + 1 == round && self.students[i].preference_at(round).is_some())
            .collect()
    }

    pub(crate) fn load_of(&self, supervisor: &SupervisorId) -> usize {
        self.load.get(supervisor).copied().unwrap_or(0)
    }

    /// Moves a student's cursor past the preference just proposed to.
    pub(crate) fn advance(&mut self, idx: usize) {
        self.cursors[idx] += 1;
    }

    /// Commits an acceptance and increments the supervisor's load.
    pub(crate) fn accept(&mut self, idx: usize, placement: Placement) {
        *self.load.entry(placement.supervisor.clone()).or_insert(0) += 1;
        self.placements[idx] = Some(placement);
    }

    pub(crate) fn finish_round(&mut self, summary: RoundSummary) {
        self.rounds.push(summary);
    }

    pub(crate) fn matched_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_some()).count()
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Re-checks the load and round/rank invariants.
    pub(crate) fn assert_invariants(&self) -> Result<()> {
        for supervisor in self.problem.supervisors() {
            let load = self.load_of(supervisor.id());
            if load > supervisor.capacity() {
                return Err(MatchError::InvariantViolated(format!(
                    "supervisor {} holds {} students with capacity {}",
                    supervisor.id(),
                    load,
                    supervisor.capacity()
                )));
            }
        }
        for (student, placement) in self.students.iter().zip(&self.placements) {
            if let Some(p) = placement {
                if p.round != p.rank || student.rank_of(&p.topic) != Some(p.rank) {
                    return Err(MatchError::InvariantViolated(format!(
                        "student {} matched to {} at rank {} in round {}",
                        student.id(),
                        p.topic,
                        p.rank,
                        p.round
                    )));
                }
            }
        }
        Ok(())
    }

    /// Consumes the arena into assignment records, final loads and rounds.
    pub(crate) fn finish(self) -> (Vec<Assignment>, BTreeMap<SupervisorId, usize>, Vec<RoundSummary>) {
        let problem = self.problem;
        let assignments = self
            .students
            .iter()
            .zip(self.placements)
            .map(|(student, placement)| match placement {
                Some(p) => Assignment {
                    student_id: student.id().clone(),
                    program: student.program(),
                    area: problem.topic(&p.topic).map(|t| t.area.clone()),
                    project_id: Some(p.topic),
                    supervisor_id: Some(p.supervisor),
                    expertise_level: Some(p.expertise),
                    student_rank: Some(p.rank),
                    matching_round: Some(p.round),
                },
                None => Assignment::unmatched(student.id().clone(), student.program()),
            })
            .collect();
        (assignments, self.load, self.rounds)
    }
}
