//! The complete input set of a matching run.

use std::collections::BTreeMap;

use super::{ExpertiseLevel, Program, Student, StudentId, Supervisor, SupervisorId, Topic, TopicId};
use crate::error::{MatchError, Result};

/// Validated students, topics and supervisors.
///
/// Immutable once built; a `Problem` may be shared read-only across any
/// number of concurrent engine runs.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    students: BTreeMap<StudentId, Student>,
    topics: BTreeMap<TopicId, Topic>,
    supervisors: BTreeMap<SupervisorId, Supervisor>,
}

impl Problem {
    /// Creates a problem from identifier-keyed maps.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::DuplicateId`] if a map key differs from the
    /// identifier of the entity stored under it.
    pub fn new(
        students: BTreeMap<StudentId, Student>,
        topics: BTreeMap<TopicId, Topic>,
        supervisors: BTreeMap<SupervisorId, Supervisor>,
    ) -> Result<Self> {
        if let Some((key, _)) = students.iter().find(|(k, s)| *k != s.id()) {
            return Err(mismatched("student", key.as_str()));
        }
        if let Some((key, _)) = topics.iter().find(|(k, t)| **k != t.id) {
            return Err(mismatched("topic", key.as_str()));
        }
        if let Some((key, _)) = supervisors.iter().find(|(k, s)| *k != s.id()) {
            return Err(mismatched("supervisor", key.as_str()));
        }
        Ok(Self {
            students,
            topics,
            supervisors,
        })
    }

    /// Creates a problem from entity lists, rejecting duplicate identifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use capmatch_core::{ExpertiseLevel, Problem, Program, Student, Supervisor, Topic};
    ///
    /// let problem = Problem::from_entities(
    ///     vec![Student::new("BDBA001", ["T01", "T02", "T03", "T04", "T05"]).unwrap()],
    ///     vec![Topic::new("T01", "Data Science")],
    ///     vec![Supervisor::new("SUP01", 2, [(Program::Bdba, "T01", ExpertiseLevel::Expert)]).unwrap()],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(problem.student_count(), 1);
    /// ```
    pub fn from_entities(
        students: impl IntoIterator<Item = Student>,
        topics: impl IntoIterator<Item = Topic>,
        supervisors: impl IntoIterator<Item = Supervisor>,
    ) -> Result<Self> {
        let mut problem = Self::default();
        for student in students {
            let id = student.id().clone();
            if problem.students.insert(id.clone(), student).is_some() {
                return Err(mismatched("student", id.as_str()));
            }
        }
        for topic in topics {
            let id = topic.id.clone();
            if problem.topics.insert(id.clone(), topic).is_some() {
                return Err(mismatched("topic", id.as_str()));
            }
        }
        for supervisor in supervisors {
            let id = supervisor.id().clone();
            if problem.supervisors.insert(id.clone(), supervisor).is_some() {
                return Err(mismatched("supervisor", id.as_str()));
            }
        }
        Ok(problem)
    }

    /// Students in ascending identifier order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }

    pub fn supervisors(&self) -> impl Iterator<Item = &Supervisor> {
        self.supervisors.values()
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.get(id)
    }

    pub fn supervisor(&self, id: &SupervisorId) -> Option<&Supervisor> {
        self.supervisors.get(id)
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn supervisor_count(&self) -> usize {
        self.supervisors.len()
    }

    /// Sum of all supervisor capacities.
    pub fn total_capacity(&self) -> usize {
        self.supervisors.values().map(Supervisor::capacity).sum()
    }

    /// Computes descriptive statistics about the input set.
    pub fn statistics(&self) -> ProblemStatistics {
        let mut students_by_program = BTreeMap::new();
        for student in self.students.values() {
            *students_by_program.entry(student.program()).or_insert(0) += 1;
        }

        let mut topics_by_area = BTreeMap::new();
        for topic in self.topics.values() {
            *topics_by_area.entry(topic.area.clone()).or_insert(0) += 1;
        }

        let mut expertise_distribution = BTreeMap::new();
        for level in self.supervisors.values().flat_map(|s| s.expertise().values()) {
            *expertise_distribution.entry(*level).or_insert(0) += 1;
        }

        let total_capacity = self.total_capacity();
        let demand_ratio = if total_capacity > 0 {
            self.students.len() as f64 / total_capacity as f64
        } else {
            0.0
        };

        ProblemStatistics {
            student_count: self.students.len(),
            topic_count: self.topics.len(),
            supervisor_count: self.supervisors.len(),
            students_by_program,
            topics_by_area,
            expertise_distribution,
            total_capacity,
            demand_ratio,
            capacity_sufficient: total_capacity >= self.students.len(),
        }
    }
}

fn mismatched(kind: &'static str, id: &str) -> MatchError {
    MatchError::DuplicateId {
        kind,
        id: id.to_string(),
    }
}

/// Descriptive statistics of a [`Problem`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProblemStatistics {
    pub student_count: usize,
    pub topic_count: usize,
    pub supervisor_count: usize,
    pub students_by_program: BTreeMap<Program, usize>,
    pub topics_by_area: BTreeMap<String, usize>,
    /// Number of (program, topic) entries per expertise level.
    pub expertise_distribution: BTreeMap<ExpertiseLevel, usize>,
    /// Sum of all supervisor capacities.
    pub total_capacity: usize,
    /// Students per available supervisor slot.
    pub demand_ratio: f64,
    /// True when every student could in principle be seated.
    pub capacity_sufficient: bool,
}
