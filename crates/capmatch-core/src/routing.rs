//! Routing index from (topic, program) pairs to supervisors.

use std::collections::HashMap;

use crate::domain::{ExpertiseLevel, Problem, Program, Supervisor, SupervisorId, TopicId};
use crate::error::{MatchError, Result};

/// Maps each (topic, program) pair to the single supervisor authorized to
/// supervise students of that program on that topic.
///
/// Built once per input set and read-only afterwards.
///
/// # Examples
///
/// ```
/// use capmatch_core::{ExpertiseLevel, Program, RoutingIndex, Supervisor};
///
/// let sup = Supervisor::new("SUP01", 3, [(Program::Bdba, "T01", ExpertiseLevel::Expert)]).unwrap();
/// let index = RoutingIndex::build([&sup]).unwrap();
///
/// assert_eq!(index.lookup(&"T01".into(), Program::Bdba).map(|s| s.as_str()), Some("SUP01"));
/// assert!(index.lookup(&"T01".into(), Program::Bcsai).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoutingIndex {
    entries: HashMap<(TopicId, Program), Route>,
}

/// A single routing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub supervisor: SupervisorId,
    pub expertise: ExpertiseLevel,
}

impl RoutingIndex {
    /// Builds the index by scanning every supervisor's expertise entries.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::AmbiguousRouting`] if a (topic, program) pair is
    /// claimed by two different supervisors.
    pub fn build<'a>(supervisors: impl IntoIterator<Item = &'a Supervisor>) -> Result<Self> {
        let mut entries: HashMap<(TopicId, Program), Route> = HashMap::new();

        for supervisor in supervisors {
            for ((program, topic), level) in supervisor.expertise() {
                let key = (topic.clone(), *program);
                if let Some(existing) = entries.get(&key) {
                    if existing.supervisor != *supervisor.id() {
                        return Err(MatchError::AmbiguousRouting {
                            topic: topic.to_string(),
                            program: program.to_string(),
                            first: existing.supervisor.to_string(),
                            second: supervisor.id().to_string(),
                        });
                    }
                    continue;
                }
                entries.insert(
                    key,
                    Route {
                        supervisor: supervisor.id().clone(),
                        expertise: *level,
                    },
                );
            }
        }

        Ok(Self { entries })
    }

    /// Builds the index for every supervisor of a problem.
    pub fn for_problem(problem: &Problem) -> Result<Self> {
        Self::build(problem.supervisors())
    }

    /// Returns the supervisor responsible for a (topic, program) pair.
    pub fn lookup(&self, topic: &TopicId, program: Program) -> Option<&SupervisorId> {
        self.route(topic, program).map(|r| &r.supervisor)
    }

    /// Returns the full routing entry for a (topic, program) pair.
    pub fn route(&self, topic: &TopicId, program: Program) -> Option<&Route> {
        self.entries.get(&(topic.clone(), program))
    }

    /// Returns true if some supervisor covers the pair.
    pub fn covers(&self, topic: &TopicId, program: Program) -> bool {
        self.entries.contains_key(&(topic.clone(), program))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
