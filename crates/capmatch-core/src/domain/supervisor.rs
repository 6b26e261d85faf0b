//! Supervisors, their capacity and expertise.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{Program, SupervisorId, TopicId};
use crate::error::{MatchError, Result};

/// Smallest allowed supervisor capacity.
pub const MIN_CAPACITY: usize = 1;

/// Largest allowed supervisor capacity.
pub const MAX_CAPACITY: usize = 10;

/// How well a supervisor knows a topic for a given program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpertiseLevel {
    Expert,
    Advanced,
    Intermediate,
    Beginner,
}

impl ExpertiseLevel {
    pub const ALL: [ExpertiseLevel; 4] = [
        ExpertiseLevel::Expert,
        ExpertiseLevel::Advanced,
        ExpertiseLevel::Intermediate,
        ExpertiseLevel::Beginner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertiseLevel::Expert => "Expert",
            ExpertiseLevel::Advanced => "Advanced",
            ExpertiseLevel::Intermediate => "Intermediate",
            ExpertiseLevel::Beginner => "Beginner",
        }
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpertiseLevel {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        ExpertiseLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MatchError::UnknownExpertiseLevel(s.to_string()))
    }
}

/// A supervisor with a capacity shared across every (program, topic) pair
/// they cover.
///
/// # Examples
///
/// ```
/// use capmatch_core::{ExpertiseLevel, Program, Supervisor};
///
/// let sup = Supervisor::new(
///     "SUP01",
///     5,
///     [
///         (Program::Bdba, "T01", ExpertiseLevel::Expert),
///         (Program::Bdba, "T03", ExpertiseLevel::Advanced),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(sup.capacity(), 5);
/// assert_eq!(sup.expertise_for(Program::Bdba, &"T03".into()), Some(ExpertiseLevel::Advanced));
/// assert!(Supervisor::new("SUP02", 11, [(Program::Bba, "T01", ExpertiseLevel::Expert)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Supervisor {
    id: SupervisorId,
    capacity: usize,
    expertise: BTreeMap<(Program, TopicId), ExpertiseLevel>,
}

impl Supervisor {
    /// Creates a supervisor, validating capacity and expertise.
    ///
    /// A repeated (program, topic) entry keeps the last level given.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::CapacityOutOfRange`] if the capacity is outside
    /// `1..=10`, and [`MatchError::EmptyExpertise`] if no entry is given.
    pub fn new<I, T>(id: impl Into<SupervisorId>, capacity: usize, expertise: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Program, T, ExpertiseLevel)>,
        T: Into<TopicId>,
    {
        let id = id.into();
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
            return Err(MatchError::CapacityOutOfRange {
                supervisor: id.to_string(),
                capacity,
            });
        }

        let expertise: BTreeMap<_, _> = expertise
            .into_iter()
            .map(|(program, topic, level)| ((program, topic.into()), level))
            .collect();
        if expertise.is_empty() {
            return Err(MatchError::EmptyExpertise {
                supervisor: id.to_string(),
            });
        }

        Ok(Self {
            id,
            capacity,
            expertise,
        })
    }

    pub fn id(&self) -> &SupervisorId {
        &self.id
    }

    /// Maximum number of students across all covered topics and programs.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All (program, topic) entries with their expertise level.
    pub fn expertise(&self) -> &BTreeMap<(Program, TopicId), ExpertiseLevel> {
        &self.expertise
    }

    /// Returns the expertise level for a (program, topic) pair, if covered.
    pub fn expertise_for(&self, program: Program, topic: &TopicId) -> Option<ExpertiseLevel> {
        self.expertise.get(&(program, topic.clone())).copied()
    }

    /// Distinct topics this supervisor covers for any program.
    pub fn topics(&self) -> impl Iterator<Item = &TopicId> {
        let mut topics: Vec<&TopicId> = self.expertise.keys().map(|(_, t)| t).collect();
        topics.sort();
        topics.dedup();
        topics.into_iter()
    }
}
