//! Students and their ranked preferences.

use std::collections::HashSet;

use super::{Program, StudentId, TopicId};
use crate::error::{MatchError, Result};

/// Number of ranked topic preferences every student submits.
///
/// This is also the hard upper bound on the number of matching rounds.
pub const PREFERENCE_COUNT: usize = 5;

/// A student with exactly [`PREFERENCE_COUNT`] distinct ranked preferences.
///
/// The program is derived from the identifier once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Student {
    id: StudentId,
    preferences: [TopicId; PREFERENCE_COUNT],
    program: Program,
}

impl Student {
    /// Creates a student, validating the preference list.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::PreferenceCount`] unless exactly five preferences
    /// are given, and [`MatchError::DuplicatePreference`] if a topic repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use capmatch_core::{Program, Student};
    ///
    /// let student = Student::new("BCSAI001", ["T01", "T02", "T03", "T04", "T05"]).unwrap();
    /// assert_eq!(student.program(), Program::Bcsai);
    /// assert_eq!(student.rank_of(&"T03".into()), Some(3));
    ///
    /// assert!(Student::new("BCSAI002", ["T01", "T02"]).is_err());
    /// ```
    pub fn new<I, T>(id: impl Into<StudentId>, preferences: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TopicId>,
    {
        let id = id.into();
        let list: Vec<TopicId> = preferences.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(list.len());
        for topic in &list {
            if !seen.insert(topic) {
                return Err(MatchError::DuplicatePreference {
                    student: id.to_string(),
                    topic: topic.to_string(),
                });
            }
        }

        let count = list.len();
        let preferences: [TopicId; PREFERENCE_COUNT] =
            list.try_into()
                .map_err(|_| MatchError::PreferenceCount {
                    student: id.to_string(),
                    count,
                })?;

        let program = Program::classify(id.as_str());
        Ok(Self {
            id,
            preferences,
            program,
        })
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Ranked preferences, most preferred first.
    pub fn preferences(&self) -> &[TopicId; PREFERENCE_COUNT] {
        &self.preferences
    }

    pub fn program(&self) -> Program {
        self.program
    }

    /// Returns the topic at the given 1-based rank.
    pub fn preference_at(&self, rank: usize) -> Option<&TopicId> {
        rank.checked_sub(1).and_then(|i| self.preferences.get(i))
    }

    /// Returns the 1-based rank of a topic, if the student listed it.
    pub fn rank_of(&self, topic: &TopicId) -> Option<usize> {
        self.preferences
            .iter()
            .position(|t| t == topic)
            .map(|i| i + 1)
    }
}
