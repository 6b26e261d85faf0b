//! Error types for capmatch

use thiserror::Error;

/// Main error type for capmatch operations.
///
/// Every variant except [`MatchError::InvariantViolated`] is a data-integrity
/// error raised while building the inputs of a run, before any round executes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Two supervisors claim the same (topic, program) pair.
    #[error("Ambiguous routing: topic {topic} for program {program} is claimed by both {first} and {second}")]
    AmbiguousRouting {
        topic: String,
        program: String,
        first: String,
        second: String,
    },

    /// Supervisor capacity outside the allowed range.
    #[error("Supervisor {supervisor} has capacity {capacity}, allowed range is 1..=10")]
    CapacityOutOfRange { supervisor: String, capacity: usize },

    /// Student preference list of the wrong length.
    #[error("Student {student} has {count} preferences (exactly 5 required)")]
    PreferenceCount { student: String, count: usize },

    /// Student lists the same topic twice.
    #[error("Student {student} lists topic {topic} more than once")]
    DuplicatePreference { student: String, topic: String },

    /// Supervisor without any (program, topic) expertise entry.
    #[error("Supervisor {supervisor} must have at least 1 program-topic combination")]
    EmptyExpertise { supervisor: String },

    /// Two entities of the same kind share an identifier, or a map key
    /// disagrees with the identifier of its value.
    #[error("Duplicate or mismatched {kind} identifier: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Unrecognized program label.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    /// Unrecognized expertise level label.
    #[error("Unknown expertise level: {0}")]
    UnknownExpertiseLevel(String),

    /// A run broke one of its own invariants (should not occur in normal operation).
    #[error("Invariant violated: {0}")]
    InvariantViolated(String),
}

impl MatchError {
    /// Returns true for errors caused by invalid input data.
    pub fn is_data_integrity(&self) -> bool {
        !matches!(self, MatchError::InvariantViolated(_))
    }
}

/// Result type alias for capmatch operations
pub type Result<T> = std::result::Result<T, MatchError>;
