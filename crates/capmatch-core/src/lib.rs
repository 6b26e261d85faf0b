//! capmatch Core - Entity model for student-project allocation
//!
//! This crate provides the immutable inputs of a matching run:
//! - Identifier newtypes for students, topics and supervisors
//! - Program classification derived from student identifiers
//! - Validated `Student`, `Topic` and `Supervisor` value types
//! - The `Problem` aggregate and its descriptive statistics
//! - The `RoutingIndex` mapping (topic, program) pairs to supervisors

pub mod domain;
pub mod error;
pub mod routing;

pub use domain::{
    ExpertiseLevel, Problem, ProblemStatistics, Program, Student, StudentId, Supervisor,
    SupervisorId, Topic, TopicId, MAX_CAPACITY, MIN_CAPACITY, PREFERENCE_COUNT,
};
pub use error::{MatchError, Result};
pub use routing::{Route, RoutingIndex};
