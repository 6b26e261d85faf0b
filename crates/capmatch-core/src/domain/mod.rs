//! Entity model for student-project allocation
//!
//! These types are the validated, immutable inputs of a matching run:
//! - `Student`: an identifier plus exactly five ranked topic preferences
//! - `Topic`: a project topic with a free-form area label
//! - `Supervisor`: a shared capacity and per-(program, topic) expertise
//! - `Problem`: the complete input set handed to the engine

mod id;
mod problem;
mod program;
mod student;
mod supervisor;
mod topic;

#[cfg(test)]
mod tests;

pub use id::{StudentId, SupervisorId, TopicId};
pub use problem::{Problem, ProblemStatistics};
pub use program::Program;
pub use student::{Student, PREFERENCE_COUNT};
pub use supervisor::{ExpertiseLevel, Supervisor, MAX_CAPACITY, MIN_CAPACITY};
pub use topic::Topic;
