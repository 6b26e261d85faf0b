//! Fluent problem builder.
//!
//! # Example
//!
//! ```
//! use capmatch_test::ProblemBuilder;
//!
//! let problem = ProblemBuilder::new()
//!     .topic("T01", "Data Science")
//!     .student("BDBA001", ["T01", "T02", "T03", "T04", "T05"])
//!     .supervisor("SUP01", 2, &["BDBA:T01:Expert"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(problem.student_count(), 1);
//! assert_eq!(problem.total_capacity(), 2);
//! ```

use capmatch_core::{
    ExpertiseLevel, MatchError, Problem, Program, Result, Student, Supervisor, Topic,
};

/// Collects entities and validates them all at [`ProblemBuilder::build`].
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    students: Vec<Result<Student>>,
    topics: Vec<Topic>,
    supervisors: Vec<Result<Supervisor>>,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(mut self, id: &str, area: &str) -> Self {
        self.topics.push(Topic::new(id, area));
        self
    }

    /// Adds topics `T01..=Tnn` in a single area.
    pub fn numbered_topics(mut self, count: usize, area: &str) -> Self {
        for i in 1..=count {
            self.topics.push(Topic::new(format!("T{i:02}"), area));
        }
        self
    }

    pub fn student<const N: usize>(mut self, id: &str, preferences: [&str; N]) -> Self {
        self.students.push(Student::new(id, preferences));
        self
    }

    /// Adds a supervisor whose expertise entries use `Program:Topic:Level`
    /// notation, e.g. `"BBA+BDBA:T01:Expert"`.
    pub fn supervisor(mut self, id: &str, capacity: usize, entries: &[&str]) -> Self {
        let parsed: Result<Vec<(Program, String, ExpertiseLevel)>> =
            entries.iter().map(|e| parse_entry(e)).collect();
        self.supervisors
            .push(parsed.and_then(|entries| Supervisor::new(id, capacity, entries)));
        self
    }

    /// Validates every entity and assembles the problem.
    pub fn build(self) -> Result<Problem> {
        let students = self.students.into_iter().collect::<Result<Vec<_>>>()?;
        let supervisors = self.supervisors.into_iter().collect::<Result<Vec<_>>>()?;
        Problem::from_entities(students, self.topics, supervisors)
    }
}

fn parse_entry(entry: &str) -> Result<(Program, String, ExpertiseLevel)> {
    let mut parts = entry.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(program), Some(topic), Some(level)) => Ok((
            program.parse()?,
            topic.trim().to_string(),
            level.parse()?,
        )),
        _ => Err(MatchError::UnknownExpertiseLevel(entry.to_string())),
    }
}
