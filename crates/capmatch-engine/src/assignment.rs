//! Per-student assignment records.

use serde::Serialize;

use capmatch_core::{ExpertiseLevel, Program, StudentId, SupervisorId, TopicId};

/// The outcome of a run for one student.
///
/// Unmatched students carry `None` in every assignment field. For matched
/// students `matching_round == student_rank` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    #[serde(rename = "StudentID")]
    pub student_id: StudentId,
    #[serde(rename = "Program")]
    pub program: Program,
    #[serde(rename = "ProjectID")]
    pub project_id: Option<TopicId>,
    #[serde(rename = "Area")]
    pub area: Option<String>,
    #[serde(rename = "SupervisorID")]
    pub supervisor_id: Option<SupervisorId>,
    #[serde(rename = "ExpertiseLevel")]
    pub expertise_level: Option<ExpertiseLevel>,
    #[serde(rename = "StudentRank")]
    pub student_rank: Option<usize>,
    #[serde(rename = "MatchingRound")]
    pub matching_round: Option<usize>,
}

impl Assignment {
    /// Creates the record of a student who was never matched.
    pub fn unmatched(student_id: StudentId, program: Program) -> Self {
        Self {
            student_id,
            program,
            project_id: None,
            area: None,
            supervisor_id: None,
            expertise_level: None,
            student_rank: None,
            matching_round: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.project_id.is_some()
    }
}
