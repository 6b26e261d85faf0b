//! Explanations for students left unmatched.
//!
//! Each preference is replayed against the final routing and load state:
//! does the topic exist, does any supervisor cover it for the student's
//! program, and was that supervisor full when the run completed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use capmatch_core::{Problem, Program, RoutingIndex, Student, StudentId, SupervisorId, TopicId};

/// Why one preference did not produce a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreferenceBlocker {
    UnknownTopic,
    NoCoverage { program: Program },
    AtCapacity {
        supervisor_id: SupervisorId,
        load: usize,
        capacity: usize,
    },
    /// The supervisor had room at completion. Unmatched students of a
    /// correct run never land here; it marks a defect.
    SlotAvailable { supervisor_id: SupervisorId },
}

impl PreferenceBlocker {
    pub fn is_no_coverage(&self) -> bool {
        matches!(self, PreferenceBlocker::NoCoverage { .. })
    }

    pub fn is_at_capacity(&self) -> bool {
        matches!(self, PreferenceBlocker::AtCapacity { .. })
    }

    pub fn is_slot_available(&self) -> bool {
        matches!(self, PreferenceBlocker::SlotAvailable { .. })
    }
}

impl fmt::Display for PreferenceBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceBlocker::UnknownTopic => write!(f, "topic doesn't exist"),
            PreferenceBlocker::NoCoverage { program } => {
                write!(f, "no supervisor coverage for {program} students")
            }
            PreferenceBlocker::AtCapacity {
                supervisor_id,
                load,
                capacity,
            } => write!(f, "supervisor {supervisor_id} at capacity ({load}/{capacity})"),
            PreferenceBlocker::SlotAvailable { supervisor_id } => write!(
                f,
                "supervisor {supervisor_id} still had a free slot at completion"
            ),
        }
    }
}

/// One replayed preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceDiagnostic {
    /// 1-based.
    pub rank: usize,
    pub topic_id: TopicId,
    pub blocker: PreferenceBlocker,
}

impl fmt::Display for PreferenceDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preference {} ({}): {}", self.rank, self.topic_id, self.blocker)
    }
}

/// Category of an unmatched student's failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// No preference had routing coverage for the student's program.
    NoCoverage,
    /// At least one responsible supervisor was full at completion.
    SupervisorsAtCapacity,
    /// A responsible supervisor still had room: the run is defective.
    OpenSlot,
    /// Anything else, such as preferences naming unknown topics.
    Unavailable,
}

impl UnmatchedReason {
    pub fn label(&self) -> &'static str {
        match self {
            UnmatchedReason::NoCoverage => "No supervisor coverage for program-topic combination",
            UnmatchedReason::SupervisorsAtCapacity => "All preferred supervisors at capacity",
            UnmatchedReason::OpenSlot => "Supervisor had a free slot (engine defect)",
            UnmatchedReason::Unavailable => "Preferred topics unavailable",
        }
    }

    /// Returns true if this reason signals a defective run rather than an
    /// ordinary outcome of the input.
    pub fn is_defect(&self) -> bool {
        matches!(self, UnmatchedReason::OpenSlot)
    }
}

/// Why one student ended up without a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedDiagnostic {
    pub student_id: StudentId,
    pub program: Program,
    pub preferences: Vec<TopicId>,
    pub primary_reason: UnmatchedReason,
    /// Human-readable form of `primary_reason`.
    pub summary: String,
    /// One entry per preference, in rank order.
    pub details: Vec<PreferenceDiagnostic>,
}

impl UnmatchedDiagnostic {
    pub(crate) fn replay(
        problem: &Problem,
        routing: &RoutingIndex,
        loads: &BTreeMap<SupervisorId, usize>,
        student: &Student,
    ) -> Self {
        let program = student.program();
        let details: Vec<PreferenceDiagnostic> = student
            .preferences()
            .iter()
            .enumerate()
            .map(|(i, topic)| PreferenceDiagnostic {
                rank: i + 1,
                topic_id: topic.clone(),
                blocker: blocker_for(problem, routing, loads, program, topic),
            })
            .collect();

        let no_coverage = details.iter().filter(|d| d.blocker.is_no_coverage()).count();
        let at_capacity = details.iter().filter(|d| d.blocker.is_at_capacity()).count();
        let open_slots = details.iter().filter(|d| d.blocker.is_slot_available()).count();

        let (primary_reason, summary) = if open_slots > 0 {
            (
                UnmatchedReason::OpenSlot,
                format!(
                    "Responsible supervisor had a free slot ({}/{} topics); the run is defective",
                    open_slots,
                    details.len()
                ),
            )
        } else if no_coverage == details.len() {
            (
                UnmatchedReason::NoCoverage,
                format!("No supervisors available for {program} students in any preferred topic"),
            )
        } else if at_capacity > 0 {
            (
                UnmatchedReason::SupervisorsAtCapacity,
                format!(
                    "All preferred supervisors at capacity ({}/{} topics)",
                    at_capacity,
                    details.len()
                ),
            )
        } else {
            (
                UnmatchedReason::Unavailable,
                "All preferences were unavailable".to_string(),
            )
        };

        Self {
            student_id: student.id().clone(),
            program,
            preferences: student.preferences().to_vec(),
            primary_reason,
            summary,
            details,
        }
    }
}

fn blocker_for(
    problem: &Problem,
    routing: &RoutingIndex,
    loads: &BTreeMap<SupervisorId, usize>,
    program: Program,
    topic: &TopicId,
) -> PreferenceBlocker {
    if problem.topic(topic).is_none() {
        return PreferenceBlocker::UnknownTopic;
    }
    let Some(route) = routing.route(topic, program) else {
        return PreferenceBlocker::NoCoverage { program };
    };
    let load = loads.get(&route.supervisor).copied().unwrap_or(0);
    let capacity = problem
        .supervisor(&route.supervisor)
        .map(|s| s.capacity())
        .unwrap_or(0);
    if load >= capacity {
        PreferenceBlocker::AtCapacity {
            supervisor_id: route.supervisor.clone(),
            load,
            capacity,
        }
    } else {
        PreferenceBlocker::SlotAvailable {
            supervisor_id: route.supervisor.clone(),
        }
    }
}

/// Unmatched students counted per reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnmatchedSummary {
    pub total: usize,
    pub counts: BTreeMap<UnmatchedReason, usize>,
    /// Human-readable reason label → count.
    pub labels: BTreeMap<&'static str, usize>,
}

impl UnmatchedSummary {
    pub fn from_diagnostics(diagnostics: &[UnmatchedDiagnostic]) -> Self {
        let mut counts = BTreeMap::new();
        let mut labels = BTreeMap::new();
        for d in diagnostics {
            *counts.entry(d.primary_reason).or_insert(0) += 1;
            *labels.entry(d.primary_reason.label()).or_insert(0) += 1;
        }
        Self {
            total: diagnostics.len(),
            counts,
            labels,
        }
    }

    /// Unmatched students whose replay exposed a defective run.
    pub fn defects(&self) -> usize {
        self.count(UnmatchedReason::OpenSlot)
    }

    pub fn count(&self, reason: UnmatchedReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    /// Remedies for the reasons present, most structural first.
    pub fn remedies(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.defects() > 0 {
            out.push("Re-run with environment_mode = \"full_assert\" and report the failing round");
        }
        if self.count(UnmatchedReason::NoCoverage) > 0 {
            out.push("Add supervisors who can supervise the unmatched program-topic combinations");
        }
        if self.count(UnmatchedReason::SupervisorsAtCapacity) > 0 {
            out.push("Increase supervisor capacities or add more supervisors for popular topics");
            out.push("Encourage students to diversify their preferences to less popular topics");
        }
        if self.count(UnmatchedReason::Unavailable) > 0 {
            out.push("Review preference lists for topics that do not exist");
        }
        out
    }
}
