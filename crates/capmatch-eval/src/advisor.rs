//! Actionable recommendations derived from an evaluation report.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use capmatch_config::AdvisorConfig;
use capmatch_core::{Problem, TopicId};
use capmatch_engine::Assignment;

use crate::breakdown::ProgramCoverage;
use crate::evaluator::EvaluationReport;

/// How urgently a recommendation should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The run itself is defective.
    Critical,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub actions: Vec<String>,
}

impl Recommendation {
    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            actions: Vec::new(),
        }
    }

    fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }
}

/// Everything the advisor looks at besides the report.
pub(crate) struct AdvisorContext<'a> {
    pub problem: &'a Problem,
    pub assignments: &'a [Assignment],
    pub coverage: &'a [ProgramCoverage],
}

/// Produces recommendations in a fixed order: defects first, then match
/// rate, satisfaction, fairness and utilization.
pub(crate) fn advise(
    report: &EvaluationReport,
    ctx: &AdvisorContext<'_>,
    config: &AdvisorConfig,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if !report.stability.is_stable {
        out.push(
            Recommendation::new(
                Severity::Critical,
                "Stability Issues Detected",
                format!(
                    "The matching has {} blocking pairs. A correct run never produces one.",
                    report.stability.blocking_pairs
                ),
            )
            .actions([
                "Re-run with environment_mode = \"full_assert\" to locate the failing round",
                "Verify supervisor capacities and routing entries",
            ]),
        );
    }

    if !report.constraint_satisfaction.all_constraints_satisfied {
        out.push(
            Recommendation::new(
                Severity::Critical,
                "Constraint Violations",
                format!(
                    "{} capacity constraint violations were found after the run.",
                    report.constraint_satisfaction.violation_count
                ),
            )
            .actions(report.constraint_satisfaction.violations.iter().cloned()),
        );
    }

    let efficiency = &report.efficiency;
    if efficiency.total_students > 0 && efficiency.student_match_rate < config.min_match_rate {
        out.push(low_match_rate(report, ctx, config));
    }

    if let Some(average) = report.student_satisfaction.average_rank {
        if average > config.max_average_rank {
            out.push(
                Recommendation::new(
                    Severity::Info,
                    "Student Satisfaction Could Be Improved",
                    format!("Average student rank is {average:.2}."),
                )
                .actions([
                    "Encourage students to provide more diverse preferences",
                    "Add more topics in popular areas",
                    "Review if preferences are too concentrated on few topics",
                    "Review supervisor capacity for popular topics",
                ]),
            );
        }
    }

    if let Some(gini) = report.fairness.gini_coefficient {
        if gini > config.max_gini {
            out.push(
                Recommendation::new(
                    Severity::Info,
                    "Fairness Concerns",
                    format!("Gini coefficient of {gini:.3} indicates uneven satisfaction distribution."),
                )
                .actions([
                    "Review if some students consistently get better matches",
                    "Check if preferences are balanced across topics",
                    "Compare shuffled tie-break runs for order effects",
                ]),
            );
        }
    }

    if efficiency.total_projects > 0 && efficiency.project_utilization < config.min_project_utilization {
        out.push(
            Recommendation::new(
                Severity::Info,
                "Low Topic Utilization",
                format!(
                    "Only {:.1}% of topics are filled.",
                    efficiency.project_utilization * 100.0
                ),
            )
            .actions([
                "Review if some topics are unpopular",
                "Check if topic descriptions need improvement",
                "Consider consolidating similar topics",
            ]),
        );
    }

    out
}

fn low_match_rate(
    report: &EvaluationReport,
    ctx: &AdvisorContext<'_>,
    config: &AdvisorConfig,
) -> Recommendation {
    let efficiency = &report.efficiency;
    let students = ctx.problem.student_count();
    let supervisors = ctx.problem.supervisor_count();
    let capacity = ctx.problem.total_capacity();
    let mut actions = Vec::new();

    if students > capacity {
        let gap = students - capacity;
        if supervisors > 0 {
            actions.push(format!(
                "HIGH PRIORITY: Increase supervisor capacities by {} students each (need {} more slots total)",
                gap / supervisors + 1,
                gap
            ));
        } else {
            actions.push(format!("HIGH PRIORITY: Add supervisors (need {gap} slots)"));
        }
    }

    let popular = most_requested_unmatched(ctx, 3);
    if !popular.is_empty() {
        let listed: Vec<String> = popular
            .iter()
            .map(|(topic, n)| format!("{topic} ({n} requests)"))
            .collect();
        actions.push(format!(
            "MEDIUM PRIORITY: Increase capacity for popular unmatched topics: {}",
            listed.join(", ")
        ));
    }

    for c in ctx.coverage {
        if c.coverage < config.min_program_coverage {
            actions.push(format!(
                "MEDIUM PRIORITY: Improve supervisor coverage for {} students (only {:.1}% of topics covered)",
                c.program,
                c.coverage * 100.0
            ));
        }
    }

    let topics = ctx.problem.topic_count();
    if (topics as f64) < students as f64 * config.min_topics_per_student {
        actions.push(format!(
            "LOW PRIORITY: Consider adding more topics (currently {topics} topics for {students} students)"
        ));
    }

    if actions.is_empty() {
        actions.extend(
            [
                "Low match rate may be due to preference misalignment",
                "Review unmatched students' preferences; they may be too restrictive",
                "Consider if some topics are oversubscribed while others are underutilized",
            ]
            .map(String::from),
        );
    }

    Recommendation {
        severity: Severity::Warning,
        title: format!(
            "Low Match Rate: {} Students Unmatched ({:.1}% matched)",
            efficiency.unmatched_students(),
            efficiency.student_match_rate * 100.0
        ),
        message: format!(
            "Topics: {topics}, supervisor capacity: {capacity}, students: {students}"
        ),
        actions,
    }
}

/// Topics most often listed by unmatched students, by count then id.
fn most_requested_unmatched(ctx: &AdvisorContext<'_>, limit: usize) -> Vec<(TopicId, usize)> {
    let mut counts: BTreeMap<&TopicId, usize> = BTreeMap::new();
    for a in ctx.assignments.iter().filter(|a| !a.is_matched()) {
        if let Some(student) = ctx.problem.student(&a.student_id) {
            for topic in student.preferences() {
                *counts.entry(topic).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(TopicId, usize)> = counts
        .into_iter()
        .map(|(topic, n)| (topic.clone(), n))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
