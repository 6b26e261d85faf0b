//! Tests for the evaluator and its sections.

use std::collections::BTreeMap;

use capmatch_config::AdvisorConfig;
use capmatch_core::{Problem, Program, RoutingIndex, StudentId, SupervisorId};
use capmatch_engine::run;
use capmatch_test::{scenario_a, scenario_b, scenario_c, ProblemBuilder};

use super::*;
use crate::advisor::Severity;
use crate::constraints::ConstraintSatisfaction;
use crate::diagnostics::{
    PreferenceBlocker, UnmatchedDiagnostic, UnmatchedReason, UnmatchedSummary,
};
use crate::efficiency::MatchQuality;
use crate::fairness::FairnessBand;
use crate::satisfaction::SatisfactionBand;

#[test]
fn test_scenario_a_full_report() {
    let problem = scenario_a();
    let state = run(&problem).unwrap();
    let report = Evaluator::new(&state).generate_full_report();

    assert!(report.stability.is_stable);
    assert_eq!(report.stability.blocking_pairs, 0);
    assert_eq!(report.stability.stability_score, 1.0);

    let s = &report.student_satisfaction;
    assert_eq!(s.students_matched, 3);
    assert_eq!(s.students_unmatched, 0);
    assert_eq!(s.min_rank, Some(1));
    assert_eq!(s.max_rank, Some(2));
    assert_eq!(s.median_rank, Some(1.0));
    assert!((s.average_rank.unwrap() - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(s.band(), Some(SatisfactionBand::Excellent));

    let e = &report.efficiency;
    assert_eq!(e.student_match_rate, 1.0);
    assert_eq!(e.filled_projects, 2);
    assert_eq!(e.total_projects, 5);
    assert!((e.project_utilization - 0.4).abs() < 1e-12);
    assert_eq!(e.quality(), MatchQuality::Excellent);

    let gini = report.fairness.gini_coefficient.unwrap();
    assert!((gini - 1.0 / 6.0).abs() < 1e-12);
    assert_eq!(report.fairness.band(), Some(FairnessBand::Excellent));

    let c = &report.constraint_satisfaction;
    assert!(c.all_constraints_satisfied);
    assert_eq!(c.violation_count, 0);
    let loads: Vec<_> = c
        .supervisor_loads
        .iter()
        .map(|l| (l.supervisor_id.as_str(), l.load, l.capacity))
        .collect();
    assert_eq!(loads, vec![("SUP01", 1, 5), ("SUP02", 2, 4)]);
    assert!(!report.has_defects());
}

#[test]
fn test_scenario_c_reports_missing_coverage_for_every_preference() {
    let problem = scenario_c();
    let state = run(&problem).unwrap();
    let evaluator = Evaluator::new(&state);

    let diagnostics = evaluator.unmatched_diagnostics();
    assert_eq!(diagnostics.len(), 1);

    let d = &diagnostics[0];
    assert_eq!(d.student_id.as_str(), "BBA001");
    assert_eq!(d.program, Program::Bba);
    assert_eq!(d.primary_reason, UnmatchedReason::NoCoverage);
    assert_eq!(d.details.len(), 5);
    for (i, detail) in d.details.iter().enumerate() {
        assert_eq!(detail.rank, i + 1);
        assert_eq!(detail.blocker, PreferenceBlocker::NoCoverage { program: Program::Bba });
        assert!(detail.to_string().contains("no supervisor coverage"));
    }

    let summary = evaluator.unmatched_summary();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.count(UnmatchedReason::NoCoverage), 1);
    assert_eq!(summary.count(UnmatchedReason::SupervisorsAtCapacity), 0);
    assert_eq!(summary.defects(), 0);
    assert_eq!(
        summary.labels.get("No supervisor coverage for program-topic combination"),
        Some(&1)
    );
    assert_eq!(summary.remedies().len(), 1);
}

#[test]
fn test_at_capacity_diagnostic() {
    let problem = ProblemBuilder::new()
        .student("BDBA001", ["T01", "T02", "T03", "T04", "T05"])
        .student("BDBA002", ["T01", "T02", "T03", "T04", "T05"])
        .numbered_topics(5, "Data Science")
        .supervisor("SUP01", 1, &["BDBA:T01:Expert"])
        .build()
        .unwrap();
    let state = run(&problem).unwrap();
    let diagnostics = Evaluator::new(&state).unmatched_diagnostics();

    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.student_id.as_str(), "BDBA002");
    assert_eq!(d.primary_reason, UnmatchedReason::SupervisorsAtCapacity);
    assert_eq!(d.summary, "All preferred supervisors at capacity (1/5 topics)");
    assert_eq!(
        d.details[0].blocker,
        PreferenceBlocker::AtCapacity {
            supervisor_id: SupervisorId::new("SUP01"),
            load: 1,
            capacity: 1,
        }
    );
    assert_eq!(
        d.details[0].to_string(),
        "Preference 1 (T01): supervisor SUP01 at capacity (1/1)"
    );
    assert!(d.details[1..].iter().all(|p| p.blocker.is_no_coverage()));
}

#[test]
fn test_unknown_topic_diagnostic() {
    let problem = ProblemBuilder::new()
        .student("BDBA001", ["T91", "T92", "T93", "T94", "T95"])
        .numbered_topics(1, "Finance")
        .supervisor("SUP01", 1, &["BDBA:T01:Expert"])
        .build()
        .unwrap();
    let state = run(&problem).unwrap();
    let diagnostics = Evaluator::new(&state).unmatched_diagnostics();

    let d = &diagnostics[0];
    assert_eq!(d.primary_reason, UnmatchedReason::Unavailable);
    assert!(d
        .details
        .iter()
        .all(|p| p.blocker == PreferenceBlocker::UnknownTopic));
    assert_eq!(d.details[0].to_string(), "Preference 1 (T91): topic doesn't exist");
}

#[test]
fn test_open_slot_is_reported_apart_from_unknown_topics() {
    let problem = ProblemBuilder::new()
        .student("BDBA001", ["T01", "Y2", "Y3", "Y4", "Y5"])
        .student("BDBA002", ["Y1", "Y2", "Y3", "Y4", "Y5"])
        .numbered_topics(1, "Finance")
        .supervisor("SUP01", 1, &["BDBA:T01:Expert"])
        .build()
        .unwrap();
    let routing = RoutingIndex::for_problem(&problem).unwrap();
    // SUP01 never filled: any unmatched student routed there exposes a defect.
    let loads: BTreeMap<SupervisorId, usize> = [(SupervisorId::new("SUP01"), 0)].into();

    let replay = |id: &str| {
        let student = problem.student(&StudentId::new(id)).unwrap();
        UnmatchedDiagnostic::replay(&problem, &routing, &loads, student)
    };
    let open = replay("BDBA001");
    let unknown = replay("BDBA002");

    assert_eq!(open.primary_reason, UnmatchedReason::OpenSlot);
    assert!(open.primary_reason.is_defect());
    assert_eq!(
        open.details[0].to_string(),
        "Preference 1 (T01): supervisor SUP01 still had a free slot at completion"
    );
    assert!(open.details[0].blocker.is_slot_available());

    assert_eq!(unknown.primary_reason, UnmatchedReason::Unavailable);
    assert!(!unknown.primary_reason.is_defect());
    assert_ne!(open.primary_reason.label(), unknown.primary_reason.label());

    let summary = UnmatchedSummary::from_diagnostics(&[open, unknown]);
    assert_eq!(summary.defects(), 1);
    assert_eq!(summary.count(UnmatchedReason::Unavailable), 1);
    assert_eq!(
        summary.labels.get("Supervisor had a free slot (engine defect)"),
        Some(&1)
    );
    assert!(summary.remedies()[0].contains("full_assert"));
}

#[test]
fn test_program_breakdown_and_coverage() {
    let problem = scenario_c();
    let state = run(&problem).unwrap();
    let evaluator = Evaluator::new(&state);

    let breakdown = evaluator.program_breakdown();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].program, Program::Bdba);
    assert_eq!(breakdown[0].matched, 1);
    assert_eq!(breakdown[0].match_rate, 1.0);
    assert_eq!(breakdown[0].average_rank, Some(1.0));
    assert_eq!(breakdown[1].program, Program::Bba);
    assert_eq!(breakdown[1].matched, 0);
    assert_eq!(breakdown[1].average_rank, None);

    let coverage = evaluator.supervisor_coverage();
    let bba = coverage.iter().find(|c| c.program == Program::Bba).unwrap();
    let bdba = coverage.iter().find(|c| c.program == Program::Bdba).unwrap();
    assert_eq!((bba.covered_topics, bba.total_topics), (0, 5));
    assert_eq!((bdba.covered_topics, bdba.total_topics), (1, 5));
    assert!(coverage.iter().all(|c| c.program != Program::Bcsai));
}

#[test]
fn test_recommendations_for_scenario_a() {
    let problem = scenario_a();
    let state = run(&problem).unwrap();
    let recs = Evaluator::new(&state).recommendations(&AdvisorConfig::default());

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::Info);
    assert_eq!(recs[0].title, "Low Topic Utilization");
}

#[test]
fn test_recommendations_for_low_match_rate() {
    let problem = scenario_c();
    let state = run(&problem).unwrap();
    let recs = Evaluator::new(&state).recommendations(&AdvisorConfig::default());

    let low = recs
        .iter()
        .find(|r| r.severity == Severity::Warning)
        .unwrap();
    assert_eq!(low.title, "Low Match Rate: 1 Students Unmatched (50.0% matched)");
    assert!(low
        .actions
        .iter()
        .any(|a| a.contains("T01 (1 requests), T02 (1 requests), T03 (1 requests)")));
    assert!(low
        .actions
        .iter()
        .any(|a| a.contains("coverage for BBA students (only 0.0%")));
    assert!(!low.actions.iter().any(|a| a.starts_with("HIGH PRIORITY")));
}

#[test]
fn test_capacity_gap_recommendation() {
    let problem = ProblemBuilder::new()
        .student("BDBA001", ["T01", "T02", "T03", "T04", "T05"])
        .student("BDBA002", ["T01", "T02", "T03", "T04", "T05"])
        .student("BDBA003", ["T01", "T02", "T03", "T04", "T05"])
        .numbered_topics(5, "Data Science")
        .supervisor("SUP01", 1, &["BDBA:T01:Expert", "BDBA:T02:Expert"])
        .build()
        .unwrap();
    let state = run(&problem).unwrap();
    let recs = Evaluator::new(&state).recommendations(&AdvisorConfig::default());

    let low = recs
        .iter()
        .find(|r| r.severity == Severity::Warning)
        .unwrap();
    assert_eq!(
        low.actions[0],
        "HIGH PRIORITY: Increase supervisor capacities by 3 students each (need 2 more slots total)"
    );
}

#[test]
fn test_constraint_check_flags_overload_and_drift() {
    let problem = scenario_b();
    let state = run(&problem).unwrap();

    let mut forged = state.get_results().to_vec();
    for a in &mut forged {
        a.supervisor_id = Some(SupervisorId::new("SUP01"));
    }
    let counters: BTreeMap<SupervisorId, usize> = BTreeMap::new();
    let check = ConstraintSatisfaction::check(&problem, &forged, &counters);

    assert!(!check.all_constraints_satisfied);
    assert!(check
        .violations
        .iter()
        .any(|v| v == "Supervisor SUP01 over capacity: 2/1"));
    assert!(check
        .violations
        .iter()
        .any(|v| v.contains("load counter reads 0")));
    assert_eq!(check.violation_count, check.violations.len());
}

#[test]
fn test_empty_problem_report() {
    let problem = Problem::from_entities(vec![], vec![], vec![]).unwrap();
    let state = run(&problem).unwrap();
    let evaluator = Evaluator::new(&state);
    let report = evaluator.generate_full_report();

    assert!(report.stability.is_stable);
    assert_eq!(report.student_satisfaction.average_rank, None);
    assert_eq!(report.fairness.gini_coefficient, None);
    assert_eq!(report.efficiency.student_match_rate, 0.0);
    assert!(evaluator
        .recommendations_for(&report, &AdvisorConfig::default())
        .is_empty());
}

#[test]
fn test_report_json_layout() {
    let problem = scenario_a();
    let state = run(&problem).unwrap();
    let json = Evaluator::new(&state).generate_full_report().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for section in [
        "stability",
        "student_satisfaction",
        "efficiency",
        "fairness",
        "constraint_satisfaction",
    ] {
        assert!(value.get(section).is_some(), "missing {section}");
    }
    assert_eq!(value["stability"]["blocking_pairs"], 0);
    assert!(value["stability"].get("pairs").is_none());
    assert_eq!(value["efficiency"]["matched_students"], 3);
}

#[test]
fn test_bands() {
    assert_eq!(MatchQuality::from_rate(0.9), MatchQuality::Excellent);
    assert_eq!(MatchQuality::from_rate(0.7), MatchQuality::Good);
    assert_eq!(MatchQuality::from_rate(0.5), MatchQuality::Fair);
    assert_eq!(MatchQuality::from_rate(0.49), MatchQuality::Poor);

    assert_eq!(SatisfactionBand::from_average_rank(1.5), SatisfactionBand::Excellent);
    assert_eq!(SatisfactionBand::from_average_rank(2.5), SatisfactionBand::Good);
    assert_eq!(SatisfactionBand::from_average_rank(3.5), SatisfactionBand::Fair);
    assert_eq!(SatisfactionBand::from_average_rank(3.6), SatisfactionBand::Poor);

    assert_eq!(FairnessBand::from_gini(0.19), FairnessBand::Excellent);
    assert_eq!(FairnessBand::from_gini(0.2), FairnessBand::Good);
    assert_eq!(FairnessBand::from_gini(0.3), FairnessBand::Moderate);
    assert_eq!(FairnessBand::from_gini(0.4), FairnessBand::Poor);
}
