//! Per-program views of a run.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use capmatch_core::{Problem, Program, RoutingIndex};
use capmatch_engine::Assignment;

use crate::efficiency::ratio;
use crate::metrics;

/// Match outcome of one program's students.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramBreakdown {
    pub program: Program,
    pub total: usize,
    pub matched: usize,
    pub match_rate: f64,
    pub average_rank: Option<f64>,
}

impl ProgramBreakdown {
    /// One entry per program that has students, in `Program` order.
    pub fn collect(assignments: &[Assignment]) -> Vec<Self> {
        let mut ranks: BTreeMap<Program, (usize, Vec<f64>)> = BTreeMap::new();
        for a in assignments {
            let entry = ranks.entry(a.program).or_default();
            entry.0 += 1;
            if let Some(rank) = a.student_rank {
                entry.1.push(rank as f64);
            }
        }

        ranks
            .into_iter()
            .map(|(program, (total, matched))| ProgramBreakdown {
                program,
                total,
                matched: matched.len(),
                match_rate: ratio(matched.len(), total),
                average_rank: metrics::mean(&matched),
            })
            .collect()
    }
}

/// Share of topics some supervisor covers for one program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramCoverage {
    pub program: Program,
    pub covered_topics: usize,
    pub total_topics: usize,
    pub coverage: f64,
}

impl ProgramCoverage {
    /// Coverage for every program that has at least one student.
    pub fn collect(problem: &Problem, routing: &RoutingIndex) -> Vec<Self> {
        let programs: BTreeSet<Program> = problem.students().map(|s| s.program()).collect();
        let total_topics = problem.topic_count();

        programs
            .into_iter()
            .map(|program| {
                let covered_topics = problem
                    .topics()
                    .filter(|t| routing.covers(&t.id, program))
                    .count();
                ProgramCoverage {
                    program,
                    covered_topics,
                    total_topics,
                    coverage: ratio(covered_topics, total_topics),
                }
            })
            .collect()
    }
}
