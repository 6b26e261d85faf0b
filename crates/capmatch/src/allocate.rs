//! One-call allocation entry points.

use tracing::{info, warn};

use capmatch_config::MatchConfig;
use capmatch_core::{Problem, Result};
use capmatch_engine::{EngineState, MatchingEngine};
use capmatch_eval::{EvaluationReport, Evaluator};

/// Configuration file read by [`allocate`] from the working directory.
pub const CONFIG_FILE: &str = "capmatch.toml";

/// Runs the engine and evaluates the result.
///
/// Reads [`CONFIG_FILE`] if it exists and is valid; defaults otherwise.
pub fn allocate(problem: &Problem) -> Result<(EngineState<'_>, EvaluationReport)> {
    let config = MatchConfig::load(CONFIG_FILE).unwrap_or_default();
    allocate_with_config(problem, &config)
}

/// Like [`allocate`] with an explicit configuration.
pub fn allocate_with_config<'p>(
    problem: &'p Problem,
    config: &MatchConfig,
) -> Result<(EngineState<'p>, EvaluationReport)> {
    #[cfg(feature = "console")]
    capmatch_console::init();

    let state = MatchingEngine::new(problem)?.run_with(config)?;
    let report = Evaluator::new(&state).generate_full_report();

    if report.has_defects() {
        warn!(
            event = "allocation_defect",
            blocking_pairs = report.stability.blocking_pairs,
            violations = report.constraint_satisfaction.violation_count,
        );
    } else {
        info!(
            event = "allocation_done",
            matched = report.efficiency.matched_students,
            total = report.efficiency.total_students,
            duration_ms = state.duration().as_millis() as u64,
        );
    }

    Ok((state, report))
}
