//! Parallel runs over one shared problem.

use rayon::prelude::*;

use capmatch_config::TieBreak;
use capmatch_core::Result;

use crate::engine::{EngineState, MatchingEngine};

/// Runs the engine once per seed with a shuffled tie-break, in parallel.
///
/// The problem and routing index are shared read-only; every run owns its
/// own load counters and assignment map. Results come back in seed order.
///
/// # Example
///
/// ```
/// use capmatch_core::{ExpertiseLevel, Problem, Program, Student, Supervisor, Topic};
/// use capmatch_engine::{run_seeds, MatchingEngine};
///
/// let problem = Problem::from_entities(
///     vec![
///         Student::new("BDBA001", ["T01", "T02", "T03", "T04", "T05"]).unwrap(),
///         Student::new("BDBA002", ["T01", "T02", "T03", "T04", "T05"]).unwrap(),
///     ],
///     vec![Topic::new("T01", "Data Science")],
///     vec![Supervisor::new("SUP01", 1, [(Program::Bdba, "T01", ExpertiseLevel::Expert)]).unwrap()],
/// )
/// .unwrap();
///
/// let engine = MatchingEngine::new(&problem).unwrap();
/// let states = run_seeds(&engine, &[1, 2, 3]).unwrap();
/// assert_eq!(states.len(), 3);
/// assert!(states.iter().all(|s| s.get_round_statistics().matched_count == 1));
/// ```
pub fn run_seeds<'p>(engine: &MatchingEngine<'p>, seeds: &[u64]) -> Result<Vec<EngineState<'p>>> {
    seeds
        .par_iter()
        .map(|&seed| {
            let config = engine
                .config()
                .clone()
                .with_tie_break(TieBreak::Shuffled)
                .with_random_seed(seed);
            engine.run_with(&config)
        })
        .collect()
}
