//! capmatch - Capstone Student-Project Allocation in Rust
//!
//! Give it validated students, topics and supervisors; get back one
//! assignment per student plus an evaluation report.
//!
//! # Example
//!
//! ```rust
//! use capmatch::prelude::*;
//!
//! let problem = Problem::from_entities(
//!     vec![
//!         Student::new("BDBA001", ["T01", "T02", "T03", "T04", "T05"]).unwrap(),
//!         Student::new("BDBA002", ["T01", "T02", "T03", "T04", "T05"]).unwrap(),
//!     ],
//!     vec![Topic::new("T01", "Data Science"), Topic::new("T02", "Finance")],
//!     vec![
//!         Supervisor::new("SUP01", 1, [(Program::Bdba, "T01", ExpertiseLevel::Expert)]).unwrap(),
//!         Supervisor::new("SUP02", 2, [(Program::Bdba, "T02", ExpertiseLevel::Advanced)]).unwrap(),
//!     ],
//! )
//! .unwrap();
//!
//! let (state, report) = capmatch::allocate_with_config(&problem, &MatchConfig::default()).unwrap();
//! assert_eq!(state.get_round_statistics().matched_count, 2);
//! assert_eq!(report.efficiency.student_match_rate, 1.0);
//! assert!(!report.has_defects());
//! ```

// Entity model
pub use capmatch_core::{
    ExpertiseLevel, MatchError, Problem, ProblemStatistics, Program, Result, RoutingIndex,
    Student, StudentId, Supervisor, SupervisorId, Topic, TopicId,
};

// Configuration
pub use capmatch_config::{AdvisorConfig, ConfigError, EnvironmentMode, MatchConfig, TieBreak};

// Engine
pub use capmatch_engine::{
    run, run_seeds, Assignment, EngineState, MatchingEngine, RoundStatistics, RoundSummary,
    StabilityReport,
};

// Evaluation
pub use capmatch_eval::{
    EvaluationReport, Evaluator, Recommendation, Severity, UnmatchedDiagnostic, UnmatchedReason,
};

/// Section types of the evaluation report.
pub mod eval {
    pub use capmatch_eval::*;
}

mod allocate;
pub use allocate::{allocate, allocate_with_config, CONFIG_FILE};

#[cfg(feature = "console")]
pub use capmatch_console as console;

pub mod prelude {
    pub use super::{allocate, allocate_with_config};
    pub use super::{Assignment, EngineState, EvaluationReport, Evaluator, MatchingEngine};
    pub use super::{ExpertiseLevel, Problem, Program, Student, Supervisor, Topic};
    pub use super::{MatchConfig, TieBreak};
}
