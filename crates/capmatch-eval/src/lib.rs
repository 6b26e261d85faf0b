//! capmatch Evaluator
//!
//! Turns a finished [`EngineState`](capmatch_engine::EngineState) into a
//! report with five independent sections (stability, student satisfaction,
//! efficiency, fairness, constraint satisfaction) plus diagnostics for
//! unmatched students, per-program breakdowns and recommendations.

pub mod advisor;
pub mod breakdown;
pub mod constraints;
pub mod diagnostics;
pub mod efficiency;
pub mod evaluator;
pub mod fairness;
pub mod metrics;
pub mod satisfaction;

pub use advisor::{Recommendation, Severity};
pub use breakdown::{ProgramBreakdown, ProgramCoverage};
pub use constraints::{ConstraintSatisfaction, SupervisorLoad};
pub use diagnostics::{
    PreferenceBlocker, PreferenceDiagnostic, UnmatchedDiagnostic, UnmatchedReason,
    UnmatchedSummary,
};
pub use efficiency::{Efficiency, MatchQuality};
pub use evaluator::{EvaluationReport, Evaluator};
pub use fairness::{Fairness, FairnessBand};
pub use satisfaction::{SatisfactionBand, StudentSatisfaction};
