//! capmatch Engine - bounded round-based deferred acceptance
//!
//! Students propose to the topics on their preference lists, one rank per
//! round. Each proposal is routed to the single supervisor covering the
//! (topic, program) pair and accepted while that supervisor has capacity
//! left. Acceptances are final.
//!
//! # Example
//!
//! ```
//! use capmatch_core::{ExpertiseLevel, Problem, Program, Student, Supervisor, Topic};
//!
//! let problem = Problem::from_entities(
//!     vec![Student::new("BDBA001", ["T01", "T02", "T03", "T04", "T05"]).unwrap()],
//!     vec![Topic::new("T01", "Data Science")],
//!     vec![Supervisor::new("SUP01", 1, [(Program::Bdba, "T01", ExpertiseLevel::Expert)]).unwrap()],
//! )
//! .unwrap();
//!
//! let state = capmatch_engine::run(&problem).unwrap();
//! let result = &state.get_results()[0];
//! assert_eq!(result.project_id.as_ref().map(|t| t.as_str()), Some("T01"));
//! assert_eq!(result.matching_round, Some(1));
//! assert!(state.is_stable());
//! ```

pub mod assignment;
pub mod batch;
pub mod engine;
mod order;
pub mod proposal;
mod scope;
pub mod stability;
pub mod statistics;

pub use assignment::Assignment;
pub use batch::run_seeds;
pub use engine::{run, EngineState, MatchingEngine};
pub use proposal::ProposalOutcome;
pub use stability::{BlockingPair, StabilityReport, StabilityVerifier};
pub use statistics::{RoundStatistics, RoundSummary};
