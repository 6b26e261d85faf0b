//! Outcome of a single proposal.

use capmatch_core::Route;

/// What happened when a student proposed to a topic.
///
/// Rejections are ordinary control flow: the student simply stays
/// unassigned and proposes again next round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// The responsible supervisor had a free slot.
    Accepted(Route),
    /// The topic is not part of the problem.
    UnknownTopic,
    /// No supervisor covers the topic for the student's program.
    NoCoverage,
    /// The responsible supervisor is full.
    AtCapacity,
}

impl ProposalOutcome {
    /// Short label used in log events.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalOutcome::Accepted(_) => "accepted",
            ProposalOutcome::UnknownTopic => "unknown_topic",
            ProposalOutcome::NoCoverage => "no_coverage",
            ProposalOutcome::AtCapacity => "at_capacity",
        }
    }
}
