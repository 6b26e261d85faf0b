//! Project topics.

use super::TopicId;

/// A project topic. Topics carry no capacity of their own; only the
/// responsible supervisor's capacity limits how many students take one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Topic {
    pub id: TopicId,
    /// Free-form category label, e.g. "Data Science".
    pub area: String,
}

impl Topic {
    pub fn new(id: impl Into<TopicId>, area: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            area: area.into(),
        }
    }
}
