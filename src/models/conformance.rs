use serde::{Deserialize, Serialize};

/// Result of checking one business model against the feature tree.
///
/// `messages` lists every violated rule in traversal order; a feature that
/// breaks several rules appears once in `violated_feature_ids` (insertion
/// order) but contributes one message per violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceReport {
    pub violated_feature_ids: Vec<u64>,
    pub messages: Vec<String>,
}

impl ConformanceReport {
    /// Record a violation of `feature_id` with its message.
    pub(crate) fn record(&mut self, feature_id: u64, message: String) {
        if !self.violated_feature_ids.contains(&feature_id) {
            self.violated_feature_ids.push(feature_id);
        }
        self.messages.push(message);
    }

    pub fn is_conforming(&self) -> bool {
        self.messages.is_empty()
    }
}
