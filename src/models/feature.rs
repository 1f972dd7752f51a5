use serde::{Deserialize, Serialize};

/// Id of the implicit root above the top-level canvas categories.
///
/// No real feature is ever assigned this id; mutation targets use it to
/// address the model's own `features` list.
pub const VIRTUAL_ROOT_ID: u64 = 0;

/// A node of the feature tree.
///
/// Nodes are owned exclusively by their parent's `features` list — no node
/// has two parents and the tree has no cycles. Cross-tree relationships are
/// kept as mirrored id sets: `requiringDependencyTo` holds the features this
/// one requires, `requiringDependencyFrom` is the inverse view of those same
/// edges, and `excludingDependency` is symmetric (both endpoints list each
/// other).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureNode {
    /// Unique within the whole model, allocated from the model's counter
    /// and never reused.
    pub id: u64,
    pub name: String,
    /// Must be selected whenever its parent is selected, in every business
    /// model.
    pub is_mandatory: bool,
    /// At least one direct child must be selected per business model.
    pub has_or_subfeatures: bool,
    /// Exactly one direct child must be selected per business model.
    pub has_x_or_subfeatures: bool,
    /// False for the nine canonical canvas categories. A guard flag for the
    /// caller; the engine preserves it but does not enforce it.
    pub is_deletable: bool,
    pub requiring_dependency_from: Vec<u64>,
    pub requiring_dependency_to: Vec<u64>,
    pub excluding_dependency: Vec<u64>,
    /// Direct children, in document order.
    pub features: Vec<FeatureNode>,
    /// Business models in which this feature is currently selected.
    pub business_model_ids: Vec<u64>,
}

impl FeatureNode {
    /// A fresh user-created feature: no flags, no edges, no selections.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_mandatory: false,
            has_or_subfeatures: false,
            has_x_or_subfeatures: false,
            is_deletable: true,
            requiring_dependency_from: Vec::new(),
            requiring_dependency_to: Vec::new(),
            excluding_dependency: Vec::new(),
            features: Vec::new(),
            business_model_ids: Vec::new(),
        }
    }

    /// A canonical canvas category (top-level, protected from deletion).
    pub fn category(id: u64, name: impl Into<String>) -> Self {
        Self {
            is_deletable: false,
            ..Self::new(id, name)
        }
    }
}

/// Input for inserting or updating a feature.
///
/// `parent_id` is the feature to attach under, or [`VIRTUAL_ROOT_ID`] for a
/// new top-level category. On update, a `parent_id` that differs from the
/// current parent moves the feature (with its whole subtree) there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInput {
    pub name: String,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub has_or_subfeatures: bool,
    #[serde(default)]
    pub has_x_or_subfeatures: bool,
    #[serde(default)]
    pub parent_id: u64,
}

/// A feature together with its computed parent id.
///
/// The tree stores no parent pointers; the parent id is established by the
/// traversal that located the feature and is only valid against the document
/// snapshot it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureWithParent {
    pub parent_id: u64,
    pub feature: FeatureNode,
}

/// One row of the flattened feature list.
///
/// `level` is 1-based (top-level categories are level 1); `level_name` is the
/// depth-dash label the front end shows in "subfeature of" selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureListEntry {
    pub id: u64,
    pub name: String,
    pub level: usize,
    pub level_name: String,
}

impl FeatureListEntry {
    pub fn new(id: u64, name: impl Into<String>, level: usize) -> Self {
        let name = name.into();
        let level_name = format!("{} {}", "-".repeat(level), name);
        Self {
            id,
            name,
            level,
            level_name,
        }
    }
}
