use serde::{Deserialize, Serialize};

/// The three dependency edge declarations the canvas front end can make.
///
/// `RequiresTo` and `RequiresFrom` describe the same directed "requires"
/// relation from either endpoint's perspective; both end up as one mirrored
/// pair of entries. `Excludes` is symmetric.
///
/// Serialized names match the node field each declaration writes first, which
/// is what the original document format used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyKind {
    #[serde(rename = "requiringDependencyTo")]
    RequiresTo,
    #[serde(rename = "requiringDependencyFrom")]
    RequiresFrom,
    #[serde(rename = "excludingDependency")]
    Excludes,
}

/// Input for adding or removing a dependency edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyInput {
    #[serde(rename = "dependencyType")]
    pub kind: DependencyKind,
    pub from_feature_id: u64,
    pub to_feature_id: u64,
}
