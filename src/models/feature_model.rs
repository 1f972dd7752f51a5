use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::FeatureNode;

/// The root aggregate: one feature model per stored document.
///
/// `id` and `rev` are managed by the document store — `id` stays empty until
/// the first save and `rev` guards whole-document replacement against
/// concurrent writers. Everything else is engine territory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureModel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub rev: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Next unused feature id. Strictly greater than every id in the tree.
    pub feature_id_counter: u64,
    /// Next unused business model id.
    pub business_model_id_counter: u64,
    /// Top-level canvas categories, in document order.
    pub features: Vec<FeatureNode>,
    /// Feature id -> display name. A derived index over the tree, rebuilt
    /// after every structural mutation; never authoritative.
    #[serde(default)]
    pub feature_map: BTreeMap<u64, String>,
    /// Business model id -> display name. Holds every business model created
    /// and not yet deleted.
    #[serde(default)]
    pub business_model_map: BTreeMap<u64, String>,
}

/// The nine canonical Business Model Canvas categories every new model
/// starts with. Ids 1-9, not deletable.
const CANVAS_CATEGORIES: [&str; 9] = [
    "Value Proposition",
    "Customer Segment",
    "Customer Relationships",
    "Customer Channels",
    "Key Partners",
    "Key Activities",
    "Key Resources",
    "Revenue Streams",
    "Cost Structure",
];

impl FeatureModel {
    /// A fresh canvas: the nine canonical categories, counters primed past
    /// the reserved category ids, no business models yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let features = CANVAS_CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, category)| FeatureNode::category(i as u64 + 1, *category))
            .collect();

        let mut model = Self {
            id: String::new(),
            rev: 0,
            name: name.into(),
            description: description.into(),
            feature_id_counter: 10,
            business_model_id_counter: 1,
            features,
            feature_map: BTreeMap::new(),
            business_model_map: BTreeMap::new(),
        };
        model.rebuild_feature_map();
        model
    }

    /// Recompute the id -> name index from the tree.
    ///
    /// The map is a display convenience; deriving it wholesale keeps it from
    /// ever drifting out of sync with the tree it mirrors.
    pub fn rebuild_feature_map(&mut self) {
        fn collect(features: &[FeatureNode], map: &mut BTreeMap<u64, String>) {
            for feature in features {
                map.insert(feature.id, feature.name.clone());
                collect(&feature.features, map);
            }
        }

        let mut map = BTreeMap::new();
        collect(&self.features, &mut map);
        self.feature_map = map;
    }
}

/// Input for creating a new feature model document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModelInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Input for renaming/redescribing a feature model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModelInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Listing projection: what the model overview needs, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureModelSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Input for creating or renaming a business model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessModelInput {
    pub name: String,
}

/// Input for selecting a feature in a business model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionInput {
    pub feature_id: u64,
}
