//! Conformance checking of one business model against the feature tree.

use crate::models::{ConformanceReport, FeatureModel, FeatureNode};

use super::traverse::find;
use super::{EngineError, EngineResult};

fn is_selected(node: &FeatureNode, business_model_id: u64) -> bool {
    node.business_model_ids.contains(&business_model_id)
}

/// Ids of every feature selected in the business model, full tree, pre-order.
/// Ancestor selection does not matter here; requires/excludes edges are
/// checked against raw membership.
fn selected_feature_ids(features: &[FeatureNode], business_model_id: u64) -> Vec<u64> {
    let mut selected = Vec::new();
    let mut stack: Vec<&FeatureNode> = features.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if is_selected(node, business_model_id) {
            selected.push(node.id);
        }
        stack.extend(node.features.iter().rev());
    }
    selected
}

fn count_selected_children(node: &FeatureNode, business_model_id: u64) -> usize {
    node.features
        .iter()
        .filter(|child| is_selected(child, business_model_id))
        .count()
}

/// Check every structural and dependency rule the business model's current
/// selection violates.
///
/// The walk is pre-order over the selected part of the tree: a feature is
/// visited only if it is mandatory or selected, and a skipped feature prunes
/// its whole subtree — decisions below an unselected optional feature are
/// not judged on their own. Each visited feature can violate several rules;
/// every violation appends its own message while the feature id is recorded
/// once.
pub fn check_conformance(
    model: &FeatureModel,
    business_model_id: u64,
) -> EngineResult<ConformanceReport> {
    if !model.business_model_map.contains_key(&business_model_id) {
        return Err(EngineError::BusinessModelNotFound(business_model_id));
    }

    let selected = selected_feature_ids(&model.features, business_model_id);
    let mut report = ConformanceReport::default();

    let visits = |node: &FeatureNode| node.is_mandatory || is_selected(node, business_model_id);

    let mut stack: Vec<&FeatureNode> = model
        .features
        .iter()
        .rev()
        .filter(|node| visits(node))
        .collect();

    while let Some(node) = stack.pop() {
        if node.is_mandatory && !is_selected(node, business_model_id) {
            report.record(node.id, format!("{} is mandatory", node.name));
        }

        if node.has_or_subfeatures && count_selected_children(node, business_model_id) == 0 {
            report.record(
                node.id,
                format!("{} needs at least one subfeature", node.name),
            );
        }

        if node.has_x_or_subfeatures && count_selected_children(node, business_model_id) != 1 {
            report.record(
                node.id,
                format!("{} needs exactly one subfeature", node.name),
            );
        }

        for required in &node.requiring_dependency_to {
            if !selected.contains(required) {
                report.record(
                    node.id,
                    format!(
                        "{} requires the feature {}",
                        node.name,
                        feature_name(model, *required)
                    ),
                );
            }
        }

        for excluded in &node.excluding_dependency {
            if selected.contains(excluded) {
                report.record(
                    node.id,
                    format!(
                        "{} excludes the feature {}",
                        node.name,
                        feature_name(model, *excluded)
                    ),
                );
            }
        }

        stack.extend(node.features.iter().rev().filter(|child| visits(child)));
    }

    Ok(report)
}

/// Display name for a dependency target, falling back to the tree when the
/// map misses and to the raw id when the feature is gone entirely.
fn feature_name(model: &FeatureModel, id: u64) -> String {
    model
        .feature_map
        .get(&id)
        .cloned()
        .or_else(|| find(&model.features, id).map(|node| node.name.clone()))
        .unwrap_or_else(|| format!("#{id}"))
}
