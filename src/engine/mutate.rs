//! Insert, update (including re-parenting) and cascade-delete of features.

use crate::models::{FeatureInput, FeatureModel, FeatureNode, VIRTUAL_ROOT_ID};

use super::traverse::{children_of_mut, collect_subtree_ids, find, find_with_parent, with_node_mut};
use super::{EngineError, EngineResult};

/// Insert a new feature under `input.parent_id` and return its id.
///
/// The id comes from the model's counter; the node starts with empty
/// dependency sets, no selections, and is deletable.
pub fn insert_feature(model: &mut FeatureModel, input: &FeatureInput) -> EngineResult<u64> {
    let id = model.feature_id_counter;
    let mut node = FeatureNode::new(id, input.name.clone());
    node.is_mandatory = input.is_mandatory;
    node.has_or_subfeatures = input.has_or_subfeatures;
    node.has_x_or_subfeatures = input.has_x_or_subfeatures;

    children_of_mut(model, input.parent_id)?.push(node);
    model.feature_id_counter += 1;
    model.rebuild_feature_map();
    Ok(id)
}

/// Update a feature's name and group flags, moving it under
/// `input.parent_id` when that differs from its current parent.
///
/// A move carries the feature's id, subtree, dependency sets, selections and
/// delete protection along unchanged; only name and flags take the new
/// values. Moving a feature into its own subtree is rejected, as is making
/// it its own parent.
pub fn update_feature(model: &mut FeatureModel, id: u64, input: &FeatureInput) -> EngineResult<()> {
    let (current_parent_id, subtree_ids) = {
        let (parent_id, node) =
            find_with_parent(model, id).ok_or(EngineError::FeatureNotFound(id))?;
        (parent_id, collect_subtree_ids(&node.features))
    };

    if input.parent_id == current_parent_id {
        with_node_mut(model, id, |node| {
            node.name = input.name.clone();
            node.is_mandatory = input.is_mandatory;
            node.has_or_subfeatures = input.has_or_subfeatures;
            node.has_x_or_subfeatures = input.has_x_or_subfeatures;
        })?;
        model.rebuild_feature_map();
        return Ok(());
    }

    if input.parent_id == id || subtree_ids.contains(&input.parent_id) {
        return Err(EngineError::InvalidArgument(format!(
            "feature {id} cannot become a subfeature of its own subtree"
        )));
    }
    if input.parent_id != VIRTUAL_ROOT_ID && find(&model.features, input.parent_id).is_none() {
        return Err(EngineError::FeatureNotFound(input.parent_id));
    }

    // Detach from the old parent, then rebuild under the new one.
    let detached = {
        let siblings = children_of_mut(model, current_parent_id)?;
        let index = siblings
            .iter()
            .position(|node| node.id == id)
            .ok_or(EngineError::FeatureNotFound(id))?;
        siblings.remove(index)
    };

    let moved = FeatureNode {
        id,
        name: input.name.clone(),
        is_mandatory: input.is_mandatory,
        has_or_subfeatures: input.has_or_subfeatures,
        has_x_or_subfeatures: input.has_x_or_subfeatures,
        is_deletable: detached.is_deletable,
        requiring_dependency_from: detached.requiring_dependency_from,
        requiring_dependency_to: detached.requiring_dependency_to,
        excluding_dependency: detached.excluding_dependency,
        features: detached.features,
        business_model_ids: detached.business_model_ids,
    };
    children_of_mut(model, input.parent_id)?.push(moved);
    model.rebuild_feature_map();
    Ok(())
}

/// Delete a feature with its whole subtree.
///
/// Every dependency edge pointing at the deleted subtree is severed on the
/// remaining nodes, whichever side of the tree they live on, and the feature
/// map is rebuilt without the deleted ids.
pub fn delete_feature(model: &mut FeatureModel, id: u64) -> EngineResult<()> {
    let (parent_id, doomed_ids) = {
        let (parent_id, node) =
            find_with_parent(model, id).ok_or(EngineError::FeatureNotFound(id))?;
        let mut ids = collect_subtree_ids(&node.features);
        ids.push(id);
        (parent_id, ids)
    };

    strip_dependencies(&mut model.features, &doomed_ids);

    let siblings = children_of_mut(model, parent_id)?;
    let index = siblings
        .iter()
        .position(|node| node.id == id)
        .ok_or(EngineError::FeatureNotFound(id))?;
    siblings.remove(index);

    model.rebuild_feature_map();
    Ok(())
}

fn strip_dependencies(features: &mut [FeatureNode], ids: &[u64]) {
    for node in features {
        node.requiring_dependency_from.retain(|e| !ids.contains(e));
        node.requiring_dependency_to.retain(|e| !ids.contains(e));
        node.excluding_dependency.retain(|e| !ids.contains(e));
        strip_dependencies(&mut node.features, ids);
    }
}
