//! Iterative pre-order walks over the feature tree.
//!
//! All read-side walks share one shape: an explicit stack seeded with the
//! top-level features pushed in reverse, so pop order equals left-to-right
//! document order. Mutation goes through a child-index path computed per
//! operation instead of parent pointers, so nothing on a node can go stale
//! between operations.

use crate::models::{FeatureListEntry, FeatureModel, FeatureNode, VIRTUAL_ROOT_ID};

use super::{EngineError, EngineResult};

/// First pre-order match for `id`, if any.
pub fn find(features: &[FeatureNode], id: u64) -> Option<&FeatureNode> {
    let mut stack: Vec<&FeatureNode> = features.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.features.iter().rev());
    }
    None
}

/// First pre-order match for `id` together with its direct parent's id
/// ([`VIRTUAL_ROOT_ID`] for top-level features).
pub fn find_with_parent(model: &FeatureModel, id: u64) -> Option<(u64, &FeatureNode)> {
    let mut stack: Vec<(u64, &FeatureNode)> = model
        .features
        .iter()
        .rev()
        .map(|node| (VIRTUAL_ROOT_ID, node))
        .collect();

    while let Some((parent_id, node)) = stack.pop() {
        if node.id == id {
            return Some((parent_id, node));
        }
        stack.extend(node.features.iter().rev().map(|child| (node.id, child)));
    }
    None
}

/// Pre-order ids of every feature in `features` and below.
///
/// Called on a node's own `features` list this yields the descendants only;
/// callers that need the node itself append its id.
pub fn collect_subtree_ids(features: &[FeatureNode]) -> Vec<u64> {
    let mut ids = Vec::new();
    let mut stack: Vec<&FeatureNode> = features.iter().rev().collect();

    while let Some(node) = stack.pop() {
        ids.push(node.id);
        stack.extend(node.features.iter().rev());
    }
    ids
}

/// The whole tree as a flat pre-order list with 1-based depth levels.
pub fn flatten(model: &FeatureModel) -> Vec<FeatureListEntry> {
    let mut entries = Vec::new();
    let mut stack: Vec<(usize, &FeatureNode)> =
        model.features.iter().rev().map(|node| (1, node)).collect();

    while let Some((level, node)) = stack.pop() {
        entries.push(FeatureListEntry::new(node.id, node.name.as_str(), level));
        stack.extend(node.features.iter().rev().map(|child| (level + 1, child)));
    }
    entries
}

/// Child-index path from the virtual root down to the first pre-order match
/// for `id`.
fn path_to(features: &[FeatureNode], id: u64) -> Option<Vec<usize>> {
    fn walk(features: &[FeatureNode], id: u64, path: &mut Vec<usize>) -> bool {
        for (index, node) in features.iter().enumerate() {
            path.push(index);
            if node.id == id || walk(&node.features, id, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    walk(features, id, &mut path).then_some(path)
}

fn node_at_mut<'a>(features: &'a mut [FeatureNode], path: &[usize]) -> Option<&'a mut FeatureNode> {
    let (&first, rest) = path.split_first()?;
    let mut node = features.get_mut(first)?;
    for &index in rest {
        node = node.features.get_mut(index)?;
    }
    Some(node)
}

/// Locate-and-transform: apply `transform` to the first pre-order match for
/// `id` and stop. The rest of the tree is never visited.
pub(crate) fn with_node_mut<T>(
    model: &mut FeatureModel,
    id: u64,
    transform: impl FnOnce(&mut FeatureNode) -> T,
) -> EngineResult<T> {
    let path = path_to(&model.features, id).ok_or(EngineError::FeatureNotFound(id))?;
    let node = node_at_mut(&mut model.features, &path).ok_or(EngineError::FeatureNotFound(id))?;
    Ok(transform(node))
}

/// The mutable child list owned by `parent_id` ([`VIRTUAL_ROOT_ID`] for the
/// model's own top level).
pub(crate) fn children_of_mut(
    model: &mut FeatureModel,
    parent_id: u64,
) -> EngineResult<&mut Vec<FeatureNode>> {
    if parent_id == VIRTUAL_ROOT_ID {
        return Ok(&mut model.features);
    }
    let path = path_to(&model.features, parent_id).ok_or(EngineError::FeatureNotFound(parent_id))?;
    let node =
        node_at_mut(&mut model.features, &path).ok_or(EngineError::FeatureNotFound(parent_id))?;
    Ok(&mut node.features)
}

/// Visit every node in pre-order, mutably.
pub(crate) fn for_each_mut(features: &mut [FeatureNode], visit: &mut impl FnMut(&mut FeatureNode)) {
    for node in features {
        visit(node);
        for_each_mut(&mut node.features, visit);
    }
}
