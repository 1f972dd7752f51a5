//! Mirrored requires/excludes edges between two features.
//!
//! Every edge lives on both endpoints: "from requires to" is stored as `to`
//! in from's `requiringDependencyTo` and `from` in to's
//! `requiringDependencyFrom`; exclusions store each other's id. Add and
//! delete validate up front and touch both endpoints or neither.

use crate::models::{DependencyKind, FeatureModel, FeatureNode};

use super::traverse::{find, with_node_mut};
use super::{EngineError, EngineResult};

/// Which of a node's three dependency arrays an assignment writes.
#[derive(Debug, Clone, Copy)]
enum Slot {
    RequiresFrom,
    RequiresTo,
    Excludes,
}

impl Slot {
    fn of(self, node: &FeatureNode) -> &Vec<u64> {
        match self {
            Slot::RequiresFrom => &node.requiring_dependency_from,
            Slot::RequiresTo => &node.requiring_dependency_to,
            Slot::Excludes => &node.excluding_dependency,
        }
    }

    fn of_mut(self, node: &mut FeatureNode) -> &mut Vec<u64> {
        match self {
            Slot::RequiresFrom => &mut node.requiring_dependency_from,
            Slot::RequiresTo => &mut node.requiring_dependency_to,
            Slot::Excludes => &mut node.excluding_dependency,
        }
    }
}

/// The two (node, array, entry) writes one edge declaration expands to.
/// Kept in the declaration order the front end relies on: target endpoint
/// first, source endpoint second.
fn assignments(kind: DependencyKind, from: u64, to: u64) -> [(u64, Slot, u64); 2] {
    match kind {
        DependencyKind::RequiresTo => [(to, Slot::RequiresFrom, from), (from, Slot::RequiresTo, to)],
        DependencyKind::RequiresFrom => {
            [(to, Slot::RequiresTo, from), (from, Slot::RequiresFrom, to)]
        }
        DependencyKind::Excludes => [(to, Slot::Excludes, from), (from, Slot::Excludes, to)],
    }
}

fn ensure_endpoints(model: &FeatureModel, from: u64, to: u64) -> EngineResult<()> {
    if from == to {
        return Err(EngineError::InvalidArgument(format!(
            "feature {from} cannot depend on itself"
        )));
    }
    for id in [from, to] {
        if find(&model.features, id).is_none() {
            return Err(EngineError::FeatureNotFound(id));
        }
    }
    Ok(())
}

/// Add a dependency edge, writing both endpoints' mirrored entries.
///
/// Declaring an edge that already exists fails rather than stacking a
/// duplicate entry.
pub fn add_dependency(
    model: &mut FeatureModel,
    kind: DependencyKind,
    from: u64,
    to: u64,
) -> EngineResult<()> {
    ensure_endpoints(model, from, to)?;

    let writes = assignments(kind, from, to);
    for (node_id, slot, entry) in writes {
        let node = find(&model.features, node_id).ok_or(EngineError::FeatureNotFound(node_id))?;
        if slot.of(node).contains(&entry) {
            return Err(EngineError::DuplicateDependency);
        }
    }

    for (node_id, slot, entry) in writes {
        with_node_mut(model, node_id, |node| slot.of_mut(node).push(entry))?;
    }
    Ok(())
}

/// Remove a dependency edge, erasing both endpoints' mirrored entries.
pub fn delete_dependency(
    model: &mut FeatureModel,
    kind: DependencyKind,
    from: u64,
    to: u64,
) -> EngineResult<()> {
    ensure_endpoints(model, from, to)?;

    let writes = assignments(kind, from, to);
    for (node_id, slot, entry) in writes {
        let node = find(&model.features, node_id).ok_or(EngineError::FeatureNotFound(node_id))?;
        if !slot.of(node).contains(&entry) {
            return Err(EngineError::DependencyNotFound);
        }
    }

    for (node_id, slot, entry) in writes {
        with_node_mut(model, node_id, |node| {
            slot.of_mut(node).retain(|e| *e != entry);
        })?;
    }
    Ok(())
}
