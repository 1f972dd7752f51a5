//! Business model lifecycle over the feature tree.
//!
//! A business model is one id projected across every node's
//! `businessModelIds` selection set plus a display name in
//! `businessModelMap`. Creation seeds a maximal selection the user then
//! prunes; adaptation clones another business model's selection instead.

use crate::models::{FeatureModel, FeatureNode};

use super::traverse::{for_each_mut, with_node_mut};
use super::{EngineError, EngineResult};

const ADAPTATION_MARKER: &str = " - Adaptation#";

fn ensure_business_model(model: &FeatureModel, id: u64) -> EngineResult<()> {
    if model.business_model_map.contains_key(&id) {
        Ok(())
    } else {
        Err(EngineError::BusinessModelNotFound(id))
    }
}

/// Create a business model and return its id.
///
/// Every existing feature starts selected; deselecting is the user's first
/// modeling step, not a precondition.
pub fn create_business_model(model: &mut FeatureModel, name: &str) -> EngineResult<u64> {
    let id = model.business_model_id_counter;
    for_each_mut(&mut model.features, &mut |node: &mut FeatureNode| {
        node.business_model_ids.push(id);
    });
    model.business_model_map.insert(id, name.to_string());
    model.business_model_id_counter += 1;
    Ok(id)
}

pub fn rename_business_model(model: &mut FeatureModel, id: u64, name: &str) -> EngineResult<()> {
    ensure_business_model(model, id)?;
    model.business_model_map.insert(id, name.to_string());
    Ok(())
}

/// Delete a business model: every node drops the id, the name entry goes.
pub fn delete_business_model(model: &mut FeatureModel, id: u64) -> EngineResult<()> {
    ensure_business_model(model, id)?;
    for_each_mut(&mut model.features, &mut |node: &mut FeatureNode| {
        node.business_model_ids.retain(|e| *e != id);
    });
    model.business_model_map.remove(&id);
    Ok(())
}

/// Select a feature in a business model. Selecting an already selected
/// feature is a no-op.
pub fn add_decision(
    model: &mut FeatureModel,
    feature_id: u64,
    business_model_id: u64,
) -> EngineResult<()> {
    ensure_business_model(model, business_model_id)?;
    with_node_mut(model, feature_id, |node| {
        if !node.business_model_ids.contains(&business_model_id) {
            node.business_model_ids.push(business_model_id);
        }
    })
}

/// Deselect a feature in a business model, together with everything beneath
/// it: dropping a category drops all of its decisions.
pub fn remove_decision(
    model: &mut FeatureModel,
    feature_id: u64,
    business_model_id: u64,
) -> EngineResult<()> {
    ensure_business_model(model, business_model_id)?;
    with_node_mut(model, feature_id, |node| {
        node.business_model_ids.retain(|e| *e != business_model_id);
        for_each_mut(&mut node.features, &mut |descendant: &mut FeatureNode| {
            descendant.business_model_ids.retain(|e| *e != business_model_id);
        });
    })
}

/// Create an adaptation of `source_id`: a new business model whose selection
/// set is an exact copy of the source's at this moment.
pub fn adapt_business_model(
    model: &mut FeatureModel,
    source_id: u64,
    name: &str,
) -> EngineResult<u64> {
    ensure_business_model(model, source_id)?;
    let id = model.business_model_id_counter;
    for_each_mut(&mut model.features, &mut |node: &mut FeatureNode| {
        if node.business_model_ids.contains(&source_id)
            && !node.business_model_ids.contains(&id)
        {
            node.business_model_ids.push(id);
        }
    });
    model.business_model_map.insert(id, name.to_string());
    model.business_model_id_counter += 1;
    Ok(id)
}

/// Display name for the next adaptation of `base`: `"<base> - Adaptation#<n>"`
/// with the counter picking up where the name left off.
pub fn adaptation_name(base: &str) -> String {
    if let Some((prefix, suffix)) = base.rsplit_once(ADAPTATION_MARKER) {
        let n = suffix.parse::<u32>().map(|n| n + 1).unwrap_or(1);
        return format!("{prefix}{ADAPTATION_MARKER}{n}");
    }
    format!("{base}{ADAPTATION_MARKER}1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptation_name_starts_at_one() {
        assert_eq!(adaptation_name("Freemium"), "Freemium - Adaptation#1");
    }

    #[test]
    fn adaptation_name_counts_up() {
        assert_eq!(
            adaptation_name("Freemium - Adaptation#3"),
            "Freemium - Adaptation#4"
        );
    }

    #[test]
    fn adaptation_name_recovers_from_a_mangled_suffix() {
        assert_eq!(
            adaptation_name("Freemium - Adaptation#beta"),
            "Freemium - Adaptation#1"
        );
    }
}
