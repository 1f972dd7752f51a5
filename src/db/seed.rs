//! Canned example documents for `bmdl seed` and the reset endpoint.
//!
//! The worked example is built through the engine rather than pasted as
//! JSON, so it can never drift from the invariants the engine maintains.

use crate::engine::{self, EngineResult};
use crate::models::{DependencyKind, FeatureInput, FeatureModel, VIRTUAL_ROOT_ID};

/// The documents a reset installs: a worked to-do-app example and an
/// untouched canvas.
pub fn example_documents() -> EngineResult<Vec<FeatureModel>> {
    Ok(vec![
        simple_todo_example()?,
        FeatureModel::new(
            "Blank Canvas",
            "An untouched Business Model Canvas to start from.",
        ),
    ])
}

/// A to-do application canvas with an XOR'd value proposition, an XOR'd
/// revenue stream, one requires edge, one excludes edge and two conforming
/// business models.
fn simple_todo_example() -> EngineResult<FeatureModel> {
    let mut model = FeatureModel::new(
        "Simple ToDo Example",
        "A to-do application modeled as alternative privacy-first and ad-funded business models.",
    );

    // Value Proposition and Revenue Streams become XOR decision points.
    engine::update_feature(&mut model, 1, &group("Value Proposition", true))?;
    engine::update_feature(&mut model, 8, &group("Revenue Streams", true))?;

    let save_privacy = engine::insert_feature(&mut model, &feature("Save Privacy", 1))?;
    let collaborative = engine::insert_feature(&mut model, &feature("Collaborative Lists", 1))?;
    let advertisements = engine::insert_feature(&mut model, &feature("Advertisements", 8))?;
    let premium = engine::insert_feature(&mut model, &feature("Premium Subscription", 8))?;
    let analytics = engine::insert_feature(&mut model, &feature("Data Analytics", 6))?;

    engine::add_dependency(
        &mut model,
        DependencyKind::RequiresTo,
        collaborative,
        analytics,
    )?;
    engine::add_dependency(
        &mut model,
        DependencyKind::Excludes,
        save_privacy,
        advertisements,
    )?;

    let privacy_first = engine::create_business_model(&mut model, "Privacy First")?;
    engine::remove_decision(&mut model, collaborative, privacy_first)?;
    engine::remove_decision(&mut model, advertisements, privacy_first)?;

    let ad_funded = engine::create_business_model(&mut model, "Ad Funded")?;
    engine::remove_decision(&mut model, save_privacy, ad_funded)?;
    engine::remove_decision(&mut model, premium, ad_funded)?;

    Ok(model)
}

fn feature(name: &str, parent_id: u64) -> FeatureInput {
    FeatureInput {
        name: name.to_string(),
        is_mandatory: false,
        has_or_subfeatures: false,
        has_x_or_subfeatures: false,
        parent_id,
    }
}

/// A mandatory XOR group kept at the top level.
fn group(name: &str, mandatory: bool) -> FeatureInput {
    FeatureInput {
        name: name.to_string(),
        is_mandatory: mandatory,
        has_or_subfeatures: false,
        has_x_or_subfeatures: true,
        parent_id: VIRTUAL_ROOT_ID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{check_conformance, find};
    use crate::models::FeatureNode;

    fn all_nodes(features: &[FeatureNode]) -> Vec<&FeatureNode> {
        let mut nodes = Vec::new();
        let mut stack: Vec<&FeatureNode> = features.iter().rev().collect();
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.features.iter().rev());
        }
        nodes
    }

    #[test]
    fn example_dependencies_are_mirrored() {
        let model = simple_todo_example().unwrap();

        for node in all_nodes(&model.features) {
            for required in &node.requiring_dependency_to {
                let target = find(&model.features, *required).unwrap();
                assert!(target.requiring_dependency_from.contains(&node.id));
            }
            for excluded in &node.excluding_dependency {
                let target = find(&model.features, *excluded).unwrap();
                assert!(target.excluding_dependency.contains(&node.id));
            }
        }
    }

    #[test]
    fn example_maps_match_the_tree() {
        let model = simple_todo_example().unwrap();

        let tree_ids: Vec<u64> = all_nodes(&model.features).iter().map(|n| n.id).collect();
        assert_eq!(model.feature_map.len(), tree_ids.len());
        for id in &tree_ids {
            assert!(model.feature_map.contains_key(id));
            assert!(*id < model.feature_id_counter);
        }

        for node in all_nodes(&model.features) {
            for business_model_id in &node.business_model_ids {
                assert!(model.business_model_map.contains_key(business_model_id));
            }
        }
    }

    #[test]
    fn example_business_models_conform() {
        let model = simple_todo_example().unwrap();

        for id in model.business_model_map.keys() {
            let report = check_conformance(&model, *id).unwrap();
            assert!(
                report.is_conforming(),
                "business model {id} violates: {:?}",
                report.messages
            );
        }
    }
}
