//! The feature-model mutation and conformance-checking engine.
//!
//! Every operation here is a synchronous, pure transformation of an
//! in-memory [`FeatureModel`](crate::models::FeatureModel) document: the
//! caller loads the document, applies exactly one operation, and writes the
//! result back in one whole-document replace. The engine never talks to the
//! store.
//!
//! Traversal order is part of the contract: depth-first pre-order matching
//! the document order of each `features` list. It decides which node wins
//! when an operation locates by id and the order of every list the engine
//! produces.

mod conformance;
mod dependency;
mod error;
mod mutate;
mod traverse;
mod variant;

pub use conformance::check_conformance;
pub use dependency::{add_dependency, delete_dependency};
pub use error::{EngineError, EngineResult};
pub use mutate::{delete_feature, insert_feature, update_feature};
pub use traverse::{collect_subtree_ids, find, find_with_parent, flatten};
pub use variant::{
    adapt_business_model, adaptation_name, add_decision, create_business_model,
    delete_business_model, remove_decision, rename_business_model,
};
