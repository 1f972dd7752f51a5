//! Collaborative business-model variability modeling on a feature-model
//! formalism.
//!
//! The [`engine`] module holds the reusable core: pure tree mutation,
//! mirrored dependency edges, business-model selection state and conformance
//! checking over one [`models::FeatureModel`] document. [`db`] persists one
//! JSON document per model with optimistic revisions; [`api`] exposes the
//! engine operations as a small HTTP surface for the canvas front end.

pub mod api;
pub mod db;
pub mod engine;
pub mod models;
