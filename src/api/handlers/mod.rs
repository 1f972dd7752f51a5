use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::db::{seed, DocumentStore, StoreError};
use crate::engine::{self, EngineError};
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Map an engine failure onto a response. Engine errors are always safe to
/// expose: they name ids and rules, never internals.
fn engine_error(e: EngineError) -> (StatusCode, String) {
    let status = match e {
        EngineError::FeatureNotFound(_) | EngineError::BusinessModelNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::BAD_REQUEST,
    };
    tracing::warn!("Engine error: {}", e);
    (status, e.to_string())
}

/// Map a store failure onto a response. A revision conflict means another
/// session wrote the document first; the client reloads and retries. Real
/// database errors are logged and sanitized.
fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        StoreError::Conflict(_) => {
            tracing::warn!("Write conflict: {}", e);
            (StatusCode::CONFLICT, e.to_string())
        }
        _ => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// Load the document, apply one engine transformation, store the result.
/// The whole-document replace either lands as one write or not at all.
fn apply(
    store: &DocumentStore,
    model_id: &str,
    transform: impl FnOnce(&mut FeatureModel) -> Result<(), EngineError>,
) -> Result<FeatureModel, (StatusCode, String)> {
    let mut model = store.get(model_id).map_err(store_error)?;
    transform(&mut model).map_err(engine_error)?;
    store.put(model).map_err(store_error)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Feature models
// ============================================================

pub async fn list_models(
    State(store): State<DocumentStore>,
) -> Result<Json<Vec<FeatureModelSummary>>, (StatusCode, String)> {
    store.list().map(Json).map_err(store_error)
}

pub async fn create_model(
    State(store): State<DocumentStore>,
    Json(input): Json<CreateModelInput>,
) -> Result<(StatusCode, Json<FeatureModel>), (StatusCode, String)> {
    let model = FeatureModel::new(input.name, input.description);
    store
        .insert(model)
        .map(|m| (StatusCode::CREATED, Json(m)))
        .map_err(store_error)
}

pub async fn get_model(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    store.get(&id).map(Json).map_err(store_error)
}

pub async fn update_model(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    Json(input): Json<UpdateModelInput>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        model.name = input.name.clone();
        model.description = input.description.clone();
        Ok(())
    })
    .map(Json)
}

pub async fn delete_model(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    if store.remove(&id).map_err(store_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Model not found".to_string()))
    }
}

// ============================================================
// Features
// ============================================================

pub async fn list_features(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FeatureListEntry>>, (StatusCode, String)> {
    let model = store.get(&id).map_err(store_error)?;
    Ok(Json(engine::flatten(&model)))
}

pub async fn create_feature(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    Json(input): Json<FeatureInput>,
) -> Result<(StatusCode, Json<FeatureModel>), (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::insert_feature(model, &input).map(|_| ())
    })
    .map(|m| (StatusCode::CREATED, Json(m)))
}

pub async fn get_feature(
    State(store): State<DocumentStore>,
    Path((id, feature_id)): Path<(String, u64)>,
) -> Result<Json<FeatureWithParent>, (StatusCode, String)> {
    let model = store.get(&id).map_err(store_error)?;
    engine::find_with_parent(&model, feature_id)
        .map(|(parent_id, feature)| {
            Json(FeatureWithParent {
                parent_id,
                feature: feature.clone(),
            })
        })
        .ok_or_else(|| engine_error(EngineError::FeatureNotFound(feature_id)))
}

pub async fn update_feature(
    State(store): State<DocumentStore>,
    Path((id, feature_id)): Path<(String, u64)>,
    Json(input): Json<FeatureInput>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::update_feature(model, feature_id, &input)
    })
    .map(Json)
}

pub async fn delete_feature(
    State(store): State<DocumentStore>,
    Path((id, feature_id)): Path<(String, u64)>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| engine::delete_feature(model, feature_id)).map(Json)
}

// ============================================================
// Dependencies
// ============================================================

pub async fn add_dependency(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    Json(input): Json<DependencyInput>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::add_dependency(model, input.kind, input.from_feature_id, input.to_feature_id)
    })
    .map(Json)
}

pub async fn delete_dependency(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    Json(input): Json<DependencyInput>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::delete_dependency(model, input.kind, input.from_feature_id, input.to_feature_id)
    })
    .map(Json)
}

// ============================================================
// Business models
// ============================================================

pub async fn create_business_model(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    Json(input): Json<BusinessModelInput>,
) -> Result<(StatusCode, Json<FeatureModel>), (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::create_business_model(model, &input.name).map(|_| ())
    })
    .map(|m| (StatusCode::CREATED, Json(m)))
}

pub async fn rename_business_model(
    State(store): State<DocumentStore>,
    Path((id, business_model_id)): Path<(String, u64)>,
    Json(input): Json<BusinessModelInput>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::rename_business_model(model, business_model_id, &input.name)
    })
    .map(Json)
}

pub async fn delete_business_model(
    State(store): State<DocumentStore>,
    Path((id, business_model_id)): Path<(String, u64)>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::delete_business_model(model, business_model_id)
    })
    .map(Json)
}

/// Clone a business model's selections into a fresh "<name> - Adaptation#n".
pub async fn adapt_business_model(
    State(store): State<DocumentStore>,
    Path((id, business_model_id)): Path<(String, u64)>,
) -> Result<(StatusCode, Json<FeatureModel>), (StatusCode, String)> {
    apply(&store, &id, |model| {
        let base = model
            .business_model_map
            .get(&business_model_id)
            .cloned()
            .ok_or(EngineError::BusinessModelNotFound(business_model_id))?;
        let name = engine::adaptation_name(&base);
        engine::adapt_business_model(model, business_model_id, &name).map(|_| ())
    })
    .map(|m| (StatusCode::CREATED, Json(m)))
}

pub async fn add_decision(
    State(store): State<DocumentStore>,
    Path((id, business_model_id)): Path<(String, u64)>,
    Json(input): Json<DecisionInput>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::add_decision(model, input.feature_id, business_model_id)
    })
    .map(Json)
}

pub async fn remove_decision(
    State(store): State<DocumentStore>,
    Path((id, business_model_id, feature_id)): Path<(String, u64, u64)>,
) -> Result<Json<FeatureModel>, (StatusCode, String)> {
    apply(&store, &id, |model| {
        engine::remove_decision(model, feature_id, business_model_id)
    })
    .map(Json)
}

pub async fn check_conformance(
    State(store): State<DocumentStore>,
    Path((id, business_model_id)): Path<(String, u64)>,
) -> Result<Json<ConformanceReport>, (StatusCode, String)> {
    let model = store.get(&id).map_err(store_error)?;
    engine::check_conformance(&model, business_model_id)
        .map(Json)
        .map_err(engine_error)
}

// ============================================================
// Maintenance
// ============================================================

/// Wipe the store and install the canned example documents.
pub async fn reset(
    State(store): State<DocumentStore>,
) -> Result<Json<Vec<FeatureModelSummary>>, (StatusCode, String)> {
    let seeds = seed::example_documents().map_err(engine_error)?;
    let inserted = store.destroy_and_reseed(seeds).map_err(store_error)?;

    Ok(Json(
        inserted
            .into_iter()
            .map(|m| FeatureModelSummary {
                id: m.id,
                name: m.name,
                description: m.description,
            })
            .collect(),
    ))
}
