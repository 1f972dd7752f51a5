mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::DocumentStore;

pub fn create_router(store: DocumentStore) -> Router {
    let api = Router::new()
        // Feature models
        .route("/models", get(handlers::list_models))
        .route("/models", post(handlers::create_model))
        .route("/models/{id}", get(handlers::get_model))
        .route("/models/{id}", put(handlers::update_model))
        .route("/models/{id}", delete(handlers::delete_model))
        // Features
        .route("/models/{id}/features", get(handlers::list_features))
        .route("/models/{id}/features", post(handlers::create_feature))
        .route("/models/{id}/features/{fid}", get(handlers::get_feature))
        .route("/models/{id}/features/{fid}", put(handlers::update_feature))
        .route("/models/{id}/features/{fid}", delete(handlers::delete_feature))
        // Dependencies
        .route("/models/{id}/dependencies", post(handlers::add_dependency))
        .route("/models/{id}/dependencies", delete(handlers::delete_dependency))
        // Business models
        .route("/models/{id}/business-models", post(handlers::create_business_model))
        .route("/models/{id}/business-models/{bmid}", put(handlers::rename_business_model))
        .route("/models/{id}/business-models/{bmid}", delete(handlers::delete_business_model))
        .route(
            "/models/{id}/business-models/{bmid}/adaptations",
            post(handlers::adapt_business_model),
        )
        .route(
            "/models/{id}/business-models/{bmid}/decisions",
            post(handlers::add_decision),
        )
        .route(
            "/models/{id}/business-models/{bmid}/decisions/{fid}",
            delete(handlers::remove_decision),
        )
        .route(
            "/models/{id}/business-models/{bmid}/conformance",
            get(handlers::check_conformance),
        )
        // Maintenance
        .route("/reset", post(handlers::reset))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}
