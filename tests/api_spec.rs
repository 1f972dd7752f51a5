use axum::http::StatusCode;
use axum_test::TestServer;
use bmdl_modeler::api::create_router;
use bmdl_modeler::db::DocumentStore;
use bmdl_modeler::models::*;

fn setup() -> TestServer {
    let store = DocumentStore::open_memory().expect("Failed to create store");
    store.migrate().expect("Failed to migrate");
    let app = create_router(store);
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_test_model(server: &TestServer) -> FeatureModel {
    server
        .post("/api/v1/models")
        .json(&CreateModelInput {
            name: "Test Canvas".to_string(),
            description: "API test fixture".to_string(),
        })
        .await
        .json::<FeatureModel>()
}

mod models {
    use super::*;

    #[tokio::test]
    async fn creating_a_model_returns_the_canonical_categories() {
        let server = setup();

        let response = server
            .post("/api/v1/models")
            .json(&CreateModelInput {
                name: "Fresh".to_string(),
                description: String::new(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let model: FeatureModel = response.json();
        assert_eq!(model.features.len(), 9);
        assert_eq!(model.rev, 1);
        assert!(!model.id.is_empty());
    }

    #[tokio::test]
    async fn listing_returns_summaries() {
        let server = setup();
        create_test_model(&server).await;

        let response = server.get("/api/v1/models").await;

        response.assert_status_ok();
        let summaries: Vec<FeatureModelSummary> = response.json();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Test Canvas");
    }

    #[tokio::test]
    async fn getting_an_unknown_model_is_404() {
        let server = setup();

        let response = server.get("/api/v1/models/no-such-id").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn updating_renames_the_model() {
        let server = setup();
        let model = create_test_model(&server).await;

        let response = server
            .put(&format!("/api/v1/models/{}", model.id))
            .json(&UpdateModelInput {
                name: "Renamed".to_string(),
                description: "Updated".to_string(),
            })
            .await;

        response.assert_status_ok();
        let updated: FeatureModel = response.json();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.rev, 2);
    }

    #[tokio::test]
    async fn deleting_removes_the_model() {
        let server = setup();
        let model = create_test_model(&server).await;

        server
            .delete(&format!("/api/v1/models/{}", model.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/models/{}", model.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod features {
    use super::*;

    #[tokio::test]
    async fn inserting_a_feature_shows_up_in_the_flat_list() {
        let server = setup();
        let model = create_test_model(&server).await;

        let response = server
            .post(&format!("/api/v1/models/{}/features", model.id))
            .json(&FeatureInput {
                name: "Self Service".to_string(),
                is_mandatory: false,
                has_or_subfeatures: false,
                has_x_or_subfeatures: false,
                parent_id: 2,
            })
            .await;
        response.assert_status(StatusCode::CREATED);

        let list: Vec<FeatureListEntry> = server
            .get(&format!("/api/v1/models/{}/features", model.id))
            .await
            .json();

        let entry = list.iter().find(|e| e.name == "Self Service").unwrap();
        assert_eq!(entry.id, 10);
        assert_eq!(entry.level, 2);
        assert_eq!(entry.level_name, "-- Self Service");
    }

    #[tokio::test]
    async fn getting_a_feature_reports_its_parent() {
        let server = setup();
        let model = create_test_model(&server).await;

        server
            .post(&format!("/api/v1/models/{}/features", model.id))
            .json(&FeatureInput {
                name: "Nested".to_string(),
                is_mandatory: false,
                has_or_subfeatures: false,
                has_x_or_subfeatures: false,
                parent_id: 3,
            })
            .await;

        let response = server
            .get(&format!("/api/v1/models/{}/features/10", model.id))
            .await;

        response.assert_status_ok();
        let found: FeatureWithParent = response.json();
        assert_eq!(found.parent_id, 3);
        assert_eq!(found.feature.name, "Nested");
    }

    #[tokio::test]
    async fn inserting_under_an_unknown_parent_is_404() {
        let server = setup();
        let model = create_test_model(&server).await;

        let response = server
            .post(&format!("/api/v1/models/{}/features", model.id))
            .json(&FeatureInput {
                name: "Orphan".to_string(),
                is_mandatory: false,
                has_or_subfeatures: false,
                has_x_or_subfeatures: false,
                parent_id: 999,
            })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_a_feature_removes_its_subtree() {
        let server = setup();
        let model = create_test_model(&server).await;

        for (name, parent) in [("Parent", 1), ("Child", 10)] {
            server
                .post(&format!("/api/v1/models/{}/features", model.id))
                .json(&FeatureInput {
                    name: name.to_string(),
                    is_mandatory: false,
                    has_or_subfeatures: false,
                    has_x_or_subfeatures: false,
                    parent_id: parent,
                })
                .await;
        }

        let response = server
            .delete(&format!("/api/v1/models/{}/features/10", model.id))
            .await;
        response.assert_status_ok();

        let list: Vec<FeatureListEntry> = server
            .get(&format!("/api/v1/models/{}/features", model.id))
            .await
            .json();
        assert!(list.iter().all(|e| e.id != 10 && e.id != 11));
    }
}

mod dependencies {
    use super::*;

    #[tokio::test]
    async fn a_self_dependency_is_rejected() {
        let server = setup();
        let model = create_test_model(&server).await;

        let response = server
            .post(&format!("/api/v1/models/{}/dependencies", model.id))
            .json(&DependencyInput {
                kind: DependencyKind::RequiresTo,
                from_feature_id: 1,
                to_feature_id: 1,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn adding_an_exclusion_writes_both_endpoints() {
        let server = setup();
        let model = create_test_model(&server).await;

        let response = server
            .post(&format!("/api/v1/models/{}/dependencies", model.id))
            .json(&DependencyInput {
                kind: DependencyKind::Excludes,
                from_feature_id: 1,
                to_feature_id: 2,
            })
            .await;

        response.assert_status_ok();
        let updated: FeatureModel = response.json();
        assert_eq!(updated.features[0].excluding_dependency, vec![2]);
        assert_eq!(updated.features[1].excluding_dependency, vec![1]);
    }
}

mod business_models {
    use super::*;

    #[tokio::test]
    async fn conformance_round_trip_over_http() {
        let server = setup();
        let model = create_test_model(&server).await;

        // A mandatory feature under Value Proposition.
        server
            .post(&format!("/api/v1/models/{}/features", model.id))
            .json(&FeatureInput {
                name: "Must Have".to_string(),
                is_mandatory: true,
                has_or_subfeatures: false,
                has_x_or_subfeatures: false,
                parent_id: 1,
            })
            .await;

        server
            .post(&format!("/api/v1/models/{}/business-models", model.id))
            .json(&BusinessModelInput {
                name: "Launch".to_string(),
            })
            .await
            .assert_status(StatusCode::CREATED);

        // Deselect the mandatory feature.
        server
            .delete(&format!(
                "/api/v1/models/{}/business-models/1/decisions/10",
                model.id
            ))
            .await
            .assert_status_ok();

        let response = server
            .get(&format!(
                "/api/v1/models/{}/business-models/1/conformance",
                model.id
            ))
            .await;

        response.assert_status_ok();
        let report: ConformanceReport = response.json();
        assert_eq!(report.messages, vec!["Must Have is mandatory"]);
        assert_eq!(report.violated_feature_ids, vec![10]);
    }

    #[tokio::test]
    async fn adaptation_names_count_up() {
        let server = setup();
        let model = create_test_model(&server).await;

        server
            .post(&format!("/api/v1/models/{}/business-models", model.id))
            .json(&BusinessModelInput {
                name: "Base".to_string(),
            })
            .await;

        let response = server
            .post(&format!(
                "/api/v1/models/{}/business-models/1/adaptations",
                model.id
            ))
            .await;

        response.assert_status(StatusCode::CREATED);
        let updated: FeatureModel = response.json();
        assert_eq!(
            updated.business_model_map.get(&2).map(String::as_str),
            Some("Base - Adaptation#1")
        );
    }

    #[tokio::test]
    async fn conformance_for_an_unknown_business_model_is_404() {
        let server = setup();
        let model = create_test_model(&server).await;

        let response = server
            .get(&format!(
                "/api/v1/models/{}/business-models/9/conformance",
                model.id
            ))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod maintenance {
    use super::*;

    #[tokio::test]
    async fn reset_installs_the_example_documents() {
        let server = setup();
        create_test_model(&server).await;

        let response = server.post("/api/v1/reset").await;

        response.assert_status_ok();
        let seeded: Vec<FeatureModelSummary> = response.json();
        assert_eq!(seeded.len(), 2);

        let summaries: Vec<FeatureModelSummary> = server.get("/api/v1/models").await.json();
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Blank Canvas", "Simple ToDo Example"]);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = setup();
        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
    }
}
