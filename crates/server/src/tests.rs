use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use classifier::{ClassifierError, WasteClassifier};
use config::{
    Config,
    file::{ConfigFile, GrantAdminAccessConfig},
};
use error_stack::Result;
use model::{CollectionVerification, ImageData, SubmissionClassification};
use serde_json::{Value, json};
use server_data::{
    db_manager::DatabaseManager, reward_policy::reward_policy_from_config, write::WriteCmds,
};
use simple_backend::app::SimpleBackendAppState;
use simple_backend_config::SimpleBackendConfig;
use tower::ServiceExt;

use crate::{api_doc::ApiDoc, create_router, state::AppState};

struct MatchingClassifier;

#[async_trait]
impl WasteClassifier for MatchingClassifier {
    async fn classify_submission(
        &self,
        _image: &ImageData,
    ) -> Result<SubmissionClassification, ClassifierError> {
        Ok(SubmissionClassification {
            waste_type: "glass".into(),
            quantity: "2 kg".into(),
            confidence: 0.9,
        })
    }

    async fn verify_collection(
        &self,
        _image: &ImageData,
        _expected_waste_type: &str,
        _expected_amount: &str,
    ) -> Result<CollectionVerification, ClassifierError> {
        Ok(CollectionVerification {
            waste_type_match: true,
            quantity_match: true,
            confidence: 0.9,
        })
    }
}

struct TestServer {
    _manager: DatabaseManager,
    router: Router,
}

impl TestServer {
    async fn new() -> Self {
        let mut file = ConfigFile::default();
        file.grant_admin_access = Some(GrantAdminAccessConfig {
            email: "admin@example.com".to_string(),
        });
        let simple = Arc::new(SimpleBackendConfig::in_ram_debug_config(format!(
            "server_test_{}",
            uuid::Uuid::new_v4().simple()
        )));
        let config = Arc::new(Config::new(file, simple.clone()).unwrap());
        let policy = reward_policy_from_config(config.reward_policy());
        let (manager, read, write) =
            DatabaseManager::new(config.clone(), Arc::new(MatchingClassifier), policy)
                .await
                .unwrap();
        let state = AppState::new(
            config,
            read,
            WriteCmds::new(write),
            SimpleBackendAppState::new(simple),
        );
        Self {
            _manager: manager,
            router: create_router(state),
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        email: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(email) = email {
            builder = builder.header("x-user-email", email);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str, email: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(email), None).await
    }

    async fn post(&self, uri: &str, email: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send("POST", uri, Some(email), body).await
    }
}

fn image() -> Value {
    json!({ "mime_type": "image/jpeg", "data": "AAAA" })
}

#[tokio::test]
async fn request_without_identity_is_unauthorized() {
    let server = TestServer::new().await;
    let (status, body) = server.send("GET", "/api/v1/user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn first_request_creates_user() {
    let server = TestServer::new().await;
    let (status, body) = server.get("/api/v1/user", "a@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@example.com");
    assert_eq!(body["name"], "Anonymous User");
    assert_eq!(body["role"], "user");

    let (_, again) = server.get("/api/v1/user", "a@example.com").await;
    assert_eq!(again["id"], body["id"]);

    let (_, admin) = server.get("/api/v1/user", "admin@example.com").await;
    assert_eq!(admin["role"], "admin");
}

#[tokio::test]
async fn report_collection_flow_over_http() {
    let server = TestServer::new().await;

    let (status, submitted) = server
        .post(
            "/api/v1/report",
            "reporter@example.com",
            Some(json!({
                "location": "Harbour street 1",
                "waste_type": "glass",
                "amount": "2 kg",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["points_awarded"], 10);
    assert_eq!(submitted["report"]["status"], "pending");
    let id = submitted["report"]["id"].as_i64().unwrap();

    let (status, _) = server
        .post(
            &format!("/api/v1/collection/{id}/begin"),
            "collector@example.com",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server
        .post(
            &format!("/api/v1/collection/{id}/begin"),
            "other@example.com",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_state");

    let (status, body) = server
        .post(
            &format!("/api/v1/collection/{id}/verify"),
            "other@example.com",
            Some(json!({ "image": image() })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, outcome) = server
        .post(
            &format!("/api/v1/collection/{id}/verify"),
            "collector@example.com",
            Some(json!({ "image": image() })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["accepted"], true);
    assert_eq!(outcome["points_awarded"], 30);
    assert_eq!(outcome["report"]["status"], "verified");

    let (_, balance) = server
        .get("/api/v1/ledger/balance", "collector@example.com")
        .await;
    assert_eq!(balance["points"], 30);

    let (_, notifications) = server
        .get("/api/v1/notifications", "collector@example.com")
        .await;
    let list = notifications["notifications"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    let notification_id = list[0]["id"].as_i64().unwrap();

    let (status, _) = server
        .post(
            &format!("/api/v1/notifications/{notification_id}/read"),
            "collector@example.com",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, notifications) = server
        .get("/api/v1/notifications", "collector@example.com")
        .await;
    assert!(notifications["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn error_responses_use_json_format() {
    let server = TestServer::new().await;

    let (status, body) = server.get("/api/v1/report/12345", "a@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = server
        .post(
            "/api/v1/report",
            "a@example.com",
            Some(json!({ "location": "", "waste_type": "glass", "amount": "1 kg" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, body) = server
        .post("/api/v1/report", "a@example.com", Some(json!({ "location": 1 })))
        .await;
    assert!(status.is_client_error());
    assert_eq!(body["error"], "validation");

    let (status, body) = server
        .post(
            "/api/v1/ledger/redeem",
            "a@example.com",
            Some(json!({ "reward_id": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let server = TestServer::new().await;
    let reward = json!({
        "name": "Coffee",
        "cost": 20,
        "description": "Free coffee",
        "collection_info": "Cafe desk",
    });

    let (status, body) = server
        .post("/api/v1/admin/reward", "a@example.com", Some(reward.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, body) = server
        .post("/api/v1/admin/reward", "admin@example.com", Some(reward))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_available"], true);

    let (status, body) = server
        .post("/api/v1/admin/report/1/reopen", "admin@example.com", None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "feature_disabled");
}

#[tokio::test]
async fn rewards_list_starts_with_point_balance() {
    let server = TestServer::new().await;
    let (status, body) = server.get("/api/v1/ledger/rewards", "a@example.com").await;
    assert_eq!(status, StatusCode::OK);
    let rewards = body["rewards"].as_array().unwrap();
    assert_eq!(rewards[0]["id"], 0);
    assert_eq!(rewards[0]["cost"], 0);
}

#[test]
fn api_doc_lists_routes() {
    let doc = ApiDoc::all();
    for path in [
        "/api/v1/user",
        "/api/v1/report",
        "/api/v1/collection/{id}/verify",
        "/api/v1/vendor/complaints",
        "/api/v1/ledger/redeem",
        "/api/v1/notifications",
        "/api/v1/admin/report/{id}/reopen",
    ] {
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
    let json = ApiDoc::open_api_json_string().unwrap();
    assert!(json.contains("user_email"));
}
