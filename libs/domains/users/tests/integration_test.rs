//! End-to-end auth tests against a real MongoDB container.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::{handlers, HashCost, MongoUserRepository, UserService};
use http_body_util::BodyExt;
use test_utils::TestMongo;
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret-with-32-chars!";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(TEST_SECRET))
}

async fn app(mongo: &TestMongo) -> Router {
    let repository = MongoUserRepository::new(&mongo.database());
    repository.init_indexes().await.unwrap();

    let service = UserService::with_hash_cost(
        repository,
        HashCost {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        },
    );

    Router::new().nest("/auth", handlers::router(service, jwt()))
}

async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_register_then_duplicate_conflicts() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let payload = r#"{"username": "alice-anderson", "password": "password123", "cfmPassword": "password123"}"#;

    let (status, body) = post_json(&app, "/auth/register", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Successful registration!");

    let (status, body) = post_json(&app, "/auth/register", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicated values");
    assert_eq!(
        body["message"],
        "user with username: 'alice-anderson' already exists"
    );
}

#[tokio::test]
async fn test_first_user_is_admin_later_users_are_not() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let first = r#"{"username": "alice-anderson", "password": "password123", "cfmPassword": "password123"}"#;
    let second = r#"{"username": "bob-the-builder", "password": "password123", "cfmPassword": "password123"}"#;
    post_json(&app, "/auth/register", first).await;
    post_json(&app, "/auth/register", second).await;

    let (status, body) = post_json(
        &app,
        "/auth/login",
        r#"{"username": "alice-anderson", "password": "password123"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let claims = jwt().verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.username, "alice-anderson");
    assert_eq!(claims.role, Some("ADMIN".to_string()));

    let (status, body) = post_json(
        &app,
        "/auth/login",
        r#"{"username": "bob-the-builder", "password": "password123"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let claims = jwt().verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.username, "bob-the-builder");
    assert_eq!(claims.role, None);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let register = r#"{"username": "alice-anderson", "password": "password123", "cfmPassword": "password123"}"#;
    post_json(&app, "/auth/register", register).await;

    let (wrong_pw_status, wrong_pw_body) = post_json(
        &app,
        "/auth/login",
        r#"{"username": "alice-anderson", "password": "not-the-password"}"#,
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        &app,
        "/auth/login",
        r#"{"username": "nobody-here-by-that-name", "password": "password123"}"#,
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, unknown_body);
    assert_eq!(wrong_pw_body["error"], "User unauthenticated");
    assert_eq!(wrong_pw_body["message"], "You are not logged in");
}

#[tokio::test]
async fn test_register_validation_short_circuits_before_store() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let (status, body) = post_json(
        &app,
        "/auth/register",
        r#"{"username": "alice-anderson", "password": "password123", "cfmPassword": "password124"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid values");
    assert_eq!(body["message"], "Confirm Password does not match");

    // The failed registration must not have written anything: the
    // username is still free.
    let (status, _) = post_json(
        &app,
        "/auth/register",
        r#"{"username": "alice-anderson", "password": "password123", "cfmPassword": "password123"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
