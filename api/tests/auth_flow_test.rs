//! End-to-end HTTP tests for the token lifecycle, running the full
//! actix stack against in-memory repositories.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use courier_api::middleware::JwtAuth;
use courier_api::routes;
use courier_api::state::AppState;
use courier_core::repositories::{
    MockGroupRepository, MockMessageRepository, MockUserRepository,
};
use courier_core::services::{
    AuthService, GroupService, MessageService, RevocationRegistry, TokenService,
    TokenServiceConfig,
};

type TestState = AppState<MockUserRepository, MockMessageRepository, MockGroupRepository>;

fn build_state() -> web::Data<TestState> {
    let user_repo = Arc::new(MockUserRepository::new());
    let message_repo = Arc::new(MockMessageRepository::new());
    let group_repo = Arc::new(MockGroupRepository::new());

    let registry = Arc::new(RevocationRegistry::new());
    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::default(), registry).expect("token service"),
    );

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&token_service),
    ));
    let message_service = Arc::new(MessageService::new(
        message_repo,
        Arc::clone(&group_repo),
        Arc::clone(&user_repo),
    ));
    let group_service = Arc::new(GroupService::new(group_repo, user_repo));

    web::Data::new(AppState::new(
        auth_service,
        message_service,
        group_service,
        token_service,
    ))
}

macro_rules! test_app {
    ($state:expr) => {{
        let jwt_auth = JwtAuth::new(Arc::clone(&$state.token_service));
        test::init_service(
            App::new().app_data($state.clone()).configure(|cfg| {
                routes::configure::<MockUserRepository, MockMessageRepository, MockGroupRepository>(
                    cfg, jwt_auth,
                )
            }),
        )
        .await
    }};
}

/// Registers a user, logs in, and yields (access_token, refresh_token).
macro_rules! register_and_login {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": $username,
                "mobile_no": "5551234567",
                "password": "correct-horse",
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "username": $username,
                "password": "correct-horse",
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        (
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }};
}

#[actix_rt::test]
async fn register_login_and_fetch_profile() {
    let state = build_state();
    let app = test_app!(state);

    let (access, _) = register_and_login!(app, "alice");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
}

#[actix_rt::test]
async fn duplicate_registration_conflicts() {
    let state = build_state();
    let app = test_app!(state);

    let (_, _) = register_and_login!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "alice",
            "mobile_no": "5551234567",
            "password": "another-pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn wrong_password_is_rejected_like_unknown_user() {
    let state = build_state();
    let app = test_app!(state);

    let (_, _) = register_and_login!(app, "alice");

    let wrong_password = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "alice", "password": "bad-password"}))
        .to_request();
    let resp = test::call_service(&app, wrong_password).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body_wrong: Value = test::read_body_json(resp).await;

    let unknown_user = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "nobody", "password": "bad-password"}))
        .to_request();
    let resp = test::call_service(&app, unknown_user).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body_unknown: Value = test::read_body_json(resp).await;

    assert_eq!(body_wrong, body_unknown);
}

#[actix_rt::test]
async fn refresh_token_works_exactly_once() {
    let state = build_state();
    let app = test_app!(state);

    let (_, refresh) = register_and_login!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({"refresh_token": refresh.clone()}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["access_token"].as_str().is_some());
    // Rotation mints an access token only; the session is not extended.
    assert!(body.get("refresh_token").is_none());

    // Replaying the same refresh token is rejected.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({"refresh_token": refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");
}

#[actix_rt::test]
async fn refresh_token_cannot_be_used_as_access_token() {
    let state = build_state();
    let app = test_app!(state);

    let (_, refresh) = register_and_login!(app, "alice");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {refresh}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn access_token_cannot_be_used_as_refresh_token() {
    let state = build_state();
    let app = test_app!(state);

    let (access, _) = register_and_login!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({"refresh_token": access}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn logout_revokes_the_access_token_but_not_the_refresh_token() {
    let state = build_state();
    let app = test_app!(state);

    let (access, refresh) = register_and_login!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The revoked access token no longer authenticates.
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Logout is per-token: the refresh token still rotates.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({"refresh_token": refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn protected_routes_require_a_bearer_token() {
    let state = build_state();
    let app = test_app!(state);

    for uri in [
        "/api/v1/auth/me",
        "/api/v1/messages",
        "/api/v1/groups",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "unauthorized");
    }
}

#[actix_rt::test]
async fn tampered_token_is_rejected_with_the_generic_body() {
    let state = build_state();
    let app = test_app!(state);

    let (access, _) = register_and_login!(app, "alice");
    let tampered = format!("{}x", access);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {tampered}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "Invalid or expired token");
}

#[actix_rt::test]
async fn short_password_fails_validation() {
    let state = build_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "alice",
            "mobile_no": "5551234567",
            "password": "short",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
