//! HTTP tests for the messaging and group endpoints, running against
//! in-memory repositories behind real JWT authentication.

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

/// Registers a user, logs in, and returns (access_token, user_id).
macro_rules! signup {
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
            .set_json(json!({"username": $username, "password": "correct-horse"}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let access = body["access_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {access}")))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let user_id = body["id"].as_str().unwrap().to_string();

        (access, user_id)
    }};
}

#[actix_rt::test]
async fn direct_message_round_trip() {
    let state = build_state();
    let app = test_app!(state);

    let (alice_token, _) = signup!(app, "alice");
    let (bob_token, bob_id) = signup!(app, "bob");

    let req = test::TestRequest::post()
        .uri("/api/v1/messages")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({"receiver_id": bob_id, "content": "hello bob"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Both sides see the conversation.
    let req = test::TestRequest::get()
        .uri("/api/v1/messages")
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"], "hello bob");
}

#[actix_rt::test]
async fn sending_to_an_unknown_user_is_rejected() {
    let state = build_state();
    let app = test_app!(state);

    let (alice_token, _) = signup!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/api/v1/messages")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({
            "receiver_id": "00000000-0000-0000-0000-000000000000",
            "content": "anyone there?",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn message_must_target_exactly_one_destination() {
    let state = build_state();
    let app = test_app!(state);

    let (alice_token, alice_id) = signup!(app, "alice");

    // Neither receiver nor group.
    let req = test::TestRequest::post()
        .uri("/api/v1/messages")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({"content": "to nobody"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Both at once.
    let req = test::TestRequest::post()
        .uri("/api/v1/messages")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({
            "receiver_id": alice_id,
            "group_id": "11111111-1111-1111-1111-111111111111",
            "content": "to everything",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn group_lifecycle_over_http() {
    let state = build_state();
    let app = test_app!(state);

    let (alice_token, _) = signup!(app, "alice");
    let (bob_token, bob_id) = signup!(app, "bob");

    // Alice creates a group and becomes its admin.
    let req = test::TestRequest::post()
        .uri("/api/v1/groups")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({"group_name": "weekend-plans"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let group_id = body["id"].as_str().unwrap().to_string();

    // Bob is not yet a member: group history is forbidden.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/messages/group/{group_id}"))
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Bob cannot add himself either; only admins add members.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{group_id}/members"))
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .set_json(json!({"member_id": bob_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Alice adds bob.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/groups/{group_id}/members"))
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({"member_id": bob_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Bob now posts in the group and reads the history.
    let req = test::TestRequest::post()
        .uri("/api/v1/messages")
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .set_json(json!({"group_id": group_id, "content": "saturday works"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/messages/group/{group_id}"))
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);

    // Both appear in the member listing.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/groups/{group_id}/members"))
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["members"].as_array().unwrap().len(), 2);

    // And bob's group listing shows the group.
    let req = test::TestRequest::get()
        .uri("/api/v1/groups")
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["groups"].as_array().unwrap().len(), 1);
    assert_eq!(body["groups"][0]["group_name"], "weekend-plans");
}
