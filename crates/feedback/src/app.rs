use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    gate::require_session,
    handlers::{actions, health, messages, pages, session},
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for the JSON endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let action_routes = Router::new()
        .route("/messages", get(actions::list_messages))
        .route("/messages/delete", post(actions::delete_message))
        .route("/messages/reply", post(actions::reply_to_message))
        .route("/messages/{id}", get(actions::get_message))
        .layer(cors);

    let api_routes = Router::new()
        .route("/livez", get(health::livez))
        .route("/healthz", get(health::healthz));

    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

    Router::new()
        .route("/", get(pages::index))
        .route("/messages/delete", post(messages::delete_message))
        .route("/messages/reply", post(messages::reply_to_message))
        .route("/sign-in", get(session::sign_in_page).post(session::sign_in))
        .route("/sign-out", post(session::sign_out))
        .nest("/actions", action_routes)
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::{
        body::Body,
        http::{Request, Response},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use feedback_core::message::FeedbackMessage;
    use feedback_core::storage::StorageError;

    use crate::service::test_support::{sample_messages, FakeNotifier, FakeRepository};
    use crate::state::test_support::{state_with, TEST_TOKEN};

    struct Harness {
        app: Router,
        repository: Arc<FakeRepository>,
        notifier: Arc<FakeNotifier>,
    }

    fn harness() -> Harness {
        let repository = Arc::new(FakeRepository::with_messages(sample_messages()));
        let notifier = Arc::new(FakeNotifier::default());
        let app = create_app(state_with(repository.clone(), notifier.clone()));
        Harness {
            app,
            repository,
            notifier,
        }
    }

    fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {TEST_TOKEN}"))
    }

    fn json_body(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        authed(method, uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_body(uri: &str, body: &str) -> Request<Body> {
        authed("POST", uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn location(response: &Response<Body>) -> &str {
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_gated_route_redirects_to_sign_in() {
        let h = harness();

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/actions/messages")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/sign-in?return_to=%2Factions%2Fmessages"
        );
        assert_eq!(h.repository.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_token_is_redirected() {
        let h = harness();

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("Authorization", "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/sign-in");
    }

    #[tokio::test]
    async fn test_public_routes_pass_through() {
        let h = harness();

        for uri in ["/api/livez", "/api/healthz", "/sign-in", "/static/dashboard.css"] {
            let response = h
                .app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_healthz_reports_backends() {
        let h = harness();

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/api/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["listCacheEnabled"], false);
    }

    #[tokio::test]
    async fn test_dashboard_lists_newest_first() {
        let h = harness();

        let response = h
            .app
            .oneshot(authed("GET", "/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;

        assert!(html.contains("Message Manager"));
        assert!(html.contains("2 total"));
        let newer = html.find("c@d.com").unwrap();
        let older = html.find("a@b.com").unwrap();
        assert!(newer < older);
    }

    #[tokio::test]
    async fn test_dashboard_session_cookie() {
        let h = harness();

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("Cookie", format!("feedback_session={TEST_TOKEN}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_empty_store() {
        let repository = Arc::new(FakeRepository::default());
        let app = create_app(state_with(repository, Arc::new(FakeNotifier::default())));

        let response = app
            .oneshot(authed("GET", "/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(body_text(response)
            .await
            .contains("No feedback messages found."));
    }

    #[tokio::test]
    async fn test_dashboard_load_failure_offers_retry() {
        let h = harness();
        h.repository
            .fail_with(Some(StorageError::AccessDenied("expired".to_string())));

        let response = h
            .app
            .clone()
            .oneshot(authed("GET", "/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Failed to load feedback messages"));
        assert!(html.contains("Try again"));

        h.repository.fail_with(None);
        let response = h
            .app
            .oneshot(authed("GET", "/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_text(response).await.contains("2 total"));
        assert_eq!(h.repository.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_opens_reply_form() {
        let h = harness();

        let response = h
            .app
            .oneshot(authed("GET", "/?reply=1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("Reply to a@b.com"));
        assert!(!html.contains("Reply to c@d.com"));
    }

    #[tokio::test]
    async fn test_dashboard_escapes_message_text() {
        let repository = Arc::new(FakeRepository::with_messages(vec![FeedbackMessage::new(
            "1",
            "a@b.com",
            "<script>alert(1)</script>",
            1,
            "u1",
        )]));
        let app = create_app(state_with(repository, Arc::new(FakeNotifier::default())));

        let response = app
            .oneshot(authed("GET", "/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[tokio::test]
    async fn test_list_messages_json() {
        let h = harness();

        let response = h
            .app
            .oneshot(authed("GET", "/actions/messages").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: Vec<serde_json::Value> =
            serde_json::from_str(&body_text(response).await).unwrap();
        let ids: Vec<&str> = json.iter().filter_map(|m| m["id"].as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(json[0]["createdAt"], 200);
    }

    #[tokio::test]
    async fn test_list_failure_status() {
        let h = harness();
        h.repository
            .fail_with(Some(StorageError::Other("timeout".to_string())));

        let response = h
            .app
            .oneshot(authed("GET", "/actions/messages").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_get_message_json() {
        let h = harness();

        let response = h
            .app
            .clone()
            .oneshot(authed("GET", "/actions/messages/2").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = h
            .app
            .oneshot(authed("GET", "/actions/messages/9").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_requires_composite_key() {
        let h = harness();

        let response = h
            .app
            .oneshot(json_body(
                "POST",
                "/actions/messages/delete",
                serde_json::json!({"id": "id1", "email": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "Both ID and email are required to delete a message"
        );
        assert_eq!(h.repository.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_then_list() {
        let h = harness();

        let response = h
            .app
            .clone()
            .oneshot(json_body(
                "POST",
                "/actions/messages/delete",
                serde_json::json!({"id": "2", "email": "c@d.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = h
            .app
            .oneshot(authed("GET", "/actions/messages").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json: Vec<serde_json::Value> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json.len(), 1);
        assert_eq!(json[0]["id"], "1");
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_not_found() {
        let h = harness();

        let response = h
            .app
            .oneshot(json_body(
                "POST",
                "/actions/messages/delete",
                serde_json::json!({"id": "2", "email": "wrong@d.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reply_json() {
        let h = harness();

        let response = h
            .app
            .oneshot(json_body(
                "POST",
                "/actions/messages/reply",
                serde_json::json!({"email": "a@b.com", "message": "hi", "replyText": "Hello!"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Reply sent successfully"})
        );
        assert_eq!(h.notifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_reply_json_is_rejected() {
        let h = harness();

        let response = h
            .app
            .oneshot(json_body(
                "POST",
                "/actions/messages/reply",
                serde_json::json!({"email": "a@b.com", "message": "hi", "replyText": "  "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(h.notifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_form_delete_failure_shows_inline_notice() {
        let h = harness();

        let response = h
            .app
            .clone()
            .oneshot(form_body("/messages/delete", "id=1&email="))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        let set_cookie = response
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        let flash_pair = set_cookie.split(';').next().unwrap().to_string();

        let response = h
            .app
            .oneshot(
                authed("GET", "/")
                    .header("Cookie", flash_pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("Both ID and email are required to delete a message"));
        assert!(html.contains("2 total"));
    }

    #[tokio::test]
    async fn test_form_delete_success() {
        let h = harness();

        let response = h
            .app
            .oneshot(form_body("/messages/delete", "id=2&email=c%40d.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(h.repository.delete_calls(), 1);
        assert_eq!(h.repository.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_form_reply_blank_is_rejected() {
        let h = harness();

        let response = h
            .app
            .oneshot(form_body("/messages/reply", "id=1&reply_text=+++"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response)
            .await
            .contains("Reply text cannot be empty"));
        assert_eq!(h.notifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_form_reply_success_shows_confirmation() {
        let h = harness();

        let response = h
            .app
            .oneshot(form_body("/messages/reply", "id=1&reply_text=Fixed%21"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Reply sent successfully"));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert_eq!(h.notifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_after_reply_settles_to_replied() {
        let h = harness();

        let response = h
            .app
            .clone()
            .oneshot(form_body("/messages/reply", "id=1&reply_text=Fixed%21"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("url=/?replied=1\""));

        let response = h
            .app
            .oneshot(authed("GET", "/?replied=1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Reply sent</div>"));
        assert!(!html.contains("?reply=1#message-1"));
        assert_eq!(html.matches("aria-label=\"Reply to message\"").count(), 1);
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[tokio::test]
    async fn test_form_reply_rejection_keeps_draft() {
        let h = harness();
        h.notifier.respond_with(Ok(feedback_core::notify::ReplyOutcome::failed(
            "Email address is not verified",
        )));

        let response = h
            .app
            .oneshot(form_body("/messages/reply", "id=1&reply_text=Fixed%21"))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("Email address is not verified"));
        assert!(html.contains(">Fixed!</textarea>"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[tokio::test]
    async fn test_sign_in_sets_session_cookie() {
        let h = harness();

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/sign-in")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(format!(
                        "token={TEST_TOKEN}&return_to=%2F%3Freply%3D1"
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/?reply=1");
        let cookie = response
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(cookie.starts_with("feedback_session=test-token"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_sign_in_rejects_bad_token_and_open_redirects() {
        let h = harness();

        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/sign-in")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from("token=wrong"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Invalid access token"));

        let response = h
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/sign-in")
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(format!(
                        "token={TEST_TOKEN}&return_to=%2F%2Fevil.com"
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(location(&response), "/");
    }
}
