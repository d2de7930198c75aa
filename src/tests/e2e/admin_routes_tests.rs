use crate::shared::infrastructure::mailer::in_memory::InMemoryMailer;
use crate::shell::http::router;
use crate::tests::fixtures::{basic_auth_header, clean_store, json_body, raw_store, test_state};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rstest::rstest;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    router(test_state(Arc::new(raw_store(vec![])), None), "public")
}

fn request(method: Method, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[rstest]
#[case(Method::GET, "/admin")]
#[case(Method::GET, "/admin/api/dashboard")]
#[case(Method::GET, "/admin/api/logs")]
#[case(Method::POST, "/admin/api/logs/update")]
#[case(Method::POST, "/admin/api/logs/delete")]
#[case(Method::POST, "/admin/api/send-report")]
#[tokio::test]
async fn admin_routes_challenge_anonymous_requests(#[case] method: Method, #[case] uri: &str) {
    let response = app().oneshot(request(method, uri, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::WWW_AUTHENTICATE],
        "Basic realm=\"admin\""
    );
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn admin_routes_reject_wrong_credentials() {
    let response = app()
        .oneshot(request(
            Method::GET,
            "/admin/api/logs",
            Some("Basic YWRtaW46d3Jvbmc="),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_page_is_served_with_credentials() {
    let response = app()
        .oneshot(request(Method::GET, "/admin", Some(&basic_auth_header())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("/admin/api/send-report"));
}

#[tokio::test]
async fn check_endpoint_needs_no_credentials() {
    let response = app()
        .oneshot(
            Request::post("/api/check")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"type":"IN","userName":"Alice"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_fall_through_to_static_files() {
    let response = app()
        .oneshot(request(Method::GET, "/no-such-page.html", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_is_mailed_through_the_full_router() {
    let mailer = Arc::new(InMemoryMailer::new());
    let store = Arc::new(clean_store(vec![vec![
        "Alice", "10/01/2025", "2025", "1", "08:00", "17:00", "9",
    ]]));
    let app = router(test_state(store, Some(mailer.clone())), "public");

    let response = app
        .oneshot(
            Request::post("/admin/api/send-report")
                .header(header::AUTHORIZATION, basic_auth_header())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"to":"boss@example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].attachment.as_ref().map(|a| a.filename.as_str()),
        Some("attendance-2025-1.pdf")
    );
}
