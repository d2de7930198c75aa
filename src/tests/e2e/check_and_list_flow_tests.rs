use crate::shell::http::router;
use crate::tests::fixtures::{basic_auth_header, json_body, raw_store, test_state};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn recorded_checks_show_up_in_the_admin_listing() {
    let store = Arc::new(raw_store(vec![]));
    let app = router(test_state(store.clone(), None), "public");

    for (kind, user) in [("IN", "Alice"), ("IN", "Bob"), ("OUT", "Alice")] {
        let response = app
            .clone()
            .oneshot(
                Request::post("/api/check")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(
                        r#"{{"type":"{kind}","userName":"{user}","latitude":48.85,"longitude":2.35}}"#
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"success": true, "message": "Check recorded"})
        );
    }

    let response = app
        .clone()
        .oneshot(
            Request::get("/admin/api/logs?year=2025")
                .header(header::AUTHORIZATION, basic_auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let rows = json_body(response).await["rows"].clone();
    let listed: Vec<(u64, &str, &str, &str)> = rows
        .as_array()
        .expect("rows is an array")
        .iter()
        .map(|row| {
            (
                row["rowIndex"].as_u64().unwrap(),
                row["type"].as_str().unwrap(),
                row["user"].as_str().unwrap(),
                row["jour"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        listed,
        vec![
            (2, "IN", "Alice", "10/01/2025"),
            (3, "IN", "Bob", "10/01/2025"),
            (4, "OUT", "Alice", "10/01/2025"),
        ]
    );

    let response = app
        .oneshot(
            Request::post("/admin/api/logs/delete")
                .header(header::AUTHORIZATION, basic_auth_header())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"rowIndex":3}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.row("Horodatage", 3).await.iter().all(String::is_empty));
    assert_eq!(store.row("Horodatage", 4).await[2], "Alice");
}
