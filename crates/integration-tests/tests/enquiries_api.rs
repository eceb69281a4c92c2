//! Public enquiry submission.

use axum::body::Body;
use axum::http::{Method, StatusCode};
use serde_json::json;

use project_germany_integration_tests::{TestApp, sample_submission};

#[tokio::test]
async fn test_submit_returns_stored_record() {
    let app = TestApp::new();

    let response = app
        .post("/api/enquiries", None, &sample_submission("Priya Sharma"))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert!(body["_id"].is_number());
    assert_eq!(body["name"], "Priya Sharma");
    assert_eq!(body["email"], "priya.sharma@example.com");
    assert_eq!(body["interest"], "Visa Support");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["notes"], "");
    assert!(body["createdAt"].is_string());
    assert_eq!(app.store.enquiry_count().await, 1);
}

#[tokio::test]
async fn test_missing_required_field_is_rejected_and_not_stored() {
    let app = TestApp::new();

    for missing in ["name", "email", "phone"] {
        let mut body = sample_submission("Lucia Rossi");
        if let Some(fields) = body.as_object_mut() {
            fields.remove(missing);
        }

        let response = app.post("/api/enquiries", None, &body).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "missing {missing}");
        assert_eq!(response.message(), "Please provide name, email, and phone.");
    }

    let blank = json!({ "name": "   ", "email": "a@b.c", "phone": "123" });
    let response = app.post("/api/enquiries", None, &blank).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.store.enquiry_count().await, 0);
}

#[tokio::test]
async fn test_interest_defaults_to_other() {
    let app = TestApp::new();

    let omitted = app
        .submit_enquiry(&json!({ "name": "Chen Wang", "email": "chen@example.com", "phone": "1" }))
        .await;
    assert_eq!(omitted["interest"], "Other");

    let unknown = app
        .submit_enquiry(&json!({
            "name": "Chen Wang",
            "email": "chen@example.com",
            "phone": "1",
            "interest": "Astronaut Training",
        }))
        .await;
    assert_eq!(unknown["interest"], "Other");
}

#[tokio::test]
async fn test_absent_message_is_omitted() {
    let app = TestApp::new();

    let body = app
        .submit_enquiry(&json!({ "name": "Amara Okafor", "email": "amara@example.com", "phone": "2" }))
        .await;

    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_duplicate_submissions_are_both_stored() {
    let app = TestApp::new();
    let body = sample_submission("Diego Garcia");

    let first = app.submit_enquiry(&body).await;
    let second = app.submit_enquiry(&body).await;

    assert_ne!(first["_id"], second["_id"]);
    assert_eq!(app.store.enquiry_count().await, 2);
}

#[tokio::test]
async fn test_malformed_json_is_a_json_400() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::POST,
            "/api/enquiries",
            None,
            Some("application/json"),
            Body::from("{\"name\": "),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(!response.message().is_empty());
    assert_eq!(app.store.enquiry_count().await, 0);
}
