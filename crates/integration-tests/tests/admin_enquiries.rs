//! Authenticated enquiry management.

use axum::http::StatusCode;
use serde_json::{Value, json};

use project_germany_integration_tests::{TestApp, sample_submission};

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("list is an array")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect()
}

#[tokio::test]
async fn test_admin_endpoints_require_token() {
    let app = TestApp::new();
    let id = app.submit_enquiry(&sample_submission("Ana Silva")).await["_id"].clone();

    for uri in ["/api/enquiries", "/api/enquiries/stats"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(response.message(), "No token provided");
    }

    let uri = format!("/api/enquiries/{id}");
    assert_eq!(app.get(&uri, None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.put(&uri, None, &json!({ "status": "resolved" })).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.delete(&uri, None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.enquiry_count().await, 1);
}

#[tokio::test]
async fn test_list_is_newest_first_by_default() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    for name in ["First", "Second", "Third"] {
        app.submit_enquiry(&sample_submission(name)).await;
    }

    let response = app.get("/api/enquiries", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.json()), ["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    for (name, interest) in [
        ("Carla", "Visa Support"),
        ("Bruno", "Accommodation"),
        ("Alma", "Visa Support"),
    ] {
        let mut body = sample_submission(name);
        body["interest"] = json!(interest);
        app.submit_enquiry(&body).await;
    }

    let response = app
        .get(
            "/api/enquiries?interest=Visa%20Support&sortBy=name&order=asc",
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.json()), ["Alma", "Carla"]);

    let response = app
        .get("/api/enquiries?status=contacted", Some(&token))
        .await;
    assert_eq!(names(&response.json()), Vec::<&str>::new());
}

#[tokio::test]
async fn test_list_rejects_unknown_filters() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    for uri in [
        "/api/enquiries?status=archived",
        "/api/enquiries?interest=Astronomy",
        "/api/enquiries?sortBy=password",
    ] {
        let response = app.get(uri, Some(&token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(!response.message().is_empty());
    }
}

#[tokio::test]
async fn test_show_returns_one_enquiry() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let created = app.submit_enquiry(&sample_submission("Ines Moreau")).await;

    let response = app
        .get(&format!("/api/enquiries/{}", created["_id"]), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), created);
}

#[tokio::test]
async fn test_unknown_or_malformed_id_is_not_found() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    for uri in ["/api/enquiries/999", "/api/enquiries/not-an-id"] {
        let response = app.get(uri, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.message(), "Enquiry not found");

        let response = app.put(uri, Some(&token), &json!({ "notes": "x" })).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let created = app.submit_enquiry(&sample_submission("Jonas Berg")).await;
    let uri = format!("/api/enquiries/{}", created["_id"]);

    let response = app
        .put(
            &uri,
            Some(&token),
            &json!({ "status": "contacted", "notes": "Called on Monday" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["status"], "contacted");
    assert_eq!(updated["notes"], "Called on Monday");
    for field in ["_id", "name", "email", "phone", "interest", "message", "createdAt"] {
        assert_eq!(updated[field], created[field], "{field}");
    }

    let stored = app.get(&uri, Some(&token)).await.json();
    assert_eq!(stored, updated);

    let response = app
        .put(
            &uri,
            Some(&token),
            &json!({ "message": "   ", "notes": "  Follow up in May  " }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let cleared = response.json();
    assert!(cleared.get("message").is_none(), "{cleared}");
    assert_eq!(cleared["notes"], "Follow up in May");
    assert_eq!(cleared["status"], "contacted");
    assert_eq!(cleared["name"], created["name"]);
}

#[tokio::test]
async fn test_update_accepts_post_and_full_record() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let created = app.submit_enquiry(&sample_submission("Mina Park")).await;
    let uri = format!("/api/enquiries/{}", created["_id"]);

    let mut record = created.clone();
    record["status"] = json!("resolved");

    let response = app.post(&uri, Some(&token), &record).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "resolved");
    assert_eq!(response.json()["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_rejects_invalid_values() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let created = app.submit_enquiry(&sample_submission("Omar Haddad")).await;
    let uri = format!("/api/enquiries/{}", created["_id"]);

    for body in [
        json!({ "status": "archived" }),
        json!({ "interest": "Astronomy" }),
        json!({ "name": "  " }),
    ] {
        let response = app.put(&uri, Some(&token), &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
    }

    let stored = app.get(&uri, Some(&token)).await.json();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let doomed = app.submit_enquiry(&sample_submission("Petra Novak")).await;
    app.submit_enquiry(&sample_submission("Rui Costa")).await;
    let uri = format!("/api/enquiries/{}", doomed["_id"]);

    let response = app.delete(&uri, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Enquiry deleted successfully");
    assert_eq!(app.store.enquiry_count().await, 1);

    assert_eq!(app.get(&uri, Some(&token)).await.status, StatusCode::NOT_FOUND);

    let again = app.delete(&uri, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.enquiry_count().await, 1);
}

#[tokio::test]
async fn test_stats_are_consistent() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    for (name, interest) in [
        ("A", "Visa Support"),
        ("B", "Visa Support"),
        ("C", "Accommodation"),
        ("D", "Career Guidance"),
    ] {
        let mut body = sample_submission(name);
        body["interest"] = json!(interest);
        app.submit_enquiry(&body).await;
    }
    let first_id = app.get("/api/enquiries?sortBy=name&order=asc", Some(&token)).await.json()[0]
        ["_id"]
        .clone();
    app.put(
        &format!("/api/enquiries/{first_id}"),
        Some(&token),
        &json!({ "status": "resolved" }),
    )
    .await;

    let response = app.get("/api/enquiries/stats", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let stats = response.json();

    assert_eq!(stats["total"], 4);
    assert_eq!(stats["pending"], 3);
    assert_eq!(stats["contacted"], 0);
    assert_eq!(stats["resolved"], 1);
    assert_eq!(stats["recentEnquiries"], 4);

    let by_interest = stats["byInterest"].as_array().expect("byInterest array");
    assert_eq!(by_interest[0], json!({ "_id": "Visa Support", "count": 2 }));
    let sum: i64 = by_interest.iter().filter_map(|row| row["count"].as_i64()).sum();
    assert_eq!(sum, 4);
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let stats = app.get("/api/enquiries/stats", Some(&token)).await.json();

    assert_eq!(stats["total"], 0);
    assert_eq!(stats["recentEnquiries"], 0);
    assert_eq!(stats["byInterest"], json!([]));
}
