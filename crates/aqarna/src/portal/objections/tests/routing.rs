use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::util::ServiceExt;

use crate::portal::objections::domain::ReviewDecision;

use super::common::*;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn owner_submit_body() -> serde_json::Value {
    json!({
        "draft": {
            "invoice_id": "INV-240113",
            "title": "Review of the shared-services fee calculation",
            "reason": "The July invoice applies a 7% rate where the signed agreement says 5%.",
            "category": "billing_calculation",
            "impact": "medium",
            "attachments": [
                { "name": "agreement.pdf", "content_type": "application/pdf", "size_bytes": 307200 }
            ],
            "agree": true
        },
        "submitter": {
            "name": "رنيم عبد العزيز",
            "unit": "A-12",
            "union_name": "اتحاد برج الندى",
            "region": "الرياض"
        }
    })
}

#[tokio::test]
async fn owner_submission_returns_accepted_view() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("POST", "/api/v1/objections", owner_submit_body()))
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "under_review", "list label folds new into review");
    assert_eq!(body["source"], "member");
    assert_eq!(body["unit"], "A-12");
    assert!(body["id"].as_str().expect("id string").starts_with("OBJ-"));
}

#[tokio::test]
async fn invalid_submission_lists_every_violation() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let mut body = owner_submit_body();
    body["draft"]["title"] = json!("ab");
    body["draft"]["reason"] = json!("too short");
    body["draft"]["agree"] = json!(false);

    let response = router
        .oneshot(json_request("POST", "/api/v1/objections", body))
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let errors = payload["errors"].as_array().expect("error list");
    assert_eq!(errors.len(), 3);
}

#[tokio::test]
async fn union_submission_accepts_short_form() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let body = json!({
        "draft": { "title": "Review of the operating fee calculation", "details": "" },
        "union": "اتحاد الملاك",
        "region": "الرياض"
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/objections/union", body))
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["source"], "union");
    assert_eq!(payload["unit"], "—");
}

#[tokio::test]
async fn review_endpoint_rejects_reopening_with_conflict() {
    let (service, _) = build_service();
    let objection = service
        .submit_owner(owner_draft(), submitter(), today())
        .expect("submission accepted");
    service
        .review(&objection.id, ReviewDecision::Accepted)
        .expect("decide objection");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/objections/{}/review", objection.id),
            json!({ "decision": "rejected" }),
        ))
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("already accepted"));
}

#[tokio::test]
async fn list_endpoint_applies_query_parameters() {
    let (service, _) = build_service();
    service
        .submit_owner(owner_draft(), submitter(), today())
        .expect("member objection");
    service
        .submit_union(
            union_draft(),
            "اتحاد الملاك".to_string(),
            crate::portal::indicators::Region::Riyadh,
            today(),
        )
        .expect("union objection");
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/objections?source=union&status=all")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 1);
    assert_eq!(payload["objections"][0]["source"], "union");
}

#[tokio::test]
async fn list_endpoint_rejects_unknown_status() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/objections?status=escalated")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detail_returns_not_found_for_unknown_id() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/objections/OBJ-0000")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_row() {
    let (service, repository) = build_service();
    let objection = service
        .submit_owner(owner_draft(), submitter(), today())
        .expect("submission accepted");
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/objections/{}", objection.id))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::NO_CONTENT);
    assert!(crate::portal::objections::repository::ObjectionRepository::fetch(
        repository.as_ref(),
        &objection.id
    )
    .expect("fetch succeeds")
    .is_none());
}
