use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use intake_service::AgencyRequestService;
use intake_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> axum::Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(AgencyRequestService::new(Arc::new(store)))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> Response {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(v) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(v.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };
  app.clone().oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn payload() -> Value {
  json!({
    "searchRequestKey": "IGNORED",
    "notes": "first contact",
    "applicantFirstName": "Jo",
    "person": {
      "firstName": "Sam",
      "lastName": "Roe",
      "dateOfBirth": "1980-05-17",
      "referenceDates": [
        { "index": 0, "key": "Order Date", "value": "2020-09-13T12:26:40Z" }
      ],
      "identifiers": [
        { "value": "P-1", "type": "Passport", "owner": "PersonSought" }
      ],
      "employments": [
        {
          "occupation": "Faller",
          "employer": {
            "name": "Acme",
            "phones": [
              { "phoneNumber": "555-1111", "type": "primaryPhone" },
              { "phoneNumber": "555-3333", "type": "Work", "contactName": "Jane" }
            ]
          }
        }
      ]
    }
  })
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_under_the_path_key() {
  let app = app().await;
  let resp = send(&app, "POST", "/agency-requests/K-1", Some(payload())).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = json_body(resp).await;
  assert_eq!(body["entity"]["searchRequestKey"], "K-1");
  assert_eq!(body["entity"]["createdByApi"], true);
  assert_eq!(body["entity"]["sendNotificationOnCreation"], true);
  assert!(body["searchRequestId"].is_string());
  assert!(body.get("search_request_id").is_none());
  assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn create_without_person_is_400() {
  let app = app().await;
  let resp = send(&app, "POST", "/agency-requests/K-1", Some(json!({ "notes": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = json_body(resp).await;
  assert!(body["error"].as_str().unwrap().contains("no person"));
}

#[tokio::test]
async fn duplicate_create_is_409() {
  let app = app().await;
  send(&app, "POST", "/agency-requests/K-1", Some(payload())).await;
  let resp = send(&app, "POST", "/agency-requests/K-1", Some(payload())).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
  let body = json_body(resp).await;
  assert!(body["error"].as_str().unwrap().contains("already exists"));
}

// ── Describe ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_projects_the_stored_request() {
  let app = app().await;
  send(&app, "POST", "/agency-requests/K-1", Some(payload())).await;

  let resp = send(&app, "GET", "/agency-requests/K-1", None).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body = json_body(resp).await;
  assert_eq!(body["searchRequestKey"], "K-1");
  assert_eq!(body["firstName"], "Sam");
  assert_eq!(body["referenceDates"][0]["key"], "Order Date");
  assert_eq!(body["identifiers"][0]["value"], "P-1");
  assert_eq!(body["names"][0]["firstName"], "Jo");
  assert_eq!(body["names"][0]["owner"], "Applicant");

  let phones = body["employments"][0]["employer"]["phones"].as_array().unwrap();
  assert_eq!(phones.len(), 2);
}

#[tokio::test]
async fn get_unknown_is_404() {
  let app = app().await;
  let resp = send(&app, "GET", "/agency-requests/NOPE", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body = json_body(resp).await;
  assert!(body["error"].as_str().is_some());
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_merges_into_the_stored_request() {
  let app = app().await;
  send(&app, "POST", "/agency-requests/K-1", Some(payload())).await;

  let mut update = payload();
  update["requesterName"] = json!("Agent Smith");
  update["person"]["gender"] = json!("F");
  let resp = send(&app, "POST", "/agency-requests/K-1/update", Some(update)).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body = json_body(resp).await;
  assert_eq!(body["entity"]["requesterName"], "Agent Smith");
  assert_eq!(body["isDuplicated"], true);
}

#[tokio::test]
async fn update_unknown_is_404() {
  let app = app().await;
  let resp = send(&app, "POST", "/agency-requests/NOPE/update", Some(payload())).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_person_is_400() {
  let app = app().await;
  send(&app, "POST", "/agency-requests/K-1", Some(payload())).await;

  let resp = send(
    &app,
    "POST",
    "/agency-requests/K-1/update",
    Some(json!({ "notes": "changed" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Cancel ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cancel_without_body_marks_cancelled() {
  let app = app().await;
  send(&app, "POST", "/agency-requests/K-1", Some(payload())).await;

  let resp = send(&app, "POST", "/agency-requests/K-1/cancel", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json_body(resp).await;
  assert_eq!(body["status"], "cancelled");
}

#[tokio::test]
async fn cancel_unknown_is_404() {
  let app = app().await;
  let resp = send(&app, "POST", "/agency-requests/NOPE/cancel", Some(json!({}))).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
