//! Handlers for `/agency-requests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/agency-requests/{key}` | 201; 400 without a person |
//! | `POST` | `/agency-requests/{key}/update` | 400 without a person, 404 if unknown |
//! | `POST` | `/agency-requests/{key}/cancel` | 404 if unknown |
//! | `GET`  | `/agency-requests/{key}` | 404 if unknown |
//!
//! The path key always replaces whatever key the body carries. Each request
//! gets its own cancellation source, so a dropped connection aborts the
//! store calls still in flight.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use intake_core::{
  cancel::CancelSource,
  entity::SearchRequestRecord,
  store::SearchRequestStore,
  wire::{PersonSearchRequest, SearchRequestOrdered},
};
use intake_service::AgencyRequestService;

use crate::error::ApiError;

fn unknown(key: &str) -> ApiError {
  ApiError::NotFound(format!("no search request with key {key:?}"))
}

fn no_person() -> ApiError {
  ApiError::BadRequest("request carries no person".to_owned())
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /agency-requests/{key}`
pub async fn create<S: SearchRequestStore + 'static>(
  State(service): State<AgencyRequestService<S>>,
  Path(key): Path<String>,
  Json(mut body): Json<SearchRequestOrdered>,
) -> Result<impl IntoResponse, ApiError> {
  body.search_request_key = key;
  let source = CancelSource::new();

  let created = service
    .process_create(&body, &source.signal())
    .await?
    .ok_or_else(no_person)?;
  Ok((StatusCode::CREATED, Json(created)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `POST /agency-requests/{key}/update`
pub async fn update<S: SearchRequestStore + 'static>(
  State(service): State<AgencyRequestService<S>>,
  Path(key): Path<String>,
  Json(mut body): Json<SearchRequestOrdered>,
) -> Result<Json<SearchRequestRecord>, ApiError> {
  body.search_request_key = key;
  let source = CancelSource::new();

  match service.process_update(&body, &source.signal()).await? {
    Some(updated) => Ok(Json(updated)),
    None if body.person.is_none() => Err(no_person()),
    None => Err(unknown(&body.search_request_key)),
  }
}

// ─── Cancel ───────────────────────────────────────────────────────────────────

/// `POST /agency-requests/{key}/cancel`. The body is optional.
pub async fn cancel<S: SearchRequestStore + 'static>(
  State(service): State<AgencyRequestService<S>>,
  Path(key): Path<String>,
  body: Option<Json<SearchRequestOrdered>>,
) -> Result<Json<SearchRequestRecord>, ApiError> {
  let mut ordered = body.map(|Json(b)| b).unwrap_or_default();
  ordered.search_request_key = key;
  let source = CancelSource::new();

  service
    .process_cancel(&ordered, &source.signal())
    .await?
    .map(Json)
    .ok_or_else(|| unknown(&ordered.search_request_key))
}

// ─── Describe ─────────────────────────────────────────────────────────────────

/// `GET /agency-requests/{key}`
pub async fn get_one<S: SearchRequestStore + 'static>(
  State(service): State<AgencyRequestService<S>>,
  Path(key): Path<String>,
) -> Result<Json<PersonSearchRequest>, ApiError> {
  let source = CancelSource::new();
  service
    .describe(&key, &source.signal())
    .await?
    .map(Json)
    .ok_or_else(|| unknown(&key))
}
