//! JSON HTTP surface for agency search requests.
//!
//! Exposes an axum [`Router`] backed by an [`AgencyRequestService`] over any
//! [`SearchRequestStore`]. Auth and TLS are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", intake_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod requests;

use std::path::PathBuf;

use axum::{
  Router,
  routing::{get, post},
};
use intake_core::store::SearchRequestStore;
use intake_service::AgencyRequestService;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `INTAKE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("intake.sqlite") }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: AgencyRequestService<S>) -> Router<()>
where
  S: SearchRequestStore + 'static,
{
  Router::new()
    .route(
      "/agency-requests/{key}",
      get(requests::get_one::<S>).post(requests::create::<S>),
    )
    .route("/agency-requests/{key}/update", post(requests::update::<S>))
    .route("/agency-requests/{key}/cancel", post(requests::cancel::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(service)
}

#[cfg(test)]
mod tests;
