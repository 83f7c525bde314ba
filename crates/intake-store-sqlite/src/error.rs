//! Error type for `intake-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("cannot decode column value: {0}")]
  Decode(String),

  /// The operation's cancellation signal fired before the statement
  /// completed.
  #[error("operation cancelled")]
  Cancelled,

  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: uuid::Uuid },

  #[error("no search request with key {0:?}")]
  UnknownKey(String),

  #[error("a search request with key {0:?} already exists")]
  DuplicateKey(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
