//! Error type for `intake-service`.
//!
//! Only collaborator failures are errors. A missing request, a missing
//! person sought or a request without person data is reported as an absent
//! result instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// The collaborator's error, if it is an `E`.
  pub fn downcast_store<E: std::error::Error + 'static>(&self) -> Option<&E> {
    match self {
      Self::Store(e) => e.downcast_ref(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
