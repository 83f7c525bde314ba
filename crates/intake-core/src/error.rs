//! Error types for `intake-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown {kind} code: {code}")]
  UnknownCode { kind: &'static str, code: i32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
