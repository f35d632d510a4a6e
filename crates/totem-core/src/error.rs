//! Error types for `totem-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown email kind: {0:?}")]
  UnknownEmailKind(String),

  #[error("unknown phone kind: {0:?}")]
  UnknownPhoneKind(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
