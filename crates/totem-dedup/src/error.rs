//! Error type for `totem-dedup`.
//!
//! Matching and merging are total; only configuration can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid match configuration: {0}")]
  InvalidConfig(String),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
