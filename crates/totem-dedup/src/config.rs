//! Tunables for the name-similarity fallback.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Thresholds used when two records cannot be matched by member code.
///
/// Missing fields deserialize to their defaults, so an empty JSON object is a
/// valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
  /// Largest edit distance at which two normalized names are still similar.
  pub max_name_distance: usize,
  /// Below this length (in characters) only an exact normalized match counts.
  pub min_name_length:   usize,
}

impl Default for MatchConfig {
  fn default() -> Self {
    Self {
      max_name_distance: 2,
      min_name_length:   3,
    }
  }
}

impl MatchConfig {
  /// Reject thresholds under which any two names of the minimum length could
  /// be declared similar.
  pub fn validate(&self) -> Result<()> {
    if self.min_name_length == 0 {
      return Err(Error::InvalidConfig(
        "min_name_length must be at least 1".to_string(),
      ));
    }
    if self.max_name_distance >= self.min_name_length {
      return Err(Error::InvalidConfig(format!(
        "max_name_distance ({}) must be smaller than min_name_length ({})",
        self.max_name_distance, self.min_name_length
      )));
    }
    Ok(())
  }

  /// Deserialize and validate a configuration.
  pub fn from_json(value: serde_json::Value) -> Result<Self> {
    let config: Self = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_is_valid() {
    let config = MatchConfig::default();
    assert_eq!(config.max_name_distance, 2);
    assert_eq!(config.min_name_length, 3);
    config.validate().unwrap();
  }

  #[test]
  fn empty_object_yields_defaults() {
    let config = MatchConfig::from_json(serde_json::json!({})).unwrap();
    assert_eq!(config, MatchConfig::default());
  }

  #[test]
  fn partial_object_overrides_one_field() {
    let config =
      MatchConfig::from_json(serde_json::json!({ "min_name_length": 5 }))
        .unwrap();
    assert_eq!(config.min_name_length, 5);
    assert_eq!(config.max_name_distance, 2);
  }

  #[test]
  fn zero_min_length_rejected() {
    let err = MatchConfig::from_json(serde_json::json!({
      "max_name_distance": 0,
      "min_name_length": 0,
    }))
    .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
  }

  #[test]
  fn distance_not_below_length_rejected() {
    let config = MatchConfig {
      max_name_distance: 3,
      min_name_length:   3,
    };
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn wrong_type_is_json_error() {
    let err =
      MatchConfig::from_json(serde_json::json!({ "min_name_length": "three" }))
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
  }
}
