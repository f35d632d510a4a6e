//! Similarity evaluator: do two contact records denote the same person?
//!
//! Rules, first applicable wins:
//!
//! 1. Both records carry a member code: the codes decide, names are ignored.
//! 2. Otherwise both records need a first and a last name, and both pairs of
//!    names must be similar (see [`MatchConfig::names_similar`]).
//! 3. Anything else is not a duplicate.
//!
//! Every rule is symmetric, so argument order never changes the answer.

use serde::Serialize;
use totem_core::Contact;

use crate::MatchConfig;

/// Which rule declared two records duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
  /// Both records carry the same non-empty member code.
  MemberCode,
  /// At least one record lacks a member code and both names are similar.
  SimilarName,
}

/// Case-fold and trim a name for comparison.
pub(crate) fn normalize(s: &str) -> String { s.trim().to_lowercase() }

/// Unit-cost Levenshtein distance over the characters of `a` and `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();

  if a.is_empty() {
    return b.len();
  }
  if b.is_empty() {
    return a.len();
  }

  let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
  for (i, row) in table.iter_mut().enumerate() {
    row[0] = i;
  }
  for (j, cell) in table[0].iter_mut().enumerate() {
    *cell = j;
  }

  for i in 1..=a.len() {
    for j in 1..=b.len() {
      let cost = usize::from(a[i - 1] != b[j - 1]);
      table[i][j] = (table[i - 1][j] + 1) // deletion
        .min(table[i][j - 1] + 1) // insertion
        .min(table[i - 1][j - 1] + cost); // substitution
    }
  }

  table[a.len()][b.len()]
}

impl MatchConfig {
  /// Two names are similar when they are equal after normalization, or when
  /// they are within `max_name_distance` edits of each other and the shorter
  /// one is at least `min_name_length` characters long.
  pub fn names_similar(&self, a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
      return false;
    }

    let a = normalize(a);
    let b = normalize(b);
    if a == b {
      return true;
    }

    let shorter = a.chars().count().min(b.chars().count());
    shorter >= self.min_name_length
      && edit_distance(&a, &b) <= self.max_name_distance
  }

  /// The rule under which `a` and `b` are duplicates, if any.
  pub fn match_reason(&self, a: &Contact, b: &Contact) -> Option<MatchReason> {
    if !a.member_code.is_empty() && !b.member_code.is_empty() {
      return (a.member_code == b.member_code).then_some(MatchReason::MemberCode);
    }

    let similar = a.has_full_name()
      && b.has_full_name()
      && self.names_similar(&a.first_name, &b.first_name)
      && self.names_similar(&a.last_name, &b.last_name);
    similar.then_some(MatchReason::SimilarName)
  }

  pub fn is_duplicate(&self, a: &Contact, b: &Contact) -> bool {
    self.match_reason(a, b).is_some()
  }
}

/// [`MatchConfig::names_similar`] with the default thresholds.
pub fn names_similar(a: &str, b: &str) -> bool {
  MatchConfig::default().names_similar(a, b)
}

/// [`MatchConfig::match_reason`] with the default thresholds.
pub fn match_reason(a: &Contact, b: &Contact) -> Option<MatchReason> {
  MatchConfig::default().match_reason(a, b)
}

/// True when `a` and `b` denote the same person under the default thresholds.
pub fn is_duplicate(a: &Contact, b: &Contact) -> bool {
  MatchConfig::default().is_duplicate(a, b)
}
