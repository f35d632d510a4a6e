//! Field-merge policy: fold one contact record into another.
//!
//! Which side may overwrite is decided by `updated_at` alone. A record with a
//! timestamp always outranks one without; between two timestamped records the
//! strictly later one wins; with no timestamps at all the destination wins.
//! The losing side can still fill fields the winner leaves empty, and labels
//! are always unioned.

use std::collections::{BTreeMap, btree_map::Entry};

use totem_core::Contact;

/// True when `source` may overwrite non-empty fields of `destination`.
pub fn source_is_newer(destination: &Contact, source: &Contact) -> bool {
  match (destination.updated_at, source.updated_at) {
    (None, Some(_)) => true,
    (Some(dest), Some(src)) => src > dest,
    (Some(_), None) | (None, None) => false,
  }
}

/// Merge `source` into `destination` in place. `source` is never modified.
pub fn merge_into(destination: &mut Contact, source: &Contact) {
  let newer = source_is_newer(destination, source);

  merge_text(&mut destination.member_code, &source.member_code, newer);
  merge_text(&mut destination.first_name, &source.first_name, newer);
  merge_text(&mut destination.last_name, &source.last_name, newer);
  merge_value(&mut destination.birthday, source.birthday, newer);
  merge_text(&mut destination.address, &source.address, newer);
  merge_text(&mut destination.city, &source.city, newer);
  merge_text(&mut destination.zip_code, &source.zip_code, newer);
  merge_text(&mut destination.country, &source.country, newer);
  merge_text(&mut destination.position, &source.position, newer);

  merge_map(&mut destination.emails, &source.emails, newer);
  merge_map(&mut destination.phones, &source.phones, newer);

  for label in &source.labels {
    if !destination.labels.contains(label) {
      destination.labels.push(label.clone());
    }
  }

  // `None` orders before any `Some`, so this keeps the latest known time.
  destination.updated_at = destination.updated_at.max(source.updated_at);
}

/// Merge `source` into a copy of `destination`; neither input is touched.
pub fn merge(destination: &Contact, source: &Contact) -> Contact {
  let mut merged = destination.clone();
  merge_into(&mut merged, source);
  merged
}

/// [`merge`] over possibly-absent records. A lone record is copied as is.
pub fn merge_optional(
  destination: Option<&Contact>,
  source: Option<&Contact>,
) -> Option<Contact> {
  match (destination, source) {
    (Some(destination), Some(source)) => Some(merge(destination, source)),
    (Some(only), None) | (None, Some(only)) => Some(only.clone()),
    (None, None) => None,
  }
}

fn merge_text(destination: &mut String, source: &str, newer: bool) {
  if !source.is_empty() && (newer || destination.is_empty()) {
    source.clone_into(destination);
  }
}

fn merge_value<T>(destination: &mut Option<T>, source: Option<T>, newer: bool) {
  if source.is_some() && (newer || destination.is_none()) {
    *destination = source;
  }
}

fn merge_map<K: Ord + Copy>(
  destination: &mut BTreeMap<K, String>,
  source: &BTreeMap<K, String>,
  newer: bool,
) {
  for (&kind, value) in source {
    if value.is_empty() {
      continue;
    }
    match destination.entry(kind) {
      Entry::Occupied(mut slot) => {
        if newer || slot.get().is_empty() {
          slot.insert(value.clone());
        }
      }
      Entry::Vacant(slot) => {
        slot.insert(value.clone());
      }
    }
  }
}
