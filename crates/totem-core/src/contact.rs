//! The contact record — the unit of identity the engine groups and merges.
//!
//! Every attribute may be empty. Emptiness always means "absent": the email
//! and phone maps never hold an empty string under a live key, and the label
//! list never holds the same label twice. The setters on [`Contact`] keep both
//! invariants; code that writes the public fields directly must keep them too.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// The kind of an email address. A contact holds at most one address per kind.
///
/// Declaration order is the priority order used by [`Contact::first_email`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmailKind {
  Personal,
  /// Address issued by the organization to its member.
  Dedicated,
}

/// The kind of a phone number. A contact holds at most one number per kind.
///
/// Declaration order is the priority order used by [`Contact::first_phone`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PhoneKind {
  #[serde(rename = "mobile1")]
  #[strum(serialize = "mobile1")]
  Mobile1,
  #[serde(rename = "mobile2")]
  #[strum(serialize = "mobile2")]
  Mobile2,
  Home,
  Work,
}

impl EmailKind {
  /// The canonical lowercase name, as used on the wire.
  pub fn as_str(self) -> &'static str { self.into() }
}

impl PhoneKind {
  /// The canonical lowercase name, as used on the wire.
  pub fn as_str(self) -> &'static str { self.into() }
}

impl fmt::Display for EmailKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl fmt::Display for PhoneKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EmailKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let wanted = s.trim();
    Self::iter()
      .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| Error::UnknownEmailKind(s.to_string()))
  }
}

impl FromStr for PhoneKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let wanted = s.trim();
    Self::iter()
      .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| Error::UnknownPhoneKind(s.to_string()))
  }
}

// ─── Labels ──────────────────────────────────────────────────────────────────

/// A role or category tag attached to a contact (e.g. "Parent").
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
  pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for Label {
  fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for Label {
  fn from(s: String) -> Self { Self(s) }
}

impl fmt::Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// One contact entry as produced by an upstream extractor.
///
/// `Clone` is a deep copy: every map, the label list and the optional dates
/// are owned, so a clone never shares storage with its original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
  /// Opaque membership identifier; authoritative for identity when both
  /// sides of a comparison carry one.
  #[serde(skip_serializing_if = "String::is_empty")]
  pub member_code: String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub first_name:  String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub last_name:   String,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub emails:      BTreeMap<EmailKind, String>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub phones:      BTreeMap<PhoneKind, String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub birthday:    Option<NaiveDate>,
  /// Street lines, newline-separated.
  #[serde(skip_serializing_if = "String::is_empty")]
  pub address:     String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub city:        String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub zip_code:    String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub country:     String,
  /// Role held within the organization.
  #[serde(skip_serializing_if = "String::is_empty")]
  pub position:    String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub labels:      Vec<Label>,
  /// When this record's data was last captured or verified. `None` means
  /// "unknown", which is not the same as "oldest".
  #[serde(skip_serializing_if = "Option::is_none")]
  pub updated_at:  Option<DateTime<Utc>>,
}

impl Contact {
  /// Convenience constructor for a contact with only a name.
  pub fn named(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
      ..Self::default()
    }
  }

  /// True when both the first and the last name are non-empty.
  pub fn has_full_name(&self) -> bool {
    !self.first_name.is_empty() && !self.last_name.is_empty()
  }

  // ── Emails ────────────────────────────────────────────────────────────

  pub fn email(&self, kind: EmailKind) -> Option<&str> {
    self.emails.get(&kind).map(String::as_str)
  }

  /// Set the address for `kind`. An empty value removes the entry.
  pub fn set_email(&mut self, kind: EmailKind, address: impl Into<String>) {
    let address = address.into();
    if address.is_empty() {
      self.emails.remove(&kind);
    } else {
      self.emails.insert(kind, address);
    }
  }

  /// The highest-priority address present, personal first.
  pub fn first_email(&self) -> Option<&str> {
    EmailKind::iter().find_map(|kind| self.email(kind))
  }

  // ── Phones ────────────────────────────────────────────────────────────

  pub fn phone(&self, kind: PhoneKind) -> Option<&str> {
    self.phones.get(&kind).map(String::as_str)
  }

  /// Set the number for `kind`. An empty value removes the entry.
  pub fn set_phone(&mut self, kind: PhoneKind, number: impl Into<String>) {
    let number = number.into();
    if number.is_empty() {
      self.phones.remove(&kind);
    } else {
      self.phones.insert(kind, number);
    }
  }

  /// The highest-priority number present: mobiles, then home, then work.
  pub fn first_phone(&self) -> Option<&str> {
    PhoneKind::iter().find_map(|kind| self.phone(kind))
  }

  // ── Labels ────────────────────────────────────────────────────────────

  /// Append `label` unless it is already present.
  pub fn add_label(&mut self, label: impl Into<Label>) {
    let label = label.into();
    if !self.labels.contains(&label) {
      self.labels.push(label);
    }
  }

  pub fn has_label(&self, label: &str) -> bool {
    self.labels.iter().any(|l| l.as_str() == label)
  }

  pub fn remove_label(&mut self, label: &str) {
    self.labels.retain(|l| l.as_str() != label);
  }

  pub fn clear_labels(&mut self) { self.labels.clear(); }

  pub fn labels_as_strings(&self) -> Vec<&str> {
    self.labels.iter().map(Label::as_str).collect()
  }

  // ── JSON ──────────────────────────────────────────────────────────────

  pub fn to_json(&self) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(self)?)
  }

  pub fn from_json(value: serde_json::Value) -> Result<Self> {
    Ok(serde_json::from_value(value)?)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn set_email_with_empty_value_removes_entry() {
    let mut c = Contact::default();
    c.set_email(EmailKind::Personal, "a@example.com");
    assert_eq!(c.email(EmailKind::Personal), Some("a@example.com"));

    c.set_email(EmailKind::Personal, "");
    assert_eq!(c.email(EmailKind::Personal), None);
    assert!(c.emails.is_empty());
  }

  #[test]
  fn first_email_prefers_personal() {
    let mut c = Contact::default();
    assert_eq!(c.first_email(), None);

    c.set_email(EmailKind::Dedicated, "member@org.example");
    assert_eq!(c.first_email(), Some("member@org.example"));

    c.set_email(EmailKind::Personal, "me@example.com");
    assert_eq!(c.first_email(), Some("me@example.com"));
  }

  #[test]
  fn first_phone_follows_priority_order() {
    let mut c = Contact::default();
    c.set_phone(PhoneKind::Work, "0400000004");
    assert_eq!(c.first_phone(), Some("0400000004"));

    c.set_phone(PhoneKind::Home, "0100000003");
    assert_eq!(c.first_phone(), Some("0100000003"));

    c.set_phone(PhoneKind::Mobile2, "0600000002");
    assert_eq!(c.first_phone(), Some("0600000002"));

    c.set_phone(PhoneKind::Mobile1, "0600000001");
    assert_eq!(c.first_phone(), Some("0600000001"));
  }

  #[test]
  fn add_label_ignores_duplicates() {
    let mut c = Contact::default();
    c.add_label("Parent");
    c.add_label("Bureau");
    c.add_label("Parent");

    assert_eq!(c.labels_as_strings(), vec!["Parent", "Bureau"]);
    assert!(c.has_label("Bureau"));
    assert!(!c.has_label("Adhérent"));
  }

  #[test]
  fn remove_and_clear_labels() {
    let mut c = Contact::default();
    c.add_label("Parent");
    c.add_label("Bureau");

    c.remove_label("Parent");
    assert_eq!(c.labels_as_strings(), vec!["Bureau"]);

    c.remove_label("missing");
    assert_eq!(c.labels.len(), 1);

    c.clear_labels();
    assert!(c.labels.is_empty());
  }

  #[test]
  fn kinds_parse_from_canonical_names() {
    assert_eq!("personal".parse::<EmailKind>().unwrap(), EmailKind::Personal);
    assert_eq!(" Dedicated ".parse::<EmailKind>().unwrap(), EmailKind::Dedicated);
    assert_eq!("mobile2".parse::<PhoneKind>().unwrap(), PhoneKind::Mobile2);
    assert_eq!(PhoneKind::Mobile1.to_string(), "mobile1");
    assert_eq!(PhoneKind::Home.as_str(), "home");

    let err = "fax".parse::<PhoneKind>().unwrap_err();
    assert!(matches!(err, Error::UnknownPhoneKind(ref s) if s == "fax"));
    assert!("work".parse::<EmailKind>().is_err());
  }

  #[test]
  fn clone_owns_its_collections() {
    let mut original = Contact::named("John", "Doe");
    original.set_email(EmailKind::Personal, "john@example.com");
    original.set_phone(PhoneKind::Mobile1, "0600000001");
    original.add_label("Parent");
    original.birthday = NaiveDate::from_ymd_opt(1990, 1, 1);

    let mut copy = original.clone();
    copy.set_email(EmailKind::Personal, "other@example.com");
    copy.set_phone(PhoneKind::Work, "0400000004");
    copy.add_label("Bureau");
    copy.birthday = NaiveDate::from_ymd_opt(2000, 2, 2);

    assert_eq!(original.email(EmailKind::Personal), Some("john@example.com"));
    assert_eq!(original.phones.len(), 1);
    assert_eq!(original.labels_as_strings(), vec!["Parent"]);
    assert_eq!(original.birthday, NaiveDate::from_ymd_opt(1990, 1, 1));
  }

  #[test]
  fn json_skips_empty_fields() {
    let mut c = Contact::named("Jane", "Smith");
    c.set_phone(PhoneKind::Mobile1, "0600000001");
    c.updated_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

    let json = c.to_json().unwrap();
    assert_eq!(json["first_name"], "Jane");
    assert_eq!(json["phones"]["mobile1"], "0600000001");
    assert!(json.get("member_code").is_none());
    assert!(json.get("emails").is_none());
    assert!(json.get("labels").is_none());

    let back = Contact::from_json(json).unwrap();
    assert_eq!(back, c);
  }

  #[test]
  fn json_accepts_sparse_records() {
    let value = serde_json::json!({
      "member_code": "12345",
      "emails": { "dedicated": "member@org.example" },
      "labels": ["Adhérent"],
      "birthday": "1995-06-15",
    });

    let c = Contact::from_json(value).unwrap();
    assert_eq!(c.member_code, "12345");
    assert_eq!(c.email(EmailKind::Dedicated), Some("member@org.example"));
    assert!(c.has_label("Adhérent"));
    assert_eq!(c.birthday, NaiveDate::from_ymd_opt(1995, 6, 15));
    assert!(c.first_name.is_empty());
    assert!(c.updated_at.is_none());
  }
}
