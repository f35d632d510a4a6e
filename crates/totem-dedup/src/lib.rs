//! Record-linkage and merge engine for Totem contact batches.
//!
//! Takes an ordered batch of [`Contact`] records, decides which of them
//! denote the same person ([`similarity`]), and collapses each group into a
//! single record using a timestamp-aware field-merge policy ([`merge`]).
//! Pure synchronous code: no I/O, no shared state between calls.
//!
//! # Quick start
//!
//! ```
//! use totem_dedup::{Contact, group_and_merge};
//!
//! let batch = vec![
//!   Contact::named("John", "Doe"),
//!   Contact::named("Jane", "Smith"),
//!   Contact::named("Jon", "Doe"),
//! ];
//! let merged = group_and_merge(&batch);
//! assert_eq!(merged.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod group;
pub mod merge;
pub mod similarity;

pub use config::MatchConfig;
pub use error::{Error, Result};
pub use group::{
  Absorbed, DedupOutcome, DedupReport, Deduplicator, GroupReport,
  group_and_merge,
};
pub use merge::{merge, merge_into, merge_optional, source_is_newer};
pub use similarity::{
  MatchReason, edit_distance, is_duplicate, match_reason, names_similar,
};
pub use totem_core::Contact;
