//! Grouping engine: collapse an ordered batch into one record per person.
//!
//! A single greedy pass. The first unconsumed record becomes a group leader;
//! every later unconsumed record that matches the leader's *original* fields
//! is merged into the leader's running copy and consumed. Matching is not
//! transitive: a record that only resembles a non-leader member of a group is
//! left for a later group. Downstream output depends on this exact grouping,
//! so it must not be replaced by a clustering that chases transitive matches.

use serde::Serialize;
use totem_core::Contact;

use crate::{MatchConfig, MatchReason, Result, merge::merge_into};

// ─── Report ──────────────────────────────────────────────────────────────────

/// A record folded into its group leader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Absorbed {
  /// Position of the record in the input batch.
  pub index:  usize,
  pub reason: MatchReason,
}

/// One output record and the input records it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
  /// Position of the group leader in the input batch.
  pub leader:   usize,
  pub absorbed: Vec<Absorbed>,
}

/// How a batch was grouped. `groups[n]` describes output record `n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupReport {
  pub input_len: usize,
  pub groups:    Vec<GroupReport>,
}

impl DedupReport {
  /// Number of input records absorbed into an earlier leader.
  pub fn duplicates_removed(&self) -> usize {
    self.groups.iter().map(|g| g.absorbed.len()).sum()
  }

  /// Groups that absorbed at least one record.
  pub fn merged_groups(&self) -> impl Iterator<Item = &GroupReport> {
    self.groups.iter().filter(|g| !g.absorbed.is_empty())
  }
}

/// The merged batch together with its grouping report.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
  pub contacts: Vec<Contact>,
  pub report:   DedupReport,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Groups and merges contact batches under a fixed [`MatchConfig`].
///
/// Holds no state between calls; one value may serve any number of batches,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
  config: MatchConfig,
}

impl Deduplicator {
  /// Build a deduplicator, rejecting an invalid configuration.
  pub fn new(config: MatchConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn config(&self) -> &MatchConfig { &self.config }

  pub fn is_duplicate(&self, a: &Contact, b: &Contact) -> bool {
    self.config.is_duplicate(a, b)
  }

  /// Collapse `records` into one record per detected person, in the order
  /// group leaders first appear. `records` is left untouched.
  pub fn group_and_merge(&self, records: &[Contact]) -> Vec<Contact> {
    self.run(records).contacts
  }

  /// [`Self::group_and_merge`], also reporting which inputs formed each group.
  pub fn run(&self, records: &[Contact]) -> DedupOutcome {
    let _span =
      tracing::debug_span!("group_and_merge", records = records.len()).entered();

    if records.len() <= 1 {
      return DedupOutcome {
        contacts: records.to_vec(),
        report:   DedupReport {
          input_len: records.len(),
          groups:    (0..records.len())
            .map(|leader| GroupReport {
              leader,
              absorbed: Vec::new(),
            })
            .collect(),
        },
      };
    }

    let mut consumed = vec![false; records.len()];
    let mut contacts = Vec::new();
    let mut groups = Vec::new();

    for (i, leader) in records.iter().enumerate() {
      if consumed[i] {
        continue;
      }
      consumed[i] = true;

      let mut merged = leader.clone();
      let mut absorbed = Vec::new();

      for (j, candidate) in records.iter().enumerate().skip(i + 1) {
        if consumed[j] {
          continue;
        }
        // Always compare against the leader as it came in, not `merged`.
        let Some(reason) = self.config.match_reason(leader, candidate) else {
          continue;
        };

        tracing::trace!(leader = i, candidate = j, ?reason, "merging duplicate");
        merge_into(&mut merged, candidate);
        consumed[j] = true;
        absorbed.push(Absorbed { index: j, reason });
      }

      contacts.push(merged);
      groups.push(GroupReport {
        leader: i,
        absorbed,
      });
    }

    let report = DedupReport {
      input_len: records.len(),
      groups,
    };
    tracing::debug!(
      input = records.len(),
      output = contacts.len(),
      removed = report.duplicates_removed(),
      "deduplication finished"
    );

    DedupOutcome { contacts, report }
  }
}

/// Group and merge `records` under the default [`MatchConfig`].
pub fn group_and_merge(records: &[Contact]) -> Vec<Contact> {
  Deduplicator::default().group_and_merge(records)
}
