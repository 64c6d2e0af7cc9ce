//! The reconciler: a sequential fold resolving identity collisions by
//! recency.
//!
//! A [`Reconciler`] owns two identity indexes kept in lockstep, `by_id`
//! and `by_email`, plus the ordered resolution log. Each incoming record
//! is resolved against the cumulative index state of all prior records,
//! which makes the fold inherently sequential: a later record can evict a
//! record that itself was the product of an earlier merge.
//!
//! All state is owned by one reconciliation run. Independent runs never
//! share anything, so reentrant use across runs is safe by construction.

use indexmap::IndexMap;

use crate::error::ValidationError;
use crate::event::ResolutionEvent;
use crate::record::Record;

/// What happened to one ingested record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No collision; the record joined the surviving set.
    Inserted,

    /// The record collided and won; the previous survivor was evicted.
    Replaced,

    /// The record collided and lost; the surviving set is unchanged.
    Retained,
}

/// The result of one reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// Surviving records, in index insertion/replacement order.
    pub leads: Vec<Record>,

    /// One event per collision, in input-arrival order.
    pub log: Vec<ResolutionEvent>,
}

/// Deduplicates a stream of lead records keyed by `id` and `email`.
///
/// # Examples
///
/// ```
/// use leadrec::{Record, Reconciler};
///
/// let mut older = Record::new();
/// older.insert("id", "1");
/// older.insert("email", "ada@example.com");
/// older.insert("entryDate", "2020-01-01");
///
/// let mut newer = older.clone();
/// newer.insert("entryDate", "2021-01-01");
///
/// let mut reconciler = Reconciler::new();
/// reconciler.ingest(older).unwrap();
/// reconciler.ingest(newer.clone()).unwrap();
///
/// let outcome = reconciler.finish();
/// assert_eq!(outcome.leads, vec![newer]);
/// assert_eq!(outcome.log.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Reconciler {
    by_id: IndexMap<String, Record>,
    by_email: IndexMap<String, Record>,
    log: Vec<ResolutionEvent>,
}

impl Reconciler {
    /// Creates a reconciler with empty indexes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves one incoming record against the current surviving set.
    ///
    /// A record colliding on neither key is inserted silently. A record
    /// colliding on either key is resolved by recency: it wins when its
    /// `entryDate` is newer than or equal to the existing survivor's
    /// (ties favor the later arrival), evicting the survivor under the
    /// survivor's own keys, which may differ from the incoming record's
    /// and thereby chain merges across both indexes. When both keys
    /// collide, the id match selects the survivor to compare against.
    ///
    /// # Errors
    ///
    /// Fails when the record's identity cannot be extracted. The caller
    /// must treat this as fatal for the batch; the indexes are unchanged
    /// by the failed call.
    pub fn ingest(&mut self, record: Record) -> Result<Disposition, ValidationError> {
        let identity = record.identity()?;

        let dup_id = self.by_id.contains_key(&identity.id);
        let dup_email = self.by_email.contains_key(&identity.email);

        if !dup_id && !dup_email {
            self.by_id.insert(identity.id, record.clone());
            self.by_email.insert(identity.email, record);
            return Ok(Disposition::Inserted);
        }

        let prev = if dup_id {
            self.by_id[&identity.id].clone()
        } else {
            self.by_email[&identity.email].clone()
        };
        let prev_identity = prev.identity()?;

        if identity.entry_date >= prev_identity.entry_date {
            self.log.push(ResolutionEvent::replaced(&prev, &record));

            // Evict under the survivor's own keys; shift_remove keeps the
            // index order of everything else, and the insert below appends,
            // so survivor order is insertion/replacement order.
            self.by_id.shift_remove(&prev_identity.id);
            self.by_email.shift_remove(&prev_identity.email);

            self.by_id.insert(identity.id, record.clone());
            self.by_email.insert(identity.email, record);
            Ok(Disposition::Replaced)
        } else {
            self.log.push(ResolutionEvent::retained(&record, &prev));
            Ok(Disposition::Retained)
        }
    }

    /// Iterates the current surviving records in index order.
    pub fn survivors(&self) -> impl Iterator<Item = &Record> {
        self.by_id.values()
    }

    /// Number of current survivors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if nothing has been ingested (or survived).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// The resolution events recorded so far, in arrival order.
    #[must_use]
    pub fn log(&self) -> &[ResolutionEvent] {
        &self.log
    }

    /// Consumes the reconciler, yielding survivors and log.
    #[must_use]
    pub fn finish(self) -> ReconcileOutcome {
        ReconcileOutcome {
            leads: self.by_id.into_values().collect(),
            log: self.log,
        }
    }
}

/// Reconciles an ordered batch of records in one pass.
///
/// # Errors
///
/// Fails on the first record whose identity cannot be extracted; no
/// partial output is produced.
pub fn reconcile<I>(records: I) -> Result<ReconcileOutcome, ValidationError>
where
    I: IntoIterator<Item = Record>,
{
    let mut reconciler = Reconciler::new();
    for record in records {
        reconciler.ingest(record)?;
    }
    Ok(reconciler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn lead(id: &str, email: &str, entry_date: &str) -> Record {
        let mut record = Record::new();
        record.insert("id", id);
        record.insert("email", email);
        record.insert("entryDate", entry_date);
        record
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<Record> = Vec::new();
        let outcome = reconcile(records).unwrap();
        assert!(outcome.leads.is_empty());
        assert!(outcome.log.is_empty());
    }

    #[test]
    fn test_single_record_is_sole_survivor() {
        let record = lead("1", "a@x.com", "2020-01-01");
        let outcome = reconcile([record.clone()]).unwrap();
        assert_eq!(outcome.leads, vec![record]);
        assert!(outcome.log.is_empty());
    }

    #[test]
    fn test_disjoint_identities_pass_through() {
        let batch = vec![
            lead("1", "a@x.com", "2020-01-01"),
            lead("2", "b@x.com", "2020-01-02"),
            lead("3", "c@x.com", "2020-01-03"),
        ];
        let outcome = reconcile(batch.clone()).unwrap();
        assert_eq!(outcome.leads, batch);
        assert!(outcome.log.is_empty());
    }

    #[test]
    fn test_newer_record_evicts_older_on_id() {
        let older = lead("1", "a@x.com", "2020-01-01");
        let newer = lead("1", "b@x.com", "2021-01-01");

        let outcome = reconcile([older.clone(), newer.clone()]).unwrap();
        assert_eq!(outcome.leads, vec![newer.clone()]);
        assert_eq!(outcome.log.len(), 1);
        assert_eq!(outcome.log[0].source_record, older);
        assert_eq!(outcome.log[0].output_record, newer);
    }

    #[test]
    fn test_older_record_loses_with_empty_diff() {
        let newer = lead("1", "a@x.com", "2021-01-01");
        let older = lead("1", "b@x.com", "2020-01-01");

        let outcome = reconcile([newer.clone(), older.clone()]).unwrap();
        assert_eq!(outcome.leads, vec![newer.clone()]);
        assert_eq!(outcome.log.len(), 1);
        assert_eq!(outcome.log[0].source_record, older);
        assert_eq!(outcome.log[0].output_record, newer);
        assert!(outcome.log[0].field_changes.is_empty());
    }

    #[test]
    fn test_equal_timestamps_favor_later_arrival() {
        let first = lead("1", "a@x.com", "2020-06-01T12:00:00");
        let mut second = lead("1", "a@x.com", "2020-06-01T12:00:00");
        second.insert("note", "arrived later");

        let outcome = reconcile([first, second.clone()]).unwrap();
        assert_eq!(outcome.leads, vec![second]);
        assert_eq!(outcome.log.len(), 1);
    }

    #[test]
    fn test_collision_on_email_alone() {
        let older = lead("1", "shared@x.com", "2020-01-01");
        let newer = lead("2", "shared@x.com", "2021-01-01");

        let outcome = reconcile([older, newer.clone()]).unwrap();
        assert_eq!(outcome.leads, vec![newer]);
    }

    #[test]
    fn test_eviction_removes_both_keys_of_loser() {
        // The evicted record's keys differ from the winner's on one axis;
        // both of its index entries must go.
        let mut reconciler = Reconciler::new();
        reconciler.ingest(lead("1", "a@x.com", "2020-01-01")).unwrap();
        reconciler.ingest(lead("1", "b@x.com", "2021-01-01")).unwrap();

        // "a@x.com" is free again: a record reusing it must not collide.
        let disposition = reconciler.ingest(lead("3", "a@x.com", "2019-01-01")).unwrap();
        assert_eq!(disposition, Disposition::Inserted);
        assert_eq!(reconciler.len(), 2);
    }

    #[test]
    fn test_replacement_moves_survivor_to_end_of_order() {
        let batch = vec![
            lead("1", "a@x.com", "2020-01-01"),
            lead("2", "b@x.com", "2020-01-01"),
            lead("1", "a@x.com", "2021-01-01"),
        ];
        let outcome = reconcile(batch).unwrap();
        let ids: Vec<&Value> = outcome.leads.iter().map(|r| r.get("id").unwrap()).collect();
        assert_eq!(ids, [&Value::from("2"), &Value::from("1")]);
    }

    #[test]
    fn test_dispositions() {
        let mut reconciler = Reconciler::new();
        assert_eq!(
            reconciler.ingest(lead("1", "a@x.com", "2020-01-01")).unwrap(),
            Disposition::Inserted
        );
        assert_eq!(
            reconciler.ingest(lead("1", "a@x.com", "2021-01-01")).unwrap(),
            Disposition::Replaced
        );
        assert_eq!(
            reconciler.ingest(lead("1", "a@x.com", "2019-01-01")).unwrap(),
            Disposition::Retained
        );
        assert_eq!(reconciler.log().len(), 2);
    }

    #[test]
    fn test_malformed_record_aborts_batch() {
        let mut bad = Record::new();
        bad.insert("id", "2");
        bad.insert("entryDate", "2020-01-01");

        let result = reconcile([lead("1", "a@x.com", "2020-01-01"), bad]);
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_ingest_leaves_indexes_unchanged() {
        let mut reconciler = Reconciler::new();
        reconciler.ingest(lead("1", "a@x.com", "2020-01-01")).unwrap();

        let mut bad = lead("2", "b@x.com", "2020-01-01");
        bad.insert("entryDate", "not a date");
        assert!(reconciler.ingest(bad).is_err());

        assert_eq!(reconciler.len(), 1);
        assert!(reconciler.log().is_empty());
    }
}
