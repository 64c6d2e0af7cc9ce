//! Resolution events: the audit trail of merge decisions.
//!
//! Every collision produces exactly one [`ResolutionEvent`], appended in
//! input-arrival order. Events are serializable objects rather than log
//! lines, so the audit trail can be written alongside the survivor set and
//! inspected after the run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

/// A single field's before/after pair in a merge decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// The discarded record's value, `Null` when the field was absent.
    pub from: Value,

    /// The surviving record's value, `Null` when the field was absent.
    pub to: Value,
}

/// One entry in the resolution log.
///
/// `source_record` is the record that lost the collision and
/// `output_record` the one that survived it. `field_changes` explains the
/// decision field by field; it is always empty when the incoming record
/// lost, since nothing in the surviving set changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionEvent {
    /// The discarded record.
    pub source_record: Record,

    /// The surviving record.
    pub output_record: Record,

    /// Per-field differences between the two, keyed by field name.
    pub field_changes: IndexMap<String, FieldChange>,
}

impl ResolutionEvent {
    /// Event for a collision the incoming record won: `prev` is evicted
    /// and the diff records every field that changed.
    #[must_use]
    pub fn replaced(prev: &Record, curr: &Record) -> Self {
        Self {
            source_record: prev.clone(),
            output_record: curr.clone(),
            field_changes: Self::field_diff(prev, curr),
        }
    }

    /// Event for a collision the incoming record lost. The diff is empty
    /// in this branch even when fields differ.
    #[must_use]
    pub fn retained(curr: &Record, prev: &Record) -> Self {
        Self {
            source_record: curr.clone(),
            output_record: prev.clone(),
            field_changes: IndexMap::new(),
        }
    }

    /// Computes the field-level diff between a discarded and a surviving
    /// record.
    ///
    /// Covers every field present in either record whose values differ; a
    /// field absent on one side compares as `Null`. Order is
    /// deterministic: the discarded record's fields first, then fields
    /// only the survivor has.
    #[must_use]
    pub fn field_diff(prev: &Record, curr: &Record) -> IndexMap<String, FieldChange> {
        let mut changes = IndexMap::new();

        for (name, from) in prev.iter() {
            let to = curr.get(name).cloned().unwrap_or(Value::Null);
            if *from != to {
                changes.insert(
                    name.to_string(),
                    FieldChange {
                        from: from.clone(),
                        to,
                    },
                );
            }
        }

        for (name, to) in curr.iter() {
            if prev.contains(name) || to.is_null() {
                continue;
            }
            changes.insert(
                name.to_string(),
                FieldChange {
                    from: Value::Null,
                    to: to.clone(),
                },
            );
        }

        changes
    }
}
