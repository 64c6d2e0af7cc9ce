//! Lead records and identity extraction.
//!
//! A [`Record`] is an insertion-ordered mapping from field name to
//! [`Value`]. The schema is open: any field may appear and is preserved
//! verbatim through reconciliation and output. Only three fields carry
//! meaning for the engine: the two identity keys and the recency
//! timestamp. Those are pulled out once per record as an
//! [`Identity`].

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time;
use crate::value::Value;

/// Field holding identity key 1 (stable per entity).
pub const ID_FIELD: &str = "id";

/// Field holding identity key 2 (stable per entity).
pub const EMAIL_FIELD: &str = "email";

/// Field holding the ISO-8601 recency tie-breaker.
pub const ENTRY_DATE_FIELD: &str = "entryDate";

/// A single lead record.
///
/// Records are immutable once ingested: resolution selects which record
/// survives, it never rewrites one. Field order is the order fields
/// appeared in the source document and survives serialization.
///
/// # Examples
///
/// ```
/// use leadrec::{Record, Value};
///
/// let mut record = Record::new();
/// record.insert("id", "lead-1");
/// record.insert("email", "ada@example.com");
/// record.insert("entryDate", "2014-05-07T17:30:20+00:00");
///
/// let identity = record.identity().unwrap();
/// assert_eq!(identity.id, "lead-1");
/// assert_eq!(identity.email, "ada@example.com");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value if the field existed.
    ///
    /// An existing field keeps its position; a new field appends.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns true if the field is present (even with a null value).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Extracts the identity triple this record is reconciled under.
    ///
    /// # Errors
    ///
    /// Fails when `id` or `email` is missing, empty, or not a scalar, or
    /// when `entryDate` is missing, not a string, or unparseable. Any such
    /// failure is fatal for the batch the record belongs to.
    pub fn identity(&self) -> Result<Identity, ValidationError> {
        Ok(Identity {
            id: self.require_key(ID_FIELD)?,
            email: self.require_key(EMAIL_FIELD)?,
            entry_date: self.entry_date()?,
        })
    }

    /// Parses the record's `entryDate` field.
    ///
    /// # Errors
    ///
    /// Fails when the field is missing, not a string, or unparseable.
    pub fn entry_date(&self) -> Result<DateTime<Utc>, ValidationError> {
        let value = self
            .get(ENTRY_DATE_FIELD)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ValidationError::MissingField {
                field: ENTRY_DATE_FIELD.to_string(),
            })?;
        let raw = value.as_str().ok_or_else(|| ValidationError::InvalidFieldType {
            field: ENTRY_DATE_FIELD.to_string(),
            expected: "string",
        })?;
        time::parse_iso8601(raw).ok_or_else(|| ValidationError::InvalidTimestamp {
            field: ENTRY_DATE_FIELD.to_string(),
            value: raw.to_string(),
        })
    }

    /// Resolves an identity field to its index key.
    ///
    /// A null value counts as missing. Scalar values key on their
    /// canonical string form; empty strings are rejected.
    fn require_key(&self, field: &'static str) -> Result<String, ValidationError> {
        let value = self
            .get(field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ValidationError::MissingField {
                field: field.to_string(),
            })?;

        if let Some(s) = value.as_str() {
            if s.trim().is_empty() {
                return Err(ValidationError::EmptyField {
                    field: field.to_string(),
                });
            }
        }

        value
            .as_key()
            .ok_or_else(|| ValidationError::InvalidFieldType {
                field: field.to_string(),
                expected: "scalar",
            })
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// The identity triple a record is reconciled under.
///
/// Extracted once per record at ingest so the reconciler compares parsed
/// timestamps, never raw strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Index key derived from the `id` field.
    pub id: String,

    /// Index key derived from the `email` field.
    pub email: String,

    /// Parsed `entryDate`, the recency tie-breaker.
    pub entry_date: DateTime<Utc>,
}
