//! # Leadrec - Recency-Based Lead Deduplication
//!
//! Leadrec deduplicates a batch of "lead" records (contact entries) keyed
//! by two independent identity fields (`id` and `email`), resolving every
//! collision by recency and recording a field-level audit trail of each
//! decision.
//!
//! ## Core Concepts
//!
//! - **Record**: an open-schema lead with `id`, `email`, and `entryDate`
//!   plus any number of extra fields, preserved verbatim
//! - **Reconciler**: the sequential fold that keeps two identity indexes
//!   in lockstep and decides which record survives each collision
//! - **ResolutionEvent**: one audit entry per collision, with a per-field
//!   diff when the incoming record won
//!
//! ## Usage
//!
//! ```rust,ignore
//! use leadrec::{reconcile, LeadsDocument};
//!
//! let document = LeadsDocument::load("leads.json")?;
//! let outcome = reconcile(document.leads)?;
//!
//! LeadsDocument::new(outcome.leads).save("leads_output.json")?;
//! leadrec::document::save_log("leads_output_logs.json", &outcome.log)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod error;
pub mod event;
pub mod reconcile;
pub mod record;
pub mod time;
pub mod value;

// Re-export primary types at crate root for convenience
pub use document::LeadsDocument;
pub use error::{DedupeError, DedupeResult, ValidationError};
pub use event::{FieldChange, ResolutionEvent};
pub use reconcile::{reconcile, Disposition, ReconcileOutcome, Reconciler};
pub use record::{Identity, Record, EMAIL_FIELD, ENTRY_DATE_FIELD, ID_FIELD};
pub use value::Value;
