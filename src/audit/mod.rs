//! Audit logging for expense-control
//!
//! Every create, update and delete performed through the services is
//! appended to `audit.log` as one JSON object per line (JSONL), with
//! before/after snapshots of the entity and a short change summary.
//!
//! - `AuditEntry`: one logged operation.
//! - `AuditLogger`: appends entries and reads them back.
//! - `generate_diff`: top-level field changes between two snapshots.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
