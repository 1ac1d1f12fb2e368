//! CRM lead sync for classified comments.
//!
//! The pipeline hands `(contact, category)` pairs to a [`LeadSink`]. The
//! production sink talks to a GoHighLevel-style REST API; the no-op sink
//! stands in whenever no CRM credential is configured. The sink is an
//! independently failing collaborator: the orchestrator treats its errors
//! as a status downgrade, never as a pipeline failure.

pub mod highlevel;
pub mod sink;
pub mod tags;

pub use highlevel::HighLevelLeadSink;
pub use sink::{LeadSink, NoopLeadSink, SyncReceipt};
pub use tags::tags_for;
