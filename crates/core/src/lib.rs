//! Core domain model and configuration for replyr.
//!
//! Everything here is deterministic and free of I/O: the comment and
//! category types flowing through the pipeline, the shared failure
//! taxonomy, per-category moderation hints, and the layered application
//! configuration (defaults -> `replyr.toml` -> `REPLYR_*` env -> explicit
//! overrides).

pub mod config;
pub mod domain;
pub mod errors;
pub mod moderation;

pub use domain::{
    Category, ClassificationResult, Comment, ContactProfile, CrmStatus, EngagementOutcome,
};
pub use errors::{EngineError, UpstreamService};
pub use moderation::{PlatformActions, PriorityLevel};
