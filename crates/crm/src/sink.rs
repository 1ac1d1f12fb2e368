use async_trait::async_trait;
use serde::Serialize;

use replyr_core::{Category, ContactProfile, EngineError};

/// What the sink actually did for one recorded comment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SyncReceipt {
    pub synced: bool,
    pub contact_id: Option<String>,
    pub tags_added: Vec<String>,
    pub workflow_triggered: bool,
}

impl SyncReceipt {
    /// Receipt for a sink that deliberately did nothing.
    pub fn skipped() -> Self {
        Self::default()
    }
}

/// Capability interface for pushing categorized contacts into a CRM.
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Upsert the contact and record the category against it.
    ///
    /// Implementations perform their steps in order and stop at the first
    /// failure; completed steps are not rolled back.
    async fn record(
        &self,
        contact: &ContactProfile,
        category: Category,
    ) -> Result<SyncReceipt, EngineError>;
}

/// Default sink used when no CRM credential is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLeadSink;

#[async_trait]
impl LeadSink for NoopLeadSink {
    async fn record(
        &self,
        _contact: &ContactProfile,
        _category: Category,
    ) -> Result<SyncReceipt, EngineError> {
        Ok(SyncReceipt::skipped())
    }
}
