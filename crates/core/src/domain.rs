use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::moderation::PlatformActions;

/// A single social-media comment, the unit of work for the pipeline.
///
/// Transient: exists only for the duration of one `process` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment(pub String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five recognized engagement categories.
///
/// Any other label coming back from the model is rejected as a `Parse`
/// failure; there is no fallback category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Lead,
    Praise,
    Spam,
    Question,
    Complaint,
}

impl Category {
    pub const ALL: [Category; 5] =
        [Self::Lead, Self::Praise, Self::Spam, Self::Question, Self::Complaint];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Praise => "praise",
            Self::Spam => "spam",
            Self::Question => "question",
            Self::Complaint => "complaint",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lead" => Ok(Self::Lead),
            "praise" => Ok(Self::Praise),
            "spam" => Ok(Self::Spam),
            "question" => Ok(Self::Question),
            "complaint" => Ok(Self::Complaint),
            other => Err(EngineError::parse(format!(
                "unrecognized category label `{other}` (expected lead|praise|spam|question|complaint)"
            ))),
        }
    }
}

/// Immutable output of one classification call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub reply: String,
    pub category: Category,
}

/// Contact details forwarded to the CRM.
///
/// The contact record itself is owned by the external CRM; replyr reads and
/// writes it via API calls and never keeps a copy beyond the current
/// request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactProfile {
    /// Email address or platform handle used for the CRM upsert.
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ContactProfile {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), display_name: None, metadata: BTreeMap::new() }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Outcome of the CRM leg of a `process` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmStatus {
    Skipped,
    Success,
    Failed,
}

impl CrmStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

/// Combined result returned to callers of `process`.
///
/// A CRM failure is reflected only in `crm_status`; the reply and category
/// are always present when this struct exists at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementOutcome {
    pub reply: String,
    pub category: Category,
    pub crm_status: CrmStatus,
    pub actions: PlatformActions,
}

impl EngagementOutcome {
    pub fn new(result: ClassificationResult, crm_status: CrmStatus) -> Self {
        let actions = PlatformActions::for_category(result.category);
        Self { reply: result.reply, category: result.category, crm_status, actions }
    }
}
