use thiserror::Error;

/// External API a failed call was addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpstreamService {
    Model,
    Crm,
}

impl UpstreamService {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Crm => "crm",
        }
    }
}

impl std::fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure kinds of the comment pipeline.
///
/// `InvalidInput` and `Parse` abort a `process` call and surface to the
/// caller unchanged. `Upstream` aborts only when raised by the model call;
/// the orchestrator downgrades a CRM `Upstream` failure to
/// `CrmStatus::Failed` instead of failing the call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid comment input: {0}")]
    InvalidInput(String),
    #[error("{service} API call failed: {detail}")]
    Upstream { service: UpstreamService, detail: String },
    #[error("model response did not match the expected shape: {0}")]
    Parse(String),
}

impl EngineError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn upstream(service: UpstreamService, detail: impl Into<String>) -> Self {
        Self::Upstream { service, detail: detail.into() }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Message safe to show to end users; detail stays in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => {
                "The comment could not be processed. Check the input and try again."
            }
            Self::Upstream { .. } => {
                "An upstream service is temporarily unavailable. Please retry shortly."
            }
            Self::Parse(_) => "The language model returned an unusable response. Please retry.",
        }
    }
}
