//! Pipeline orchestration.
//!
//! One `process` call is a fixed linear sequence: classify, then optionally
//! hand the contact to the CRM sink. The two legs fail independently: a
//! model failure aborts the call before any CRM traffic, while a CRM
//! failure is downgraded to `CrmStatus::Failed` on an otherwise successful
//! outcome.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tracing::{info, warn};

use replyr_core::config::AppConfig;
use replyr_core::{Comment, ContactProfile, CrmStatus, EngagementOutcome, EngineError};
use replyr_crm::{HighLevelLeadSink, LeadSink, NoopLeadSink};

use crate::classifier::{Classifier, LlmClassifier};
use crate::openai::OpenAiChatClient;
use crate::prompt::PromptBuilder;

pub struct EngagementRuntime {
    classifier: Arc<dyn Classifier>,
    lead_sink: Arc<dyn LeadSink>,
}

impl EngagementRuntime {
    pub fn new(classifier: Arc<dyn Classifier>, lead_sink: Arc<dyn LeadSink>) -> Self {
        Self { classifier, lead_sink }
    }

    /// Wire the production adapters from configuration.
    ///
    /// The CRM sink degrades to a no-op when no credential is configured;
    /// the model credential is mandatory.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let api_key = config.llm.api_key.clone().context("llm.api_key is required")?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .context("failed to build model HTTP client")?;
        let model_client = OpenAiChatClient::new(
            http,
            api_key,
            config.llm.base_url.clone(),
            config.llm.model.clone(),
        );
        let classifier = LlmClassifier::new(
            model_client,
            PromptBuilder::new(config.engagement.max_comment_chars),
        );

        let lead_sink: Arc<dyn LeadSink> = match HighLevelLeadSink::from_config(&config.crm)
            .context("failed to build crm HTTP client")?
        {
            Some(sink) => Arc::new(sink),
            None => Arc::new(NoopLeadSink),
        };

        Ok(Self::new(Arc::new(classifier), lead_sink))
    }

    /// Process one comment, optionally syncing the contact to the CRM.
    pub async fn process(
        &self,
        comment: &str,
        contact: Option<&ContactProfile>,
    ) -> Result<EngagementOutcome, EngineError> {
        let comment = Comment::new(comment);
        let result = self.classifier.classify(&comment).await?;
        info!(category = %result.category, "comment classified");

        let crm_status = match contact {
            None => CrmStatus::Skipped,
            Some(profile) => match self.lead_sink.record(profile, result.category).await {
                Ok(receipt) if receipt.synced => CrmStatus::Success,
                Ok(_) => CrmStatus::Skipped,
                Err(error) => {
                    warn!(
                        error = %error,
                        identifier = %profile.identifier,
                        "crm lead sync failed; keeping classification result"
                    );
                    CrmStatus::Failed
                }
            },
        };

        Ok(EngagementOutcome::new(result, crm_status))
    }

    /// Process comments one at a time, capturing failures per item.
    pub async fn process_batch(
        &self,
        items: &[(String, Option<ContactProfile>)],
    ) -> Vec<Result<EngagementOutcome, EngineError>> {
        let mut results = Vec::with_capacity(items.len());
        for (comment, contact) in items {
            results.push(self.process(comment, contact.as_ref()).await);
        }
        results
    }
}
