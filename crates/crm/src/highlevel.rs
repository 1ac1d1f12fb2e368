//! GoHighLevel-style REST adapter.
//!
//! One recorded comment turns into up to three independent calls: contact
//! upsert, tag assignment, optional workflow trigger. A failure after the
//! upsert leaves the created contact in place; there is no rollback, and
//! the partial state is reported as an upstream failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use replyr_core::config::CrmConfig;
use replyr_core::{Category, ContactProfile, EngineError, UpstreamService};

use crate::sink::{LeadSink, SyncReceipt};
use crate::tags::tags_for;

pub struct HighLevelLeadSink {
    client: Client,
    api_key: SecretString,
    base_url: String,
    location_id: Option<String>,
    lead_workflow_id: Option<String>,
}

impl HighLevelLeadSink {
    /// Build the sink from configuration; `None` when no credential is set.
    pub fn from_config(config: &CrmConfig) -> Result<Option<Self>, reqwest::Error> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client =
            Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Some(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            location_id: config.location_id.clone(),
            lead_workflow_id: config.lead_workflow_id.clone(),
        }))
    }

    async fn post_json(&self, url: &str, payload: &Value, op: &str) -> Result<Value, EngineError> {
        debug!(url, op, "crm request");
        let response = self
            .client
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(payload)
            .send()
            .await
            .map_err(|error| {
                EngineError::upstream(UpstreamService::Crm, format!("{op} request failed: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::upstream(
                UpstreamService::Crm,
                format!("{op} returned {status}"),
            ));
        }

        // Tag and workflow endpoints answer with empty or ad hoc bodies.
        Ok(response.json::<Value>().await.unwrap_or(Value::Null))
    }
}

fn upsert_payload(contact: &ContactProfile, location_id: Option<&str>) -> Value {
    let mut payload = serde_json::Map::new();

    // "@handle" is a platform handle, not an address.
    let is_email = contact.identifier.contains('@') && !contact.identifier.starts_with('@');
    if is_email {
        payload.insert("email".to_string(), json!(contact.identifier));
    } else {
        payload.insert("name".to_string(), json!(contact.identifier));
    }
    if let Some(name) = &contact.display_name {
        payload.insert("name".to_string(), json!(name));
    }
    if let Some(location_id) = location_id {
        payload.insert("locationId".to_string(), json!(location_id));
    }
    if !contact.metadata.is_empty() {
        payload.insert("customField".to_string(), json!(contact.metadata));
    }
    payload.insert("source".to_string(), json!("replyr"));

    Value::Object(payload)
}

#[derive(Debug, Deserialize)]
struct ContactEnvelope {
    contact: ContactBody,
}

#[derive(Debug, Deserialize)]
struct ContactBody {
    id: String,
}

/// The three CRM operations, kept behind a seam so the sequencing can be
/// exercised without a live endpoint.
#[async_trait]
trait ContactOps {
    async fn upsert_contact(&self, contact: &ContactProfile) -> Result<String, EngineError>;
    async fn assign_tags(&self, contact_id: &str, tags: &[String]) -> Result<(), EngineError>;
    async fn trigger_workflow(&self, contact_id: &str, workflow_id: &str)
        -> Result<(), EngineError>;
}

#[async_trait]
impl ContactOps for HighLevelLeadSink {
    async fn upsert_contact(&self, contact: &ContactProfile) -> Result<String, EngineError> {
        let url = format!("{}/contacts/", self.base_url);
        let payload = upsert_payload(contact, self.location_id.as_deref());
        let body = self.post_json(&url, &payload, "contact upsert").await?;

        let envelope: ContactEnvelope = serde_json::from_value(body).map_err(|error| {
            EngineError::upstream(
                UpstreamService::Crm,
                format!("failed to decode contact upsert response: {error}"),
            )
        })?;
        Ok(envelope.contact.id)
    }

    async fn assign_tags(&self, contact_id: &str, tags: &[String]) -> Result<(), EngineError> {
        let url = format!("{}/contacts/{}/tags/", self.base_url, contact_id);
        self.post_json(&url, &json!({ "tags": tags }), "tag assignment").await?;
        Ok(())
    }

    async fn trigger_workflow(
        &self,
        contact_id: &str,
        workflow_id: &str,
    ) -> Result<(), EngineError> {
        let url = format!("{}/contacts/{}/workflow/{}", self.base_url, contact_id, workflow_id);
        self.post_json(&url, &json!({}), "workflow trigger").await?;
        Ok(())
    }
}

async fn run_sync(
    ops: &impl ContactOps,
    lead_workflow_id: Option<&str>,
    contact: &ContactProfile,
    category: Category,
) -> Result<SyncReceipt, EngineError> {
    let contact_id = ops.upsert_contact(contact).await?;

    let tags = tags_for(category);
    ops.assign_tags(&contact_id, &tags).await?;

    let workflow_triggered = match (category, lead_workflow_id) {
        (Category::Lead, Some(workflow_id)) => {
            ops.trigger_workflow(&contact_id, workflow_id).await?;
            true
        }
        _ => false,
    };

    Ok(SyncReceipt {
        synced: true,
        contact_id: Some(contact_id),
        tags_added: tags,
        workflow_triggered,
    })
}

#[async_trait]
impl LeadSink for HighLevelLeadSink {
    async fn record(
        &self,
        contact: &ContactProfile,
        category: Category,
    ) -> Result<SyncReceipt, EngineError> {
        let receipt =
            run_sync(self, self.lead_workflow_id.as_deref(), contact, category).await?;
        info!(
            contact_id = receipt.contact_id.as_deref().unwrap_or("unknown"),
            category = %category,
            workflow_triggered = receipt.workflow_triggered,
            "crm lead sync completed"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use replyr_core::{Category, ContactProfile, EngineError, UpstreamService};

    use super::{run_sync, upsert_payload, ContactOps};

    #[derive(Default)]
    struct RecordingOps {
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingOps {
        fn failing_at(step: &'static str) -> Self {
            Self { calls: Mutex::new(Vec::new()), fail_on: Some(step) }
        }

        fn log(&self, step: &str) -> Result<(), EngineError> {
            self.calls.lock().expect("lock").push(step.to_string());
            if self.fail_on == Some(step) {
                return Err(EngineError::upstream(UpstreamService::Crm, format!("{step} failed")));
            }
            Ok(())
        }

        fn recorded(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl ContactOps for RecordingOps {
        async fn upsert_contact(&self, _contact: &ContactProfile) -> Result<String, EngineError> {
            self.log("upsert")?;
            Ok("contact-1".to_string())
        }

        async fn assign_tags(&self, _contact_id: &str, _tags: &[String]) -> Result<(), EngineError> {
            self.log("tags")
        }

        async fn trigger_workflow(
            &self,
            _contact_id: &str,
            _workflow_id: &str,
        ) -> Result<(), EngineError> {
            self.log("workflow")
        }
    }

    #[tokio::test]
    async fn lead_with_workflow_runs_all_three_steps_in_order() {
        let ops = RecordingOps::default();
        let receipt =
            run_sync(&ops, Some("wf-1"), &ContactProfile::new("jane@example.com"), Category::Lead)
                .await
                .expect("sync should succeed");

        assert_eq!(ops.recorded(), ["upsert", "tags", "workflow"]);
        assert!(receipt.synced);
        assert!(receipt.workflow_triggered);
        assert_eq!(receipt.contact_id.as_deref(), Some("contact-1"));
        assert_eq!(receipt.tags_added, ["social-comment", "comment-lead"]);
    }

    #[tokio::test]
    async fn non_lead_categories_never_trigger_the_workflow() {
        for category in [Category::Praise, Category::Spam, Category::Question, Category::Complaint]
        {
            let ops = RecordingOps::default();
            let receipt = run_sync(&ops, Some("wf-1"), &ContactProfile::new("sam"), category)
                .await
                .expect("sync should succeed");

            assert_eq!(ops.recorded(), ["upsert", "tags"]);
            assert!(!receipt.workflow_triggered);
        }
    }

    #[tokio::test]
    async fn lead_without_configured_workflow_only_tags() {
        let ops = RecordingOps::default();
        let receipt = run_sync(&ops, None, &ContactProfile::new("jane"), Category::Lead)
            .await
            .expect("sync should succeed");

        assert_eq!(ops.recorded(), ["upsert", "tags"]);
        assert!(!receipt.workflow_triggered);
    }

    #[tokio::test]
    async fn tag_failure_stops_the_sequence_but_not_before_the_upsert() {
        let ops = RecordingOps::failing_at("tags");
        let error = run_sync(&ops, Some("wf-1"), &ContactProfile::new("jane"), Category::Lead)
            .await
            .expect_err("tag failure must surface");

        // The upsert already happened and stays; no rollback step exists.
        assert_eq!(ops.recorded(), ["upsert", "tags"]);
        assert!(matches!(error, EngineError::Upstream { service: UpstreamService::Crm, .. }));
    }

    #[test]
    fn upsert_payload_uses_email_for_addresses_and_name_otherwise() {
        let by_email = upsert_payload(&ContactProfile::new("jane@example.com"), None);
        assert_eq!(by_email["email"], "jane@example.com");
        assert!(by_email.get("name").is_none());

        let by_handle = upsert_payload(&ContactProfile::new("@jane_doe"), Some("loc-1"));
        assert_eq!(by_handle["name"], "@jane_doe");
        assert_eq!(by_handle["locationId"], "loc-1");
        assert!(by_handle.get("email").is_none());
    }

    #[test]
    fn upsert_payload_carries_metadata_as_custom_fields() {
        let contact = ContactProfile::new("jane@example.com")
            .with_display_name("Jane Doe")
            .with_metadata("platform", "instagram");
        let payload = upsert_payload(&contact, None);

        assert_eq!(payload["name"], "Jane Doe");
        assert_eq!(payload["customField"]["platform"], "instagram");
        assert_eq!(payload["source"], "replyr");
    }
}
