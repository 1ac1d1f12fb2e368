//! Comment pipeline - LLM-backed classification and reply drafting
//!
//! This crate is the working half of replyr: it turns a raw social-media
//! comment into a drafted reply plus a category label, and hands
//! categorized contacts to the CRM sink.
//!
//! # Architecture
//!
//! The pipeline is a fixed linear sequence, no retries, no queues:
//! 1. **Prompt construction** (`prompt`) - validate the comment, build the
//!    instruction block
//! 2. **Model call** (`llm`, `openai`) - one chat completion per comment
//! 3. **Strict parse** (`classifier`) - completion -> `ClassificationResult`,
//!    unknown labels rejected
//! 4. **Lead sync** (`runtime`) - optional CRM hand-off, failures isolated
//!
//! # Key Types
//!
//! - `EngagementRuntime` - main orchestrator (see `runtime` module)
//! - `Classifier` - capability trait; swap in a stub without touching the
//!   orchestrator
//! - `LlmClient` - pluggable completion transport
//!
//! # Isolation Principle
//!
//! Classification value is never discarded because an unrelated
//! integration failed: a CRM error surfaces as `crm_status: failed` on an
//! otherwise successful outcome.

pub mod classifier;
pub mod llm;
pub mod openai;
pub mod prompt;
pub mod runtime;

pub use classifier::{Classifier, LlmClassifier};
pub use llm::{CompletionRequest, LlmClient};
pub use openai::OpenAiChatClient;
pub use prompt::{ChatPrompt, PromptBuilder};
pub use runtime::EngagementRuntime;
