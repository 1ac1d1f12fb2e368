//! Prompt construction for the classification call.
//!
//! Pure and side-effect free: validation plus string assembly.

use replyr_core::{Comment, EngineError};

const SYSTEM_PROMPT: &str = "You are the social media manager for a business account. \
You triage public comments and draft short, friendly, on-brand replies.";

const INSTRUCTION_BLOCK: &str = "\
Classify the comment below into exactly one category and draft a short public reply.

Categories:
- lead: expresses buying interest or asks how to purchase
- praise: a compliment about the product, service, or brand
- spam: promotional junk, scams, or link bait
- question: asks about products, hours, shipping, or policies
- complaint: reports a bad experience or an unresolved problem

Respond with a single JSON object and nothing else:
{\"reply\": \"<public reply text>\", \"category\": \"<lead|praise|spam|question|complaint>\"}";

/// System and user halves of one completion request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

#[derive(Clone, Debug)]
pub struct PromptBuilder {
    max_comment_chars: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self { max_comment_chars: 2000 }
    }
}

impl PromptBuilder {
    pub fn new(max_comment_chars: usize) -> Self {
        Self { max_comment_chars }
    }

    /// Build the request payload for one comment.
    ///
    /// Rejects empty (after trimming) and oversized comments before any
    /// network traffic happens.
    pub fn build(&self, comment: &Comment) -> Result<ChatPrompt, EngineError> {
        let text = comment.as_str();
        if text.trim().is_empty() {
            return Err(EngineError::invalid_input("comment is empty"));
        }

        let length = text.chars().count();
        if length > self.max_comment_chars {
            return Err(EngineError::invalid_input(format!(
                "comment is {length} characters long (limit {})",
                self.max_comment_chars
            )));
        }

        Ok(ChatPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user: format!("{INSTRUCTION_BLOCK}\n\nComment:\n{text}"),
        })
    }
}
