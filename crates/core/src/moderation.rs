//! Per-category moderation hints for the hosting platform.
//!
//! These are recommendations only; replyr never calls platform moderation
//! APIs itself.

use serde::{Deserialize, Serialize};

use crate::domain::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Normal,
    High,
    Urgent,
}

/// Recommended platform-side handling for a classified comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformActions {
    pub pin_comment: bool,
    pub hide_comment: bool,
    pub flag_urgent: bool,
    pub auto_reply: bool,
    pub priority: PriorityLevel,
}

impl PlatformActions {
    pub fn for_category(category: Category) -> Self {
        let mut actions = Self {
            pin_comment: false,
            hide_comment: false,
            flag_urgent: false,
            auto_reply: true,
            priority: PriorityLevel::Normal,
        };

        match category {
            Category::Lead => {
                actions.pin_comment = true;
                actions.priority = PriorityLevel::High;
            }
            Category::Spam => {
                actions.hide_comment = true;
                actions.auto_reply = false;
            }
            Category::Complaint => {
                actions.flag_urgent = true;
                actions.priority = PriorityLevel::Urgent;
            }
            Category::Praise | Category::Question => {}
        }

        actions
    }
}
