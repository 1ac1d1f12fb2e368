use replyr_core::Category;

/// Tags assigned to a contact for one processed comment.
///
/// Every contact gets the shared `social-comment` tag plus a per-category
/// tag, so CRM segments can filter either by source or by intent.
pub fn tags_for(category: Category) -> Vec<String> {
    vec!["social-comment".to_string(), format!("comment-{}", category.as_str())]
}
