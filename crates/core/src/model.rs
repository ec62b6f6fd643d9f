use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level grouping of help topics, loaded from the base JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// One help article: an ordered list of steps under a category.
///
/// Topic slugs are unique within their category; the merger appends a numeric
/// suffix on collision. A missing `order` sorts after every explicit order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One actionable unit within a topic. Steps carry no identifier of their
/// own; they are addressed by (category slug, topic slug, zero-based index).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub action_type: ActionType,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    Checklist,
    Diagnosis,
    Contact,
    Link,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Checklist => "checklist",
            ActionType::Diagnosis => "diagnosis",
            ActionType::Contact => "contact",
            ActionType::Link => "link",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkInfo {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Parses the base content document. A JSON `null` body counts as an empty
/// category list; anything else that is not a category sequence is an error.
pub fn parse_categories(raw: &str) -> Result<Vec<Category>> {
    let parsed: Option<Vec<Category>> = serde_json::from_str(raw)?;
    Ok(parsed.unwrap_or_default())
}

pub fn find_category<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    categories.iter().find(|category| category.slug == slug)
}

pub fn find_topic<'a>(category: &'a Category, topic_slug: &str) -> Option<&'a Topic> {
    category.topics.iter().find(|topic| topic.slug == topic_slug)
}
