use serde::Deserialize;
use serde_json::Value;

use crate::errors::ApiError;

// ----------------- Article Requests -----------------

// `tags` and `is_published` stay as raw JSON values here: clients send them
// as strings, booleans, or arrays, and the normalization rules differ
// between create and update.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Value>,
    pub is_published: Option<Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Value>,
    pub is_published: Option<Value>,
}

/// A create request after validation, ready to insert as-is.
#[derive(Debug)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub is_published: bool,
}

impl CreateArticleRequest {
    /// Checks fields in order (title, content, tags); the first failure wins
    /// and nothing reaches the database.
    pub fn validate(self) -> Result<NewArticle, ApiError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(ApiError::BadRequest("Title is required")),
        };
        let content = match self.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Err(ApiError::BadRequest("Content is required")),
        };
        // A missing tags field fails here too: create has no default for it.
        let tags = match TagsField::from_value(self.tags.as_ref()) {
            TagsField::JsonText(text) => parse_tags_json(&text)
                .ok_or(ApiError::BadRequest("Tags must be valid JSON array"))?,
            TagsField::Native(tags) => tags,
            TagsField::Absent | TagsField::Empty | TagsField::Invalid => {
                return Err(ApiError::BadRequest("Tags must be valid JSON array"))
            }
        };
        let author = match self.author {
            Some(author) if !author.is_empty() => author,
            _ => "Anonymous".to_string(),
        };
        Ok(NewArticle {
            title,
            content,
            author,
            tags,
            is_published: is_published_true(self.is_published.as_ref()),
        })
    }
}

// ----------------- Field Normalization -----------------

/// The shapes a `tags` field can arrive in. Classified once, then resolved
/// per operation, since create and update disagree on several of them.
#[derive(Debug)]
pub enum TagsField {
    Absent,
    Empty,
    JsonText(String),
    Native(Vec<String>),
    Invalid,
}

impl TagsField {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => TagsField::Absent,
            Some(Value::String(text)) if text.trim().is_empty() => TagsField::Empty,
            Some(Value::String(text)) => TagsField::JsonText(text.clone()),
            Some(Value::Array(items)) => TagsField::Native(items.iter().map(tag_text).collect()),
            Some(_) => TagsField::Invalid,
        }
    }

    /// Update-side resolution: `None` means the field was absent and the
    /// stored value stays untouched; an empty string clears the tags.
    pub fn resolve_for_update(self) -> Result<Option<Vec<String>>, ApiError> {
        match self {
            TagsField::Absent => Ok(None),
            TagsField::Empty => Ok(Some(Vec::new())),
            TagsField::JsonText(text) => parse_tags_json(&text).map(Some).ok_or(
                ApiError::BadRequest("Tags must be a valid JSON array or empty string"),
            ),
            TagsField::Native(tags) => Ok(Some(tags)),
            TagsField::Invalid => Err(ApiError::BadRequest(
                "Tags must be an array or stringified array",
            )),
        }
    }
}

fn parse_tags_json(text: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Some(items.iter().map(tag_text).collect()),
        _ => None,
    }
}

// Non-string elements keep their JSON rendering, matching the text coercion
// the database applies to mixed-type array literals.
fn tag_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// True only for the literal boolean `true` or the string `"true"`.
pub fn is_published_true(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text == "true",
        _ => false,
    }
}
