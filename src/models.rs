use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_date: DateTime<Utc>,
}
