use serde::Serialize;

use crate::models::Article;

#[derive(Serialize, Debug)]
pub struct DeleteArticleResponse {
    pub message: String,
    pub article: Article,
}

impl DeleteArticleResponse {
    pub fn new(article: Article) -> Self {
        DeleteArticleResponse {
            message: "Article deleted successfully".to_string(),
            article,
        }
    }
}
