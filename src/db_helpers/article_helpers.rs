use sqlx::{PgPool, Postgres};

use crate::data_formats::NewArticle;
use crate::errors::ApiError;
use crate::models::Article;

use super::{SqlValue, UpdateBuilder};

// Each operation is a single statement on a pool connection; the database's
// implicit transaction is the only isolation in play.

pub async fn list_articles_in_db(pool: &PgPool) -> Result<Vec<Article>, ApiError> {
    let articles = sqlx::query_as::<Postgres, Article>(
        "SELECT * FROM articles ORDER BY published_date DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(articles)
}

pub async fn get_article_in_db(pool: &PgPool, id: i32) -> Result<Option<Article>, ApiError> {
    let article = sqlx::query_as::<Postgres, Article>("SELECT * FROM articles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(article)
}

pub async fn insert_article_in_db(pool: &PgPool, article: NewArticle) -> Result<Article, ApiError> {
    let created = sqlx::query_as::<Postgres, Article>(
        "INSERT INTO articles (title, content, author, tags, is_published) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(article.title)
    .bind(article.content)
    .bind(article.author)
    .bind(article.tags)
    .bind(article.is_published)
    .fetch_one(pool)
    .await?;
    Ok(created)
}

pub async fn update_article_in_db(
    pool: &PgPool,
    id: i32,
    builder: UpdateBuilder,
) -> Result<Option<Article>, ApiError> {
    let (sql, values) = builder.build(id);
    let mut query = sqlx::query_as::<Postgres, Article>(&sql);
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::TextArray(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
        };
    }
    let article = query.fetch_optional(pool).await?;
    Ok(article)
}

pub async fn delete_article_in_db(pool: &PgPool, id: i32) -> Result<Option<Article>, ApiError> {
    let article =
        sqlx::query_as::<Postgres, Article>("DELETE FROM articles WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(article)
}
