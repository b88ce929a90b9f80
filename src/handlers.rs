use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use sqlx::PgPool;

use crate::{
    data_formats::{
        is_published_true, CreateArticleRequest, DeleteArticleResponse, TagsField,
        UpdateArticleRequest,
    },
    db_helpers::{
        delete_article_in_db, get_article_in_db, insert_article_in_db, list_articles_in_db,
        update_article_in_db, SqlValue, UpdateBuilder,
    },
    errors::ApiError,
    models::Article,
};

// ----------------- Helper Handlers -----------------

pub async fn root() -> &'static str {
    "Blog API is running!"
}

// ----------------- Article Handlers -----------------

pub async fn list_articles(
    Extension(pool): Extension<Arc<PgPool>>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = list_articles_in_db(&pool).await?;
    Ok(Json(articles))
}

pub async fn get_article(
    Extension(pool): Extension<Arc<PgPool>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    // Strict check: only an integer literal ever reaches the database.
    let id: i32 = id
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid article ID format"))?;
    match get_article_in_db(&pool, id).await? {
        Some(article) => Ok(Json(article)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn create_article(
    Extension(pool): Extension<Arc<PgPool>>,
    Json(request): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let article = request.validate()?;
    let created = insert_article_in_db(&pool, article).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_article(
    Extension(pool): Extension<Arc<PgPool>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateArticleRequest>,
) -> Result<Json<Article>, ApiError> {
    let id = parse_permissive_id(&id)?;
    let builder = collect_update_fields(request)?;
    if builder.is_empty() {
        return Err(ApiError::BadRequest("No valid fields provided for update"));
    }
    match update_article_in_db(&pool, id, builder).await? {
        Some(article) => Ok(Json(article)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete_article(
    Extension(pool): Extension<Arc<PgPool>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteArticleResponse>, ApiError> {
    let id = parse_permissive_id(&id)?;
    match delete_article_in_db(&pool, id).await? {
        Some(article) => Ok(Json(DeleteArticleResponse::new(article))),
        None => Err(ApiError::NotFound),
    }
}

// ----------------- Request Plumbing -----------------

// Update and delete only pre-check that the id is number-shaped. A value
// that passes but is not an integer literal ("12.5") would be rejected by
// the database's integer parser, so it keeps that failure mode: the generic
// 500, not the 400 the strict check in `get_article` produces.
fn parse_permissive_id(raw: &str) -> Result<i32, ApiError> {
    let raw = raw.trim();
    if raw.parse::<f64>().is_err() {
        return Err(ApiError::BadRequest("Invalid article ID"));
    }
    raw.parse::<i32>().map_err(|_| ApiError::ServerError)
}

/// Builds the PATCH assignment list in fixed declaration order: title,
/// content, author, tags, is_published. Text fields that are blank after
/// trimming are dropped rather than rejected; absent fields leave the stored
/// value untouched.
fn collect_update_fields(request: UpdateArticleRequest) -> Result<UpdateBuilder, ApiError> {
    let mut builder = UpdateBuilder::new("articles")
        .set_opt("title", trimmed_text(request.title))
        .set_opt("content", trimmed_text(request.content))
        .set_opt("author", trimmed_text(request.author));
    let tags = TagsField::from_value(request.tags.as_ref()).resolve_for_update()?;
    builder = builder.set_opt("tags", tags.map(SqlValue::TextArray));
    if request.is_published.is_some() {
        builder = builder.set(
            "is_published",
            SqlValue::Bool(is_published_true(request.is_published.as_ref())),
        );
    }
    Ok(builder)
}

fn trimmed_text(value: Option<String>) -> Option<SqlValue> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SqlValue::Text(trimmed.to_string()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_request(body: serde_json::Value) -> UpdateArticleRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn permissive_id_accepts_number_shaped_strings() {
        assert_eq!(parse_permissive_id("42").unwrap(), 42);
        assert_eq!(parse_permissive_id(" 42 ").unwrap(), 42);
        assert_eq!(parse_permissive_id("-7").unwrap(), -7);
    }

    #[test]
    fn permissive_id_rejects_non_numbers_with_400() {
        assert!(matches!(
            parse_permissive_id("abc"),
            Err(ApiError::BadRequest("Invalid article ID"))
        ));
        assert!(matches!(
            parse_permissive_id(""),
            Err(ApiError::BadRequest("Invalid article ID"))
        ));
    }

    #[test]
    fn permissive_id_passes_floats_through_to_the_strict_failure() {
        assert!(matches!(
            parse_permissive_id("12.5"),
            Err(ApiError::ServerError)
        ));
        assert!(matches!(
            parse_permissive_id("1e3"),
            Err(ApiError::ServerError)
        ));
    }

    #[test]
    fn empty_body_collects_no_fields() {
        let builder = collect_update_fields(update_request(json!({}))).unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn blank_text_fields_are_dropped_not_rejected() {
        let builder =
            collect_update_fields(update_request(json!({ "title": "  ", "author": "\t" })))
                .unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn fields_are_assembled_in_declaration_order() {
        let request = update_request(json!({
            "is_published": "true",
            "tags": ["a"],
            "author": " kay ",
            "content": "body",
            "title": "head",
        }));
        let (query, values) = collect_update_fields(request).unwrap().build(9);
        assert_eq!(
            query,
            "UPDATE articles SET title = $1, content = $2, author = $3, \
             tags = $4, is_published = $5 WHERE id = $6 RETURNING *"
        );
        assert_eq!(
            values,
            vec![
                SqlValue::Text("head".to_string()),
                SqlValue::Text("body".to_string()),
                SqlValue::Text("kay".to_string()),
                SqlValue::TextArray(vec!["a".to_string()]),
                SqlValue::Bool(true),
                SqlValue::Int(9),
            ]
        );
    }

    #[test]
    fn text_fields_are_stored_trimmed() {
        let (_, values) = collect_update_fields(update_request(json!({ "title": "  head  " })))
            .unwrap()
            .build(1);
        assert_eq!(values[0], SqlValue::Text("head".to_string()));
    }

    #[test]
    fn empty_tags_string_clears_the_stored_tags() {
        let (query, values) = collect_update_fields(update_request(json!({ "tags": "" })))
            .unwrap()
            .build(4);
        assert_eq!(query, "UPDATE articles SET tags = $1 WHERE id = $2 RETURNING *");
        assert_eq!(values[0], SqlValue::TextArray(Vec::new()));
    }

    #[test]
    fn wrong_typed_tags_are_rejected() {
        assert!(matches!(
            collect_update_fields(update_request(json!({ "tags": 5 }))),
            Err(ApiError::BadRequest("Tags must be an array or stringified array"))
        ));
    }

    #[test]
    fn is_published_is_included_whenever_present() {
        let (query, values) = collect_update_fields(update_request(json!({ "is_published": "no" })))
            .unwrap()
            .build(2);
        assert_eq!(
            query,
            "UPDATE articles SET is_published = $1 WHERE id = $2 RETURNING *"
        );
        assert_eq!(values[0], SqlValue::Bool(false));
    }
}
