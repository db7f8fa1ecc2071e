//! Wire models for the `/books` resource.

use serde::{Deserialize, Serialize};

use crate::domain::query::{ListQuery, SortField, SortOrder};
use crate::domain::types::{AuthorId, BookId, EditorialId, GenreId};
use crate::models::envelope::ListEnvelope;

/// Nested `{ id, name }` object the backend embeds for related entities.
///
/// Ids stay raw text here; adapters parse them and fall back to a placeholder
/// so one malformed relation cannot fail a whole page.
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Prices arrive as decimal strings, occasionally as plain numbers.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PriceValue {
    Text(String),
    Number(f64),
}

/// Book record as returned by `GET /books` and `GET /books/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub price: PriceValue,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub availability: bool,
    pub published_at: Option<String>,
    pub image_url: Option<String>,
    pub author_id: Option<String>,
    pub editorial_id: Option<String>,
    pub genre_id: Option<String>,
    pub author: Option<RelatedRecord>,
    pub editorial: Option<RelatedRecord>,
    pub genre: Option<RelatedRecord>,
}

/// `GET /books` response: `{ statusCode, data: { data, pagination } }`.
pub type BooksResponse = ListEnvelope<BookRecord>;

/// Body sent by `POST /books` and `PATCH /books/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub price: String,
    pub stock: i64,
    pub published_at: String,
    pub availability: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author_id: AuthorId,
    pub editorial_id: EditorialId,
    pub genre_id: GenreId,
}

/// Query parameters accepted by the backend list endpoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<AuthorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<GenreId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorial_id: Option<EditorialId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl ListParams {
    /// Parameters for the book list, carrying every filter of `query`.
    pub fn books(query: &ListQuery, limit: u32) -> Self {
        Self {
            page: query.page,
            limit,
            search: query.search.clone(),
            author_id: query.author_id,
            genre_id: query.genre_id,
            editorial_id: query.editorial_id,
            availability: query.availability,
            sort_by: Some(query.sort_by),
            order: Some(query.order),
        }
    }

    /// Parameters for the flat catalogs, which only support search and paging.
    pub fn catalog(query: &ListQuery, limit: u32) -> Self {
        Self {
            page: query.page,
            limit,
            search: query.search.clone(),
            author_id: None,
            genre_id: None,
            editorial_id: None,
            availability: None,
            sort_by: None,
            order: None,
        }
    }
}
