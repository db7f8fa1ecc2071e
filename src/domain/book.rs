use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::{AuthorId, BookId, BookTitle, EditorialId, GenreId};

/// Display name of a related entity attached to a book.
///
/// When the backend omits the nested relation, `name` holds a placeholder and
/// `id` falls back to the bare foreign key, if any.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RelatedName<Id> {
    pub id: Option<Id>,
    pub name: String,
}

impl<Id> RelatedName<Id> {
    pub fn placeholder(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
        }
    }
}

/// Flattened view of a book with its related-entity display names.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub price: f64,
    pub stock: i64,
    pub published_at: Option<NaiveDate>,
    pub availability: bool,
    pub image_url: Option<String>,
    pub author: RelatedName<AuthorId>,
    pub editorial: RelatedName<EditorialId>,
    pub genre: RelatedName<GenreId>,
}

/// Validated data used to create or update a book.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBook {
    pub title: BookTitle,
    pub price: f64,
    pub stock: i64,
    pub published_at: NaiveDate,
    pub availability: bool,
    pub image_url: Option<String>,
    pub author_id: AuthorId,
    pub editorial_id: EditorialId,
    pub genre_id: GenreId,
}
