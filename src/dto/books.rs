//! DTOs used by the book pages.

use serde::Serialize;

use crate::domain::book::Book;
use crate::domain::catalog::SelectOption;
use crate::domain::query::{FilterParams, ListQuery, SortField, SortOrder};
use crate::pagination::Paginated;

/// Options feeding the author, genre and editorial select boxes.
#[derive(Debug, Default, Serialize)]
pub struct FilterOptions {
    pub authors: Vec<SelectOption>,
    pub genres: Vec<SelectOption>,
    pub editorials: Vec<SelectOption>,
}

/// Data required to render the book list.
#[derive(Serialize)]
pub struct BooksPageData {
    pub books: Paginated<Book>,
    /// Set when the list fetch failed; the page shows a retry panel instead.
    pub load_error: Option<String>,
    pub query: ListQuery,
    pub params: FilterParams,
    /// Current query string, reused by the export and retry links.
    pub query_string: String,
    pub options: FilterOptions,
    pub sort_fields: Vec<SelectOption>,
    pub sort_orders: Vec<SelectOption>,
}

/// Data required to render the create/edit page.
#[derive(Serialize)]
pub struct BookFormPageData {
    pub book: Option<Book>,
    pub options: FilterOptions,
}

pub fn sort_field_options() -> Vec<SelectOption> {
    SortField::ALL
        .iter()
        .map(|field| SelectOption {
            value: field.as_str().to_string(),
            label: field.label().to_string(),
        })
        .collect()
}

pub fn sort_order_options() -> Vec<SelectOption> {
    [SortOrder::Asc, SortOrder::Desc]
        .iter()
        .map(|order| SelectOption {
            value: order.as_str().to_string(),
            label: order.label().to_string(),
        })
        .collect()
}
