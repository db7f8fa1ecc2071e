use serde::Serialize;

use crate::domain::catalog::{CatalogEntry, CatalogKind};
use crate::domain::query::FilterParams;
use crate::pagination::Paginated;

/// Data required to render an author, editorial or genre list.
#[derive(Serialize)]
pub struct CatalogPageData {
    pub kind: CatalogKind,
    pub entries: Paginated<CatalogEntry>,
    pub load_error: Option<String>,
    pub params: FilterParams,
    pub query_string: String,
}
