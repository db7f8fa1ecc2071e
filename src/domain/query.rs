//! Address-bar list state.
//!
//! [`FilterParams`] is the raw query-string layout shared by every list screen
//! and [`ListQuery`] is its normalized form. The encode/decode contract is:
//! `FilterParams::parse` accepts any query string (unknown keys and malformed
//! values are ignored), `FilterParams::to_query_string` writes only the
//! parameters that are set, in a stable order.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{AuthorId, EditorialId, GenreId, TypeConstraintError};

/// Value sent by select filters to mean "no filter".
pub const ALL_SENTINEL: &str = "all";

/// Query-string keys understood by the list screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "authorId")]
    AuthorId,
    #[serde(rename = "genreId")]
    GenreId,
    #[serde(rename = "editorialId")]
    EditorialId,
    #[serde(rename = "availability")]
    Availability,
    #[serde(rename = "sortBy")]
    SortBy,
    #[serde(rename = "order")]
    Order,
    #[serde(rename = "page")]
    Page,
}

impl FilterKey {
    pub const ALL: [FilterKey; 8] = [
        Self::Search,
        Self::AuthorId,
        Self::GenreId,
        Self::EditorialId,
        Self::Availability,
        Self::SortBy,
        Self::Order,
        Self::Page,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::AuthorId => "authorId",
            Self::GenreId => "genreId",
            Self::EditorialId => "editorialId",
            Self::Availability => "availability",
            Self::SortBy => "sortBy",
            Self::Order => "order",
            Self::Page => "page",
        }
    }
}

impl FromStr for FilterKey {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

/// Raw list parameters exactly as they appear in the address bar.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editorial_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != ALL_SENTINEL)
}

impl FilterParams {
    /// Decodes a query string, tolerating unknown keys and blank values.
    ///
    /// A repeated key keeps its last value, as browsers do when a form field
    /// is submitted twice.
    pub fn parse(query_string: &str) -> Self {
        let pairs = match serde_html_form::from_str::<Vec<(String, String)>>(query_string) {
            Ok(pairs) => pairs,
            Err(err) => {
                log::warn!("Ignoring malformed list query string {query_string:?}: {err}");
                return Self::default();
            }
        };

        let mut params = Self::default();
        for (key, value) in pairs {
            if let Ok(key) = key.parse::<FilterKey>() {
                *params.slot_mut(key) = Some(value);
            }
        }
        params.normalized()
    }

    /// Encodes the parameters that are set, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        serde_html_form::to_string(self).unwrap_or_default()
    }

    /// Drops blank values and the select "all" sentinel.
    pub fn normalized(self) -> Self {
        Self {
            search: clean(self.search),
            author_id: clean(self.author_id),
            genre_id: clean(self.genre_id),
            editorial_id: clean(self.editorial_id),
            availability: clean(self.availability),
            sort_by: clean(self.sort_by),
            order: clean(self.order),
            page: clean(self.page),
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    fn slot(&self, key: FilterKey) -> &Option<String> {
        match key {
            FilterKey::Search => &self.search,
            FilterKey::AuthorId => &self.author_id,
            FilterKey::GenreId => &self.genre_id,
            FilterKey::EditorialId => &self.editorial_id,
            FilterKey::Availability => &self.availability,
            FilterKey::SortBy => &self.sort_by,
            FilterKey::Order => &self.order,
            FilterKey::Page => &self.page,
        }
    }

    fn slot_mut(&mut self, key: FilterKey) -> &mut Option<String> {
        match key {
            FilterKey::Search => &mut self.search,
            FilterKey::AuthorId => &mut self.author_id,
            FilterKey::GenreId => &mut self.genre_id,
            FilterKey::EditorialId => &mut self.editorial_id,
            FilterKey::Availability => &mut self.availability,
            FilterKey::SortBy => &mut self.sort_by,
            FilterKey::Order => &mut self.order,
            FilterKey::Page => &mut self.page,
        }
    }

    /// Rewrites one parameter; `None`, blank or `all` clears it.
    ///
    /// Any change to a key other than `page` also removes `page`, so a changed
    /// filter always starts again from the first page. Returns whether the
    /// encoded parameters changed.
    pub fn apply(&mut self, key: FilterKey, value: Option<String>) -> bool {
        let before = self.clone();
        let value = clean(value);
        if key == FilterKey::Page {
            self.page = value.filter(|v| v.parse::<u32>().map_or(true, |page| page > 1));
        } else {
            *self.slot_mut(key) = value;
            self.page = None;
        }
        *self != before
    }

    /// Copy of these parameters pointing at `page`.
    pub fn with_page(&self, page: u32) -> Self {
        let mut params = self.clone();
        params.apply(FilterKey::Page, Some(page.to_string()));
        params
    }

    /// `?`-prefixed query string, or an empty string when nothing is set.
    pub fn href_suffix(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }
}

/// Sortable columns of the book list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "stock")]
    Stock,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 4] = [Self::Title, Self::Price, Self::Stock, Self::CreatedAt];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::CreatedAt => "createdAt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Título",
            Self::Price => "Precio",
            Self::Stock => "Cantidad",
            Self::CreatedAt => "Fecha de registro",
        }
    }

    fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Asc => "Ascendente",
            Self::Desc => "Descendente",
        }
    }

    fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized filter, sort and page state driving a collection fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub author_id: Option<AuthorId>,
    pub genre_id: Option<GenreId>,
    pub editorial_id: Option<EditorialId>,
    pub availability: Option<bool>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            author_id: None,
            genre_id: None,
            editorial_id: None,
            availability: None,
            sort_by: SortField::default(),
            order: SortOrder::default(),
            page: 1,
        }
    }
}

impl From<&FilterParams> for ListQuery {
    fn from(params: &FilterParams) -> Self {
        Self {
            search: params.search.clone(),
            author_id: params.author_id.as_deref().and_then(|v| v.parse().ok()),
            genre_id: params.genre_id.as_deref().and_then(|v| v.parse().ok()),
            editorial_id: params.editorial_id.as_deref().and_then(|v| v.parse().ok()),
            availability: match params.availability.as_deref() {
                Some("true") => Some(true),
                Some("false") => Some(false),
                _ => None,
            },
            sort_by: params
                .sort_by
                .as_deref()
                .and_then(SortField::from_param)
                .unwrap_or_default(),
            order: params
                .order
                .as_deref()
                .and_then(SortOrder::from_param)
                .unwrap_or_default(),
            page: params
                .page
                .as_deref()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|page| *page >= 1)
                .unwrap_or(1),
        }
    }
}

impl ListQuery {
    pub fn from_query_string(query_string: &str) -> Self {
        Self::from(&FilterParams::parse(query_string))
    }

    /// Canonical parameters for this query; defaults are omitted.
    pub fn to_params(&self) -> FilterParams {
        FilterParams {
            search: self.search.clone(),
            author_id: self.author_id.map(|id| id.to_string()),
            genre_id: self.genre_id.map(|id| id.to_string()),
            editorial_id: self.editorial_id.map(|id| id.to_string()),
            availability: self.availability.map(|v| v.to_string()),
            sort_by: (self.sort_by != SortField::default())
                .then(|| self.sort_by.as_str().to_string()),
            order: (self.order != SortOrder::default()).then(|| self.order.as_str().to_string()),
            page: (self.page > 1).then(|| self.page.to_string()),
        }
    }

    /// Whether any filter beyond sorting and paging is active.
    pub fn has_filters(&self) -> bool {
        self.search.is_some()
            || self.author_id.is_some()
            || self.genre_id.is_some()
            || self.editorial_id.is_some()
            || self.availability.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR: &str = "0b6f7c1e-55a4-4d52-8f0e-3f1c2a9b7d10";

    #[test]
    fn parse_ignores_blank_unknown_and_sentinel_values() {
        let params = FilterParams::parse("search=&authorId=all&foo=bar&page=3&order=DESC");
        assert_eq!(params.search, None);
        assert_eq!(params.author_id, None);
        assert_eq!(params.page.as_deref(), Some("3"));
        assert_eq!(params.order.as_deref(), Some("DESC"));
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let params = FilterParams::parse("search=cat&search=dog&authorId=x&page=3");
        assert_eq!(params.search.as_deref(), Some("dog"));
        assert_eq!(params.author_id.as_deref(), Some("x"));
        assert_eq!(params.page.as_deref(), Some("3"));

        let params = FilterParams::parse("search=cat&page=3&order=DESC&order=ASC");
        assert_eq!(params.search.as_deref(), Some("cat"));
        assert_eq!(params.order.as_deref(), Some("ASC"));
        assert_eq!(params.page.as_deref(), Some("3"));

        let params = FilterParams::parse("search=cat&search=");
        assert_eq!(params.search, None);
    }

    #[test]
    fn apply_non_page_key_resets_page() {
        let mut params = FilterParams::parse("search=dune&page=4");
        assert!(params.apply(FilterKey::AuthorId, Some(AUTHOR.to_string())));
        assert_eq!(params.page, None);
        assert_eq!(params.author_id.as_deref(), Some(AUTHOR));
        assert_eq!(ListQuery::from(&params).page, 1);
    }

    #[test]
    fn apply_page_keeps_filters_and_drops_first_page() {
        let mut params = FilterParams::parse("search=dune");
        params.apply(FilterKey::Page, Some("2".to_string()));
        assert_eq!(params.to_query_string(), "search=dune&page=2");
        params.apply(FilterKey::Page, Some("1".to_string()));
        assert_eq!(params.to_query_string(), "search=dune");
    }

    #[test]
    fn list_query_falls_back_to_defaults() {
        let query = ListQuery::from_query_string("sortBy=rating&order=sideways&page=0&authorId=x");
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn list_query_reads_every_filter() {
        let query = ListQuery::from_query_string(&format!(
            "search=cat&authorId={AUTHOR}&availability=false&sortBy=createdAt&order=desc&page=5"
        ));
        assert_eq!(query.search.as_deref(), Some("cat"));
        assert_eq!(query.author_id.map(|id| id.to_string()).as_deref(), Some(AUTHOR));
        assert_eq!(query.availability, Some(false));
        assert_eq!(query.sort_by, SortField::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.page, 5);
        assert!(query.has_filters());
    }

    #[test]
    fn to_params_omits_defaults() {
        let query = ListQuery {
            search: Some("cat".to_string()),
            order: SortOrder::Desc,
            ..ListQuery::default()
        };
        assert_eq!(query.to_params().to_query_string(), "search=cat&order=DESC");
        assert_eq!(ListQuery::default().to_params().href_suffix(), "");
    }
}
