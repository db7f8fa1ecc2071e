//! Pure conversions between backend payloads and console view models.
//!
//! Adapters never fail on well-formed payloads: a missing relation becomes a
//! placeholder name, an unreadable price becomes `0.0` and an unreadable date
//! becomes `None`, so one odd record cannot break a whole list.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};

use crate::domain::book::{Book, NewBook, RelatedName};
use crate::domain::catalog::CatalogEntry;
use crate::domain::listing::{Listing, PageDescriptor};
use crate::domain::session::{AuthGrant, SessionUser};
use crate::domain::types::{EntryName, TypeConstraintError, UserEmail, UserId};
use crate::models::auth::AuthResponse;
use crate::models::book::{BookPayload, BookRecord, BooksResponse, PriceValue, RelatedRecord};
use crate::models::catalog::{CatalogRecord, NamePayload};
use crate::models::envelope::{ListBody, ListEnvelope, PaginationRecord};

pub const AUTHOR_PLACEHOLDER: &str = "Autor no disponible";
pub const EDITORIAL_PLACEHOLDER: &str = "Editorial no disponible";
pub const GENRE_PLACEHOLDER: &str = "Género no disponible";

/// Date format used for payloads and exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_id<Id: FromStr>(raw: Option<&str>) -> Option<Id> {
    raw.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse().ok())
}

/// Resolves a relation from its nested object, falling back to the bare
/// foreign key and the placeholder name.
fn related<Id: FromStr>(
    nested: Option<RelatedRecord>,
    foreign_key: Option<String>,
    placeholder: &str,
) -> RelatedName<Id> {
    let (nested_id, name) = match nested {
        Some(record) => (record.id, Some(record.name)),
        None => (None, None),
    };
    let id = parse_id(nested_id.as_deref()).or_else(|| parse_id(foreign_key.as_deref()));
    match name.map(|name| name.trim().to_string()).filter(|name| !name.is_empty()) {
        Some(name) => RelatedName { id, name },
        None => RelatedName {
            id,
            ..RelatedName::placeholder(placeholder)
        },
    }
}

pub fn parse_price(value: &PriceValue) -> f64 {
    let parsed = match value {
        PriceValue::Number(number) => Some(*number),
        PriceValue::Text(text) => text.trim().parse::<f64>().ok(),
    };
    match parsed.filter(|price| price.is_finite()) {
        Some(price) => price,
        None => {
            log::warn!("Unreadable book price {value:?}, showing 0");
            0.0
        }
    }
}

/// Accepts plain dates and RFC 3339 timestamps.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            value
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
        })
}

pub fn adapt_book(record: BookRecord) -> Book {
    Book {
        id: record.id,
        price: parse_price(&record.price),
        title: record.title,
        stock: record.stock,
        published_at: record.published_at.as_deref().and_then(parse_date),
        availability: record.availability,
        image_url: record.image_url.filter(|url| !url.trim().is_empty()),
        author: related(record.author, record.author_id, AUTHOR_PLACEHOLDER),
        editorial: related(record.editorial, record.editorial_id, EDITORIAL_PLACEHOLDER),
        genre: related(record.genre, record.genre_id, GENRE_PLACEHOLDER),
    }
}

pub fn adapt_page(pagination: &PaginationRecord) -> PageDescriptor {
    PageDescriptor {
        current_page: pagination.page.max(1),
        total_pages: pagination.total_pages,
        page_size: pagination.limit,
        total: pagination.total,
        has_next: pagination.has_next,
        has_prev: pagination.has_prev,
    }
}

/// Adapts every record of a list body and derives its page descriptor.
pub fn adapt_list<R, T>(body: ListBody<R>, adapt: impl FnMut(R) -> T) -> Listing<T> {
    match body {
        ListBody::Paged { data, pagination } => Listing {
            items: data.into_iter().map(adapt).collect(),
            page: adapt_page(&pagination),
        },
        ListBody::Plain(data) => {
            let page = PageDescriptor::single(data.len());
            Listing {
                items: data.into_iter().map(adapt).collect(),
                page,
            }
        }
    }
}

pub fn adapt_books_response(response: BooksResponse) -> Listing<Book> {
    adapt_list(response.data, adapt_book)
}

pub fn adapt_catalog_entry(record: CatalogRecord) -> CatalogEntry {
    CatalogEntry {
        id: record.id,
        name: record.name,
    }
}

pub fn adapt_catalog_response(response: ListEnvelope<CatalogRecord>) -> Listing<CatalogEntry> {
    adapt_list(response.data, adapt_catalog_entry)
}

/// Turns a login/registration response into session credentials.
pub fn adapt_auth_response(response: AuthResponse) -> Result<AuthGrant, TypeConstraintError> {
    let user = SessionUser {
        id: UserId::new(response.user.id)?,
        email: UserEmail::new(response.user.email)?,
        name: response
            .user
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
        roles: response.user.roles,
    };
    Ok(AuthGrant {
        user,
        access_token: response.access_token,
    })
}

pub fn book_to_payload(book: &NewBook) -> BookPayload {
    BookPayload {
        title: book.title.as_str().to_string(),
        price: format!("{:.2}", book.price),
        stock: book.stock,
        published_at: book.published_at.format(DATE_FORMAT).to_string(),
        availability: book.availability,
        image_url: book.image_url.clone(),
        author_id: book.author_id,
        editorial_id: book.editorial_id,
        genre_id: book.genre_id,
    }
}

pub fn name_to_payload(name: &EntryName) -> NamePayload {
    NamePayload {
        name: name.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_parse_from_text_and_numbers() {
        assert_eq!(parse_price(&PriceValue::Text("18.50".into())), 18.5);
        assert_eq!(parse_price(&PriceValue::Number(3.0)), 3.0);
        assert_eq!(parse_price(&PriceValue::Text("gratis".into())), 0.0);
        assert_eq!(parse_price(&PriceValue::Text("NaN".into())), 0.0);
    }

    #[test]
    fn dates_parse_from_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2023, 5, 1);
        assert_eq!(parse_date("2023-05-01"), expected);
        assert_eq!(parse_date("2023-05-01T00:00:00.000Z"), expected);
        assert_eq!(parse_date("2023-05-01 10:00"), expected);
        assert_eq!(parse_date("mayo"), None);
    }
}
