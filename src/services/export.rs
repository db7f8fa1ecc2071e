//! CSV export of the filtered book list.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::adapters::DATE_FORMAT;
use crate::api::BookReader;
use crate::domain::book::Book;
use crate::domain::query::{FilterParams, ListQuery};
use crate::models::book::ListParams;
use crate::services::books::FULL_LIST_LIMIT;
use crate::services::{ServiceError, ServiceResult};

pub const EXPORT_FILENAME: &str = "libros_export.csv";

pub const EXPORT_HEADERS: [&str; 10] = [
    "ID",
    "Título",
    "Autor",
    "Editorial",
    "Género",
    "Precio",
    "Stock",
    "Fecha de Publicación",
    "Disponibilidad",
    "URL de Imagen",
];

fn availability_label(available: bool) -> &'static str {
    if available {
        "Disponible"
    } else {
        "No disponible"
    }
}

/// Serializes `books`: a plain header row, then rows with every text field
/// quoted.
pub fn books_to_csv(books: &[Book]) -> ServiceResult<String> {
    let to_internal = |e: csv::Error| ServiceError::Internal(format!("CSV export failed: {e}"));

    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(EXPORT_HEADERS).map_err(to_internal)?;
    let header = header
        .into_inner()
        .map_err(|e| ServiceError::Internal(format!("CSV export failed: {e}")))?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(header);

    for book in books {
        let published_at = book
            .published_at
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        writer
            .write_record([
                book.id.to_string().as_str(),
                book.title.as_str(),
                book.author.name.as_str(),
                book.editorial.name.as_str(),
                book.genre.name.as_str(),
                book.price.to_string().as_str(),
                book.stock.to_string().as_str(),
                published_at.as_str(),
                availability_label(book.availability),
                book.image_url.as_deref().unwrap_or_default(),
            ])
            .map_err(to_internal)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ServiceError::Internal(e.to_string()))
}

/// Exports every book matching `params`, ignoring the current page.
///
/// Walks the backend pages until the last one. Returns `None` when nothing
/// matches.
pub async fn export_books<A>(api: &A, params: FilterParams) -> ServiceResult<Option<String>>
where
    A: BookReader + ?Sized,
{
    let base = ListQuery::from(&params.normalized());
    let mut books = Vec::new();
    let mut page = 1;

    loop {
        let query = ListQuery {
            page,
            ..base.clone()
        };
        let listing = api
            .list_books(&ListParams::books(&query, FULL_LIST_LIMIT))
            .await
            .map_err(|err| {
                log::error!("Failed to load page {page} of the export: {err}");
                ServiceError::from(err)
            })?;

        let next = listing
            .page
            .next()
            .filter(|next| listing.page.has_next && *next > page);
        books.extend(listing.items);
        match next {
            Some(next) => page = next,
            None => break,
        }
    }

    if books.is_empty() {
        return Ok(None);
    }
    log::info!("Exporting {} books", books.len());
    books_to_csv(&books).map(Some)
}
