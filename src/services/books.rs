//! Services backing the book pages.

use crate::api::{ApiError, BookReader, BookWriter, CatalogReader, ImageStore, ImageUpload};
use crate::domain::book::Book;
use crate::domain::catalog::{CatalogKind, SelectOption};
use crate::domain::listing::{Listing, PageDescriptor};
use crate::domain::query::{FilterKey, FilterParams, ListQuery};
use crate::domain::types::BookId;
use crate::dto::books::{
    BookFormPageData, BooksPageData, FilterOptions, sort_field_options, sort_order_options,
};
use crate::forms::book::BookForm;
use crate::forms::{FieldErrors, FormError};
use crate::models::book::ListParams;
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult};

pub const BOOKS_PATH: &str = "/books";

/// Upper bound used when a whole collection is needed (select boxes, export).
pub const FULL_LIST_LIMIT: u32 = 1000;

/// Loads the options of the three relation select boxes.
///
/// A failing catalog leaves its select empty instead of failing the page.
pub async fn load_filter_options<A>(api: &A) -> ServiceResult<FilterOptions>
where
    A: CatalogReader + ?Sized,
{
    let params = ListParams::catalog(&ListQuery::default(), FULL_LIST_LIMIT);
    let mut options = FilterOptions::default();

    for kind in CatalogKind::ALL {
        let entries = match api.list_entries(kind, &params).await {
            Ok(listing) => listing.items.iter().map(SelectOption::from).collect(),
            Err(ApiError::Unauthorized) => return Err(ServiceError::Unauthorized),
            Err(err) => {
                log::error!("Failed to load {kind} options: {err}");
                Vec::new()
            }
        };
        match kind {
            CatalogKind::Authors => options.authors = entries,
            CatalogKind::Editorials => options.editorials = entries,
            CatalogKind::Genres => options.genres = entries,
        }
    }

    Ok(options)
}

/// Loads the book list for the given address-bar parameters.
///
/// A failed fetch yields an empty list plus `load_error`; only an expired
/// session is returned as an error.
pub async fn load_books_page<A>(
    api: &A,
    params: FilterParams,
    page_size: u32,
) -> ServiceResult<BooksPageData>
where
    A: BookReader + CatalogReader + ?Sized,
{
    let params = params.normalized();
    let query = ListQuery::from(&params);

    let (listing, load_error) = match api
        .list_books(&ListParams::books(&query, page_size))
        .await
    {
        Ok(listing) => (listing, None),
        Err(ApiError::Unauthorized) => return Err(ServiceError::Unauthorized),
        Err(err) => {
            log::error!("Failed to load books: {err}");
            let message = ServiceError::from(err).user_message();
            let empty = Listing {
                items: Vec::new(),
                page: PageDescriptor::single(0),
            };
            (empty, Some(message))
        }
    };

    let options = load_filter_options(api).await?;

    Ok(BooksPageData {
        books: Paginated::new(listing, BOOKS_PATH, &params),
        load_error,
        query,
        query_string: params.to_query_string(),
        params,
        options,
        sort_fields: sort_field_options(),
        sort_orders: sort_order_options(),
    })
}

/// Applies one filter change and returns the list URL to redirect to.
pub fn filter_location(mut params: FilterParams, key: FilterKey, value: Option<String>) -> String {
    params.apply(key, value);
    format!("{BOOKS_PATH}{}", params.normalized().href_suffix())
}

pub async fn load_book<A>(api: &A, id: BookId) -> ServiceResult<Book>
where
    A: BookReader + ?Sized,
{
    api.get_book(id).await.map_err(|err| {
        log::error!("Failed to load book {id}: {err}");
        ServiceError::from(err)
    })
}

/// Loads everything the create (`id == None`) or edit page needs.
pub async fn load_book_form<A>(api: &A, id: Option<BookId>) -> ServiceResult<BookFormPageData>
where
    A: BookReader + CatalogReader + ?Sized,
{
    let book = match id {
        Some(id) => Some(load_book(api, id).await?),
        None => None,
    };
    let options = load_filter_options(api).await?;
    Ok(BookFormPageData { book, options })
}

/// Validates the form, uploads the image if one was picked and creates
/// (`id == None`) or updates the book.
pub async fn save_book<A>(
    api: &A,
    id: Option<BookId>,
    form: BookForm,
    image: Result<Option<ImageUpload>, FormError>,
) -> ServiceResult<Book>
where
    A: BookWriter + ImageStore + ?Sized,
{
    let mut errors = match form.clone().into_new_book(None) {
        Ok(_) => FieldErrors::default(),
        Err(err) => err.field_errors(),
    };
    let image = match image {
        Ok(image) => image,
        Err(err) => {
            if let Some(message) = err.field_errors().first("image") {
                errors.insert("image", message);
            }
            None
        }
    };
    if !errors.is_empty() {
        return Err(ServiceError::Form(errors));
    }

    let uploaded_url = match image {
        Some(upload) => Some(api.upload_book_image(upload).await.map_err(|err| {
            log::error!("Failed to upload book image: {err}");
            ServiceError::from(err)
        })?),
        None => None,
    };

    let new_book = form.into_new_book(uploaded_url)?;
    let result = match id {
        Some(id) => api.update_book(id, &new_book).await,
        None => api.create_book(&new_book).await,
    };
    result.map_err(|err| {
        log::error!("Failed to save book: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_book<A>(api: &A, id: BookId) -> ServiceResult<()>
where
    A: BookWriter + ?Sized,
{
    api.delete_book(id).await.map_err(|err| {
        log::error!("Failed to delete book {id}: {err}");
        ServiceError::from(err)
    })
}
