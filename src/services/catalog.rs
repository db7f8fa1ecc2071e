//! Services backing the author, editorial and genre pages.

use crate::api::{ApiError, CatalogReader, CatalogWriter};
use crate::domain::catalog::{CatalogEntry, CatalogKind};
use crate::domain::listing::{Listing, PageDescriptor};
use crate::domain::query::{FilterParams, ListQuery};
use crate::domain::types::EntryId;
use crate::dto::catalog::CatalogPageData;
use crate::forms::catalog::EntryForm;
use crate::models::book::ListParams;
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult};

pub fn list_path(kind: CatalogKind) -> String {
    format!("/{kind}")
}

/// Loads one page of entries; a failed fetch renders the retry panel.
pub async fn load_catalog_page<A>(
    api: &A,
    kind: CatalogKind,
    params: FilterParams,
    page_size: u32,
) -> ServiceResult<CatalogPageData>
where
    A: CatalogReader + ?Sized,
{
    let params = params.normalized();
    let query = ListQuery::from(&params);

    let (listing, load_error) = match api
        .list_entries(kind, &ListParams::catalog(&query, page_size))
        .await
    {
        Ok(listing) => (listing, None),
        Err(ApiError::Unauthorized) => return Err(ServiceError::Unauthorized),
        Err(err) => {
            log::error!("Failed to load {kind}: {err}");
            let message = ServiceError::from(err).user_message();
            let empty = Listing {
                items: Vec::new(),
                page: PageDescriptor::single(0),
            };
            (empty, Some(message))
        }
    };

    Ok(CatalogPageData {
        kind,
        entries: Paginated::new(listing, &list_path(kind), &params),
        load_error,
        query_string: params.to_query_string(),
        params,
    })
}

pub async fn create_entry<A>(
    api: &A,
    kind: CatalogKind,
    form: EntryForm,
) -> ServiceResult<CatalogEntry>
where
    A: CatalogWriter + ?Sized,
{
    let name = form.into_name()?;
    api.create_entry(kind, &name).await.map_err(|err| {
        log::error!("Failed to create {}: {err}", kind.singular());
        ServiceError::from(err)
    })
}

pub async fn update_entry<A>(
    api: &A,
    kind: CatalogKind,
    id: EntryId,
    form: EntryForm,
) -> ServiceResult<CatalogEntry>
where
    A: CatalogWriter + ?Sized,
{
    let name = form.into_name()?;
    api.update_entry(kind, id, &name).await.map_err(|err| {
        log::error!("Failed to update {} {id}: {err}", kind.singular());
        ServiceError::from(err)
    })
}

pub async fn delete_entry<A>(api: &A, kind: CatalogKind, id: EntryId) -> ServiceResult<()>
where
    A: CatalogWriter + ?Sized,
{
    api.delete_entry(kind, id).await.map_err(|err| {
        log::error!("Failed to delete {} {id}: {err}", kind.singular());
        ServiceError::from(err)
    })
}
