//! Access to the inventory REST backend.
//!
//! Services depend on these traits only; [`http::HttpInventoryApi`] is the
//! production implementation and `mock::MockApi` backs the service tests.

use async_trait::async_trait;

use crate::domain::book::{Book, NewBook};
use crate::domain::catalog::{CatalogEntry, CatalogKind};
use crate::domain::listing::Listing;
use crate::domain::session::AuthGrant;
use crate::domain::types::{BookId, EntryId, EntryName, UserId};
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::models::book::ListParams;

pub use errors::{ApiError, ApiResult};

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Image file accepted by `POST /files/books`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait BookReader: Send + Sync {
    async fn list_books(&self, params: &ListParams) -> ApiResult<Listing<Book>>;
    async fn get_book(&self, id: BookId) -> ApiResult<Book>;
}

#[async_trait]
pub trait BookWriter: Send + Sync {
    async fn create_book(&self, book: &NewBook) -> ApiResult<Book>;
    async fn update_book(&self, id: BookId, book: &NewBook) -> ApiResult<Book>;
    async fn delete_book(&self, id: BookId) -> ApiResult<()>;
}

#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn list_entries(
        &self,
        kind: CatalogKind,
        params: &ListParams,
    ) -> ApiResult<Listing<CatalogEntry>>;
}

#[async_trait]
pub trait CatalogWriter: Send + Sync {
    async fn create_entry(&self, kind: CatalogKind, name: &EntryName) -> ApiResult<CatalogEntry>;
    async fn update_entry(
        &self,
        kind: CatalogKind,
        id: EntryId,
        name: &EntryName,
    ) -> ApiResult<CatalogEntry>;
    async fn delete_entry(&self, kind: CatalogKind, id: EntryId) -> ApiResult<()>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthGrant>;
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthGrant>;
    async fn logout(&self, user_id: &UserId) -> ApiResult<()>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads a cover image and returns its public URL.
    async fn upload_book_image(&self, upload: ImageUpload) -> ApiResult<String>;
}
