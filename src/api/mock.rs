//! Mock backend implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::{
    ApiResult, AuthGateway, BookReader, BookWriter, CatalogReader, CatalogWriter, ImageStore,
    ImageUpload,
};
use crate::domain::book::{Book, NewBook};
use crate::domain::catalog::{CatalogEntry, CatalogKind};
use crate::domain::listing::Listing;
use crate::domain::session::AuthGrant;
use crate::domain::types::{BookId, EntryId, EntryName, UserId};
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::models::book::ListParams;

mock! {
    pub Api {}

    #[async_trait]
    impl BookReader for Api {
        async fn list_books(&self, params: &ListParams) -> ApiResult<Listing<Book>>;
        async fn get_book(&self, id: BookId) -> ApiResult<Book>;
    }

    #[async_trait]
    impl BookWriter for Api {
        async fn create_book(&self, book: &NewBook) -> ApiResult<Book>;
        async fn update_book(&self, id: BookId, book: &NewBook) -> ApiResult<Book>;
        async fn delete_book(&self, id: BookId) -> ApiResult<()>;
    }

    #[async_trait]
    impl CatalogReader for Api {
        async fn list_entries(
            &self,
            kind: CatalogKind,
            params: &ListParams,
        ) -> ApiResult<Listing<CatalogEntry>>;
    }

    #[async_trait]
    impl CatalogWriter for Api {
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
    impl AuthGateway for Api {
        async fn login(&self, request: &LoginRequest) -> ApiResult<AuthGrant>;
        async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthGrant>;
        async fn logout(&self, user_id: &UserId) -> ApiResult<()>;
    }

    #[async_trait]
    impl ImageStore for Api {
        async fn upload_book_image(&self, upload: ImageUpload) -> ApiResult<String>;
    }
}
