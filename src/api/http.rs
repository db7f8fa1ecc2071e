//! `reqwest` implementation of the backend traits.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::adapters::{
    adapt_auth_response, adapt_book, adapt_books_response, adapt_catalog_entry,
    adapt_catalog_response, book_to_payload, name_to_payload,
};
use crate::api::{
    ApiError, ApiResult, AuthGateway, BookReader, BookWriter, CatalogReader, CatalogWriter,
    ImageStore, ImageUpload,
};
use crate::domain::book::{Book, NewBook};
use crate::domain::catalog::{CatalogEntry, CatalogKind};
use crate::domain::listing::Listing;
use crate::domain::session::AuthGrant;
use crate::domain::types::{BookId, EntryId, EntryName, UserId};
use crate::models::auth::{AuthResponse, LoginRequest, LogoutRequest, RegisterRequest, UploadResponse};
use crate::models::book::{BookRecord, BooksResponse, ListParams};
use crate::models::catalog::CatalogRecord;
use crate::models::envelope::{ListEnvelope, RecordBody};

/// Backend client shared by all workers.
///
/// The underlying `reqwest::Client` is pooled; [`HttpInventoryApi::with_token`]
/// produces a cheap per-request copy carrying the session's bearer token.
#[derive(Clone)]
pub struct HttpInventoryApi {
    client: reqwest::Client,
    base_url: Arc<str>,
    token: Option<String>,
}

impl HttpInventoryApi {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: None,
        })
    }

    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: Arc::clone(&self.base_url),
            token: token.map(str::to_string),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn checked(builder: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        log::warn!("Backend answered {status}: {err}");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let response = Self::checked(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn execute(builder: RequestBuilder) -> ApiResult<()> {
        Self::checked(builder).await.map(|_| ())
    }
}

#[async_trait]
impl BookReader for HttpInventoryApi {
    async fn list_books(&self, params: &ListParams) -> ApiResult<Listing<Book>> {
        let response: BooksResponse =
            Self::fetch(self.request(Method::GET, "books").query(params)).await?;
        Ok(adapt_books_response(response))
    }

    async fn get_book(&self, id: BookId) -> ApiResult<Book> {
        let body: RecordBody<BookRecord> =
            Self::fetch(self.request(Method::GET, &format!("books/{id}"))).await?;
        Ok(adapt_book(body.into_inner()))
    }
}

#[async_trait]
impl BookWriter for HttpInventoryApi {
    async fn create_book(&self, book: &NewBook) -> ApiResult<Book> {
        let body: RecordBody<BookRecord> = Self::fetch(
            self.request(Method::POST, "books")
                .json(&book_to_payload(book)),
        )
        .await?;
        Ok(adapt_book(body.into_inner()))
    }

    async fn update_book(&self, id: BookId, book: &NewBook) -> ApiResult<Book> {
        let body: RecordBody<BookRecord> = Self::fetch(
            self.request(Method::PATCH, &format!("books/{id}"))
                .json(&book_to_payload(book)),
        )
        .await?;
        Ok(adapt_book(body.into_inner()))
    }

    async fn delete_book(&self, id: BookId) -> ApiResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("books/{id}"))).await
    }
}

#[async_trait]
impl CatalogReader for HttpInventoryApi {
    async fn list_entries(
        &self,
        kind: CatalogKind,
        params: &ListParams,
    ) -> ApiResult<Listing<CatalogEntry>> {
        let response: ListEnvelope<CatalogRecord> =
            Self::fetch(self.request(Method::GET, kind.as_str()).query(params)).await?;
        Ok(adapt_catalog_response(response))
    }
}

#[async_trait]
impl CatalogWriter for HttpInventoryApi {
    async fn create_entry(&self, kind: CatalogKind, name: &EntryName) -> ApiResult<CatalogEntry> {
        let body: RecordBody<CatalogRecord> = Self::fetch(
            self.request(Method::POST, kind.as_str())
                .json(&name_to_payload(name)),
        )
        .await?;
        Ok(adapt_catalog_entry(body.into_inner()))
    }

    async fn update_entry(
        &self,
        kind: CatalogKind,
        id: EntryId,
        name: &EntryName,
    ) -> ApiResult<CatalogEntry> {
        let body: RecordBody<CatalogRecord> = Self::fetch(
            self.request(Method::PATCH, &format!("{kind}/{id}"))
                .json(&name_to_payload(name)),
        )
        .await?;
        Ok(adapt_catalog_entry(body.into_inner()))
    }

    async fn delete_entry(&self, kind: CatalogKind, id: EntryId) -> ApiResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("{kind}/{id}"))).await
    }
}

#[async_trait]
impl AuthGateway for HttpInventoryApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthGrant> {
        let body: RecordBody<AuthResponse> =
            Self::fetch(self.request(Method::POST, "auth/login").json(request)).await?;
        Ok(adapt_auth_response(body.into_inner())?)
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthGrant> {
        let body: RecordBody<AuthResponse> =
            Self::fetch(self.request(Method::POST, "auth/register").json(request)).await?;
        Ok(adapt_auth_response(body.into_inner())?)
    }

    async fn logout(&self, user_id: &UserId) -> ApiResult<()> {
        let request = LogoutRequest {
            user_id: user_id.to_string(),
        };
        Self::execute(self.request(Method::POST, "auth/logout").json(&request)).await
    }
}

#[async_trait]
impl ImageStore for HttpInventoryApi {
    async fn upload_book_image(&self, upload: ImageUpload) -> ApiResult<String> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = Form::new().part("file", part);

        let body: RecordBody<UploadResponse> =
            Self::fetch(self.request(Method::POST, "files/books").multipart(form)).await?;
        Ok(body.into_inner().secure_url)
    }
}
