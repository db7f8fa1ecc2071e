use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::api::http::HttpInventoryApi;
use crate::domain::catalog::CatalogKind;
use crate::domain::query::FilterParams;
use crate::domain::types::EntryId;
use crate::forms::FieldErrors;
use crate::forms::catalog::EntryForm;
use crate::models::config::ServerConfig;
use crate::routes::{
    MSG_CREATED, MSG_DELETED, MSG_UPDATED, base_context, error_redirect, redirect,
    render_template,
};
use crate::services::ServiceError;
use crate::services::catalog::{self as catalog_service, list_path};
use crate::session::AuthenticatedUser;

fn parse_kind(raw: &str) -> Option<CatalogKind> {
    raw.parse::<CatalogKind>().ok()
}

fn parse_entry(raw: &str) -> Option<EntryId> {
    EntryId::parse(raw).ok()
}

/// Redirect target after a mutation; keeps the list filters when present.
fn back_to(kind: CatalogKind, req: &HttpRequest) -> String {
    let params = FilterParams::parse(req.query_string()).normalized();
    format!("{}{}", list_path(kind), params.href_suffix())
}

fn mutation_result<T>(
    result: Result<T, ServiceError>,
    success: &str,
    location: &str,
) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
            redirect(location)
        }
        Err(err) => {
            log::warn!("Catalog change rejected: {err}");
            error_redirect(&err, location)
        }
    }
}

/// Name rejected by validation, shown again next to the input it came from.
///
/// `entry` is `None` for the add row.
#[derive(Default)]
struct RejectedName {
    entry: Option<EntryId>,
    name: String,
    errors: FieldErrors,
}

async fn render_catalog(
    api: &HttpInventoryApi,
    tera: &Tera,
    mut context: Context,
    kind: CatalogKind,
    params: FilterParams,
    page_size: u32,
    rejected: RejectedName,
) -> HttpResponse {
    match catalog_service::load_catalog_page(api, kind, params, page_size).await {
        Ok(data) => {
            context.insert("kind", kind.as_str());
            context.insert("title", kind.title());
            context.insert("singular", kind.singular());
            context.insert("entries", &data.entries);
            context.insert("load_error", &data.load_error);
            context.insert("params", &data.params);
            context.insert("query_string", &data.query_string);
            context.insert("errors", &rejected.errors);
            context.insert("posted_name", &rejected.name);
            context.insert("editing_id", &rejected.entry.map(|id| id.to_string()));
            render_template(tera, "catalog/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to render {kind}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/{kind}")]
pub async fn show_catalog(
    req: HttpRequest,
    kind: web::Path<String>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(kind) = parse_kind(&kind) else {
        return HttpResponse::NotFound().finish();
    };
    let api = api.with_token(Some(&user.access_token));
    let context = base_context(&flash_messages, Some(&user.user), kind.as_str(), &server_config);

    render_catalog(
        &api,
        &tera,
        context,
        kind,
        FilterParams::parse(req.query_string()),
        server_config.page_size,
        RejectedName::default(),
    )
    .await
}

#[post("/{kind}/add")]
pub async fn add_entry(
    req: HttpRequest,
    kind: web::Path<String>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<EntryForm>,
) -> impl Responder {
    let Some(kind) = parse_kind(&kind) else {
        return HttpResponse::NotFound().finish();
    };
    let api = api.with_token(Some(&user.access_token));
    let name = form.name.clone();

    match catalog_service::create_entry(&api, kind, form).await {
        Err(ServiceError::Form(errors)) => {
            let context =
                base_context(&flash_messages, Some(&user.user), kind.as_str(), &server_config);
            render_catalog(
                &api,
                &tera,
                context,
                kind,
                FilterParams::parse(req.query_string()),
                server_config.page_size,
                RejectedName {
                    entry: None,
                    name,
                    errors,
                },
            )
            .await
        }
        result => mutation_result(result, MSG_CREATED, &back_to(kind, &req)),
    }
}

#[post("/{kind}/{id}/save")]
pub async fn save_entry(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<EntryForm>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let (Some(kind), Some(id)) = (parse_kind(&kind), parse_entry(&id)) else {
        return HttpResponse::NotFound().finish();
    };
    let api = api.with_token(Some(&user.access_token));
    let name = form.name.clone();

    match catalog_service::update_entry(&api, kind, id, form).await {
        Err(ServiceError::Form(errors)) => {
            let context =
                base_context(&flash_messages, Some(&user.user), kind.as_str(), &server_config);
            render_catalog(
                &api,
                &tera,
                context,
                kind,
                FilterParams::parse(req.query_string()),
                server_config.page_size,
                RejectedName {
                    entry: Some(id),
                    name,
                    errors,
                },
            )
            .await
        }
        result => mutation_result(result, MSG_UPDATED, &back_to(kind, &req)),
    }
}

#[post("/{kind}/{id}/delete")]
pub async fn delete_entry(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let (Some(kind), Some(id)) = (parse_kind(&kind), parse_entry(&id)) else {
        return HttpResponse::NotFound().finish();
    };
    let api = api.with_token(Some(&user.access_token));

    let result = catalog_service::delete_entry(&api, kind, id).await;
    mutation_result(result, MSG_DELETED, &back_to(kind, &req))
}
