use actix_multipart::form::MultipartForm;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::api::http::HttpInventoryApi;
use crate::domain::book::Book;
use crate::domain::query::{FilterKey, FilterParams};
use crate::domain::types::BookId;
use crate::dto::books::FilterOptions;
use crate::forms::FieldErrors;
use crate::forms::book::{BookForm, BookUploadForm};
use crate::models::config::ServerConfig;
use crate::routes::{
    MSG_CREATED, MSG_DELETED, MSG_UPDATED, base_context, error_redirect, redirect,
    render_template,
};
use crate::services::books::{self as books_service, BOOKS_PATH};
use crate::services::export::{self as export_service, EXPORT_FILENAME};
use crate::services::ServiceError;
use crate::session::AuthenticatedUser;

/// Values posted by the filter controls on top of the current parameters.
#[derive(Deserialize)]
pub struct FilterChange {
    pub key: FilterKey,
    #[serde(default)]
    pub value: Option<String>,
}

fn parse_book_id(raw: &str) -> Option<BookId> {
    match BookId::parse(raw) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!("Rejected book id '{raw}': {err}");
            None
        }
    }
}

fn not_found() -> HttpResponse {
    FlashMessage::error("Libro no encontrado").send();
    redirect(BOOKS_PATH)
}

#[get("/books")]
pub async fn show_books(
    req: HttpRequest,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api.with_token(Some(&user.access_token));
    let params = FilterParams::parse(req.query_string());

    match books_service::load_books_page(&api, params, server_config.page_size).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user.user), "books", &server_config);
            context.insert("books", &data.books);
            context.insert("load_error", &data.load_error);
            context.insert("query", &data.query);
            context.insert("params", &data.params);
            context.insert("query_string", &data.query_string);
            context.insert("options", &data.options);
            context.insert("sort_fields", &data.sort_fields);
            context.insert("sort_orders", &data.sort_orders);
            context.insert("has_filters", &data.query.has_filters());
            render_template(&tera, "books/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to render the book list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Applies one filter change and redirects to the rewritten list URL.
#[get("/books/filter")]
pub async fn filter_books(
    req: HttpRequest,
    _user: AuthenticatedUser,
    change: web::Query<FilterChange>,
) -> impl Responder {
    let change = change.into_inner();
    let params = FilterParams::parse(req.query_string());
    redirect(&books_service::filter_location(
        params,
        change.key,
        change.value,
    ))
}

#[get("/books/export.csv")]
pub async fn export_books(
    req: HttpRequest,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
) -> impl Responder {
    let api = api.with_token(Some(&user.access_token));
    let params = FilterParams::parse(req.query_string()).normalized();
    let back = format!("{BOOKS_PATH}{}", params.href_suffix());

    match export_service::export_books(&api, params).await {
        Ok(Some(csv)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ))
            .body(csv),
        Ok(None) => {
            FlashMessage::info("No hay datos para exportar con los filtros aplicados.").send();
            redirect(&back)
        }
        Err(err) => error_redirect(&err, &back),
    }
}

struct FormPage<'a> {
    book: Option<&'a Book>,
    form: &'a BookForm,
    errors: &'a FieldErrors,
    form_error: Option<String>,
    options: &'a FilterOptions,
}

fn render_form(
    tera: &Tera,
    mut context: Context,
    page: FormPage<'_>,
) -> HttpResponse {
    let action = match page.book {
        Some(book) => format!("{BOOKS_PATH}/{}/edit", book.id),
        None => format!("{BOOKS_PATH}/new"),
    };
    context.insert("book", &page.book);
    context.insert("form", page.form);
    context.insert("errors", page.errors);
    context.insert("form_error", &page.form_error);
    context.insert("options", page.options);
    context.insert("action", &action);
    render_template(tera, "books/form.html", &context)
}

/// Re-renders the form after a failed submission.
async fn render_failed_submission(
    api: &HttpInventoryApi,
    tera: &Tera,
    context: Context,
    book: Option<&Book>,
    form: &BookForm,
    err: ServiceError,
) -> HttpResponse {
    let (errors, form_error) = match err {
        ServiceError::Unauthorized => return HttpResponse::Unauthorized().finish(),
        ServiceError::Form(errors) => (errors, None),
        err => (FieldErrors::default(), Some(err.user_message())),
    };

    let options = match books_service::load_filter_options(api).await {
        Ok(options) => options,
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to reload form options: {err}");
            FilterOptions::default()
        }
    };

    render_form(
        tera,
        context,
        FormPage {
            book,
            form,
            errors: &errors,
            form_error,
            options: &options,
        },
    )
}

#[get("/books/new")]
pub async fn new_book(
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api.with_token(Some(&user.access_token));

    match books_service::load_book_form(&api, None).await {
        Ok(data) => {
            let context = base_context(&flash_messages, Some(&user.user), "books", &server_config);
            render_form(
                &tera,
                context,
                FormPage {
                    book: None,
                    form: &BookForm {
                        availability: true,
                        ..BookForm::default()
                    },
                    errors: &FieldErrors::default(),
                    form_error: None,
                    options: &data.options,
                },
            )
        }
        Err(err) => error_redirect(&err, BOOKS_PATH),
    }
}

#[post("/books/new")]
pub async fn create_book(
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    MultipartForm(upload): MultipartForm<BookUploadForm>,
) -> impl Responder {
    let api = api.with_token(Some(&user.access_token));
    let (form, image) = upload.into_parts();

    match books_service::save_book(&api, None, form.clone(), image).await {
        Ok(book) => {
            FlashMessage::success(MSG_CREATED).send();
            redirect(&format!("{BOOKS_PATH}/{}", book.id))
        }
        Err(err) => {
            log::warn!("Book creation rejected: {err}");
            let context = base_context(&flash_messages, Some(&user.user), "books", &server_config);
            render_failed_submission(&api, &tera, context, None, &form, err).await
        }
    }
}

#[get("/books/{id}")]
pub async fn show_book(
    id: web::Path<String>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(id) = parse_book_id(&id) else {
        return not_found();
    };
    let api = api.with_token(Some(&user.access_token));

    match books_service::load_book(&api, id).await {
        Ok(book) => {
            let mut context =
                base_context(&flash_messages, Some(&user.user), "books", &server_config);
            context.insert("book", &book);
            render_template(&tera, "books/detail.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => error_redirect(&err, BOOKS_PATH),
    }
}

#[get("/books/{id}/edit")]
pub async fn edit_book(
    id: web::Path<String>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(id) = parse_book_id(&id) else {
        return not_found();
    };
    let api = api.with_token(Some(&user.access_token));

    match books_service::load_book_form(&api, Some(id)).await {
        Ok(data) => {
            let context = base_context(&flash_messages, Some(&user.user), "books", &server_config);
            let form = data.book.as_ref().map(BookForm::from_book).unwrap_or_default();
            render_form(
                &tera,
                context,
                FormPage {
                    book: data.book.as_ref(),
                    form: &form,
                    errors: &FieldErrors::default(),
                    form_error: None,
                    options: &data.options,
                },
            )
        }
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => error_redirect(&err, BOOKS_PATH),
    }
}

#[post("/books/{id}/edit")]
pub async fn update_book(
    id: web::Path<String>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    MultipartForm(upload): MultipartForm<BookUploadForm>,
) -> impl Responder {
    let Some(id) = parse_book_id(&id) else {
        return not_found();
    };
    let api = api.with_token(Some(&user.access_token));
    let (form, image) = upload.into_parts();

    match books_service::save_book(&api, Some(id), form.clone(), image).await {
        Ok(book) => {
            FlashMessage::success(MSG_UPDATED).send();
            redirect(&format!("{BOOKS_PATH}/{}", book.id))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => {
            log::warn!("Book update rejected: {err}");
            let book = match books_service::load_book(&api, id).await {
                Ok(book) => book,
                Err(err) => return error_redirect(&err, BOOKS_PATH),
            };
            let context = base_context(&flash_messages, Some(&user.user), "books", &server_config);
            render_failed_submission(&api, &tera, context, Some(&book), &form, err).await
        }
    }
}

#[post("/books/{id}/delete")]
pub async fn delete_book(
    id: web::Path<String>,
    user: AuthenticatedUser,
    api: web::Data<HttpInventoryApi>,
) -> impl Responder {
    let Some(id) = parse_book_id(&id) else {
        return not_found();
    };
    let api = api.with_token(Some(&user.access_token));

    match books_service::delete_book(&api, id).await {
        Ok(()) => {
            FlashMessage::success(MSG_DELETED).send();
            redirect(BOOKS_PATH)
        }
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => error_redirect(&err, &format!("{BOOKS_PATH}/{id}")),
    }
}
