use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Serialize;
use tera::{Context, Tera};

use crate::api::http::HttpInventoryApi;
use crate::domain::session::SessionStore;
use crate::forms::FieldErrors;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::middleware::LOGIN_PATH;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth as auth_service;
use crate::services::books::BOOKS_PATH;
use crate::session::CookieSession;

fn is_signed_in(store: &CookieSession) -> bool {
    store
        .load()
        .map(|session| session.is_authenticated())
        .unwrap_or(false)
}

fn render_auth_page<F: Serialize>(
    tera: &Tera,
    mut context: Context,
    template: &str,
    form: &F,
    err: Option<ServiceError>,
) -> HttpResponse {
    let (errors, form_error) = match err {
        None => (FieldErrors::default(), None),
        Some(ServiceError::Form(errors)) => (errors, None),
        Some(err) => (FieldErrors::default(), Some(err.user_message())),
    };
    context.insert("form", form);
    context.insert("errors", &errors);
    context.insert("form_error", &form_error);
    render_template(tera, template, &context)
}

#[get("/login")]
pub async fn show_login(
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if is_signed_in(&CookieSession::new(session)) {
        return redirect(BOOKS_PATH);
    }
    let context = base_context(&flash_messages, None, "login", &server_config);
    render_auth_page(&tera, context, "auth/login.html", &LoginForm::default(), None)
}

#[post("/login")]
pub async fn login(
    session: Session,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let store = CookieSession::new(session);
    let api = api.with_token(None);

    match auth_service::login(&api, &store, form.clone()).await {
        Ok(user) => {
            FlashMessage::success(format!("Bienvenido, {}", user.display_name())).send();
            redirect(BOOKS_PATH)
        }
        Err(err) => {
            log::warn!("Login rejected for {}: {err}", form.email);
            let context = base_context(&flash_messages, None, "login", &server_config);
            render_auth_page(&tera, context, "auth/login.html", &form, Some(err))
        }
    }
}

#[get("/register")]
pub async fn show_register(
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if is_signed_in(&CookieSession::new(session)) {
        return redirect(BOOKS_PATH);
    }
    let context = base_context(&flash_messages, None, "register", &server_config);
    render_auth_page(
        &tera,
        context,
        "auth/register.html",
        &RegisterForm::default(),
        None,
    )
}

#[post("/register")]
pub async fn register(
    session: Session,
    api: web::Data<HttpInventoryApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let store = CookieSession::new(session);
    let api = api.with_token(None);

    match auth_service::register(&api, &store, form.clone()).await {
        Ok(user) => {
            FlashMessage::success(format!("Cuenta creada, bienvenido {}", user.display_name()))
                .send();
            redirect(BOOKS_PATH)
        }
        Err(err) => {
            log::warn!("Registration rejected for {}: {err}", form.email);
            let context = base_context(&flash_messages, None, "register", &server_config);
            render_auth_page(&tera, context, "auth/register.html", &form, Some(err))
        }
    }
}

#[post("/logout")]
pub async fn logout(session: Session, api: web::Data<HttpInventoryApi>) -> impl Responder {
    let store = CookieSession::new(session);
    let token = store
        .load()
        .ok()
        .and_then(|session| session.access_token().map(str::to_string));
    let api = api.with_token(token.as_deref());

    auth_service::logout(&api, &store).await;

    FlashMessage::info("Sesión cerrada").send();
    redirect(LOGIN_PATH)
}
