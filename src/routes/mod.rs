//! HTTP handlers of the console.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::catalog::CatalogKind;
use crate::domain::session::SessionUser;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

pub mod auth;
pub mod books;
pub mod catalog;
pub mod main;

pub const MSG_CREATED: &str = "Registro creado exitosamente";
pub const MSG_UPDATED: &str = "Registro actualizado exitosamente";
pub const MSG_DELETED: &str = "Registro eliminado exitosamente";

/// Maps a flash level to the Bootstrap alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: alerts, signed-in user and navigation.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&SessionUser>,
    current_page: &str,
    server_config: &ServerConfig,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert(
        "current_user_name",
        &user.map(SessionUser::display_name).unwrap_or_default(),
    );
    context.insert("current_page", current_page);
    let catalog_nav = CatalogKind::ALL
        .iter()
        .map(|kind| (kind.as_str(), kind.title()))
        .collect::<Vec<_>>();
    context.insert("catalog_nav", &catalog_nav);
    context.insert("search_debounce_ms", &server_config.search_debounce_ms);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Flashes the error and redirects, or answers `401` for an expired session.
pub fn error_redirect(err: &ServiceError, location: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        err => {
            FlashMessage::error(err.user_message()).send();
            redirect(location)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_points_to_location() {
        let response = redirect("/books?page=2");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/books?page=2"
        );
    }

    #[test]
    fn flash_levels_map_to_bootstrap_alerts() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Warning), "warning");
        assert_eq!(alert_level_to_str(&Level::Success), "success");
        assert_eq!(alert_level_to_str(&Level::Info), "info");
        assert_eq!(alert_level_to_str(&Level::Debug), "info");
    }
}
