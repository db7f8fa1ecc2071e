use actix_web::{Responder, get};

use crate::routes::redirect;
use crate::services::books::BOOKS_PATH;
use crate::session::AuthenticatedUser;

#[get("/")]
pub async fn show_index(_user: AuthenticatedUser) -> impl Responder {
    redirect(BOOKS_PATH)
}
