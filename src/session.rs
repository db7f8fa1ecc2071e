//! Cookie-backed session persistence and the authenticated-user extractor.

use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::session::{SessionContext, SessionStore, SessionStoreError, SessionUser};

const SESSION_KEY: &str = "console_session";

/// [`SessionStore`] over the signed `actix-session` cookie.
pub struct CookieSession(Session);

impl CookieSession {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl SessionStore for CookieSession {
    fn load(&self) -> Result<SessionContext, SessionStoreError> {
        self.0
            .get::<SessionContext>(SESSION_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|e| SessionStoreError(e.to_string()))
    }

    fn save(&self, context: &SessionContext) -> Result<(), SessionStoreError> {
        self.0
            .insert(SESSION_KEY, context)
            .map_err(|e| SessionStoreError(e.to_string()))
    }

    fn clear(&self) {
        self.0.purge();
    }
}

/// Signed-in user and the bearer token for backend calls.
///
/// Extraction fails with `401` for anonymous requests, which
/// [`crate::middleware::RedirectUnauthorized`] turns into a redirect to the
/// login page.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: SessionUser,
    pub access_token: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let store = CookieSession::new(req.get_session());
        let result = match store.load() {
            Ok(SessionContext::Authenticated { user, access_token }) => Ok(Self { user, access_token }),
            Ok(SessionContext::Anonymous) => Err(ErrorUnauthorized("authentication required")),
            Err(err) => {
                log::warn!("Discarding unreadable session: {err}");
                store.clear();
                Err(ErrorUnauthorized("authentication required"))
            }
        };
        ready(result)
    }
}
