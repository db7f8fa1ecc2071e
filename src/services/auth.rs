//! Login, registration and logout workflows.

use crate::api::{ApiError, AuthGateway};
use crate::domain::session::{AuthGrant, SessionContext, SessionStore, SessionUser};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::services::{ServiceError, ServiceResult};

fn start_session<S>(store: &S, grant: AuthGrant) -> ServiceResult<SessionUser>
where
    S: SessionStore + ?Sized,
{
    let user = grant.user.clone();
    let session = store.load()?.login(grant);
    store.save(&session)?;
    log::info!("User {} signed in", user.email);
    Ok(user)
}

fn auth_error(err: ApiError) -> ServiceError {
    match err {
        // The backend answers 401 for wrong credentials.
        ApiError::Unauthorized => {
            ServiceError::Backend("Credenciales inválidas".to_string())
        }
        other => ServiceError::from(other),
    }
}

pub async fn login<A, S>(api: &A, store: &S, form: LoginForm) -> ServiceResult<SessionUser>
where
    A: AuthGateway + ?Sized,
    S: SessionStore + ?Sized,
{
    let request = form.into_request()?;
    let grant = api.login(&request).await.map_err(auth_error)?;
    start_session(store, grant)
}

pub async fn register<A, S>(api: &A, store: &S, form: RegisterForm) -> ServiceResult<SessionUser>
where
    A: AuthGateway + ?Sized,
    S: SessionStore + ?Sized,
{
    let request = form.into_request()?;
    let grant = api.register(&request).await.map_err(auth_error)?;
    start_session(store, grant)
}

/// Ends the session.
///
/// The backend call is best effort; the local session is always cleared.
pub async fn logout<A, S>(api: &A, store: &S)
where
    A: AuthGateway + ?Sized,
    S: SessionStore + ?Sized,
{
    let session = store.load().unwrap_or_else(|err| {
        log::warn!("Unreadable session on logout: {err}");
        SessionContext::Anonymous
    });

    if let Some(user) = session.user()
        && let Err(err) = api.logout(&user.id).await
    {
        log::error!("Backend logout failed for {}: {err}", user.email);
    }

    store.clear();
}
