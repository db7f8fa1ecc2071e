//! Console session state.
//!
//! A [`SessionContext`] is a plain value: logging in and out are pure
//! transitions, and persistence is delegated to whatever [`SessionStore`] the
//! caller injects (the cookie session in the server, memory in tests).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{UserEmail, UserId};

/// Authenticated console user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub email: UserEmail,
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SessionUser {
    /// Name shown in the header, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.email.as_str())
    }
}

/// Credentials granted by the auth backend after login or registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthGrant {
    pub user: SessionUser,
    pub access_token: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionContext {
    #[default]
    Anonymous,
    Authenticated {
        user: SessionUser,
        access_token: String,
    },
}

impl SessionContext {
    /// Transition into an authenticated session, replacing any previous one.
    #[must_use]
    pub fn login(self, grant: AuthGrant) -> Self {
        Self::Authenticated {
            user: grant.user,
            access_token: grant.access_token,
        }
    }

    /// Transition back to an anonymous session.
    #[must_use]
    pub fn logout(self) -> Self {
        Self::Anonymous
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { access_token, .. } => Some(access_token),
            Self::Anonymous => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("session storage error: {0}")]
pub struct SessionStoreError(pub String);

/// Storage collaborator persisting the session between requests.
pub trait SessionStore {
    fn load(&self) -> Result<SessionContext, SessionStoreError>;
    fn save(&self, context: &SessionContext) -> Result<(), SessionStoreError>;
    fn clear(&self);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct MemoryStore(RefCell<Option<SessionContext>>);

    impl SessionStore for MemoryStore {
        fn load(&self) -> Result<SessionContext, SessionStoreError> {
            Ok(self.0.borrow().clone().unwrap_or_default())
        }

        fn save(&self, context: &SessionContext) -> Result<(), SessionStoreError> {
            *self.0.borrow_mut() = Some(context.clone());
            Ok(())
        }

        fn clear(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    fn grant() -> AuthGrant {
        AuthGrant {
            user: SessionUser {
                id: UserId::new("u-1").unwrap(),
                email: UserEmail::new("ana@example.com").unwrap(),
                name: None,
                roles: vec!["admin".to_string()],
            },
            access_token: "token".to_string(),
        }
    }

    #[test]
    fn login_and_logout_are_pure_transitions() {
        let session = SessionContext::default().login(grant());
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("token"));
        assert_eq!(session.user().map(SessionUser::display_name), Some("ana@example.com"));

        let session = session.logout();
        assert_eq!(session, SessionContext::Anonymous);
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn store_persists_transitions() {
        let store = MemoryStore::default();
        let session = store.load().unwrap().login(grant());
        store.save(&session).unwrap();
        assert!(store.load().unwrap().is_authenticated());

        store.clear();
        assert_eq!(store.load().unwrap(), SessionContext::Anonymous);
    }
}
