//! Reading and writing the [`SessionToken`] kept in the server-side session store.

use std::time::{SystemTime, UNIX_EPOCH};

use backend::{BackendError, SessionToken, SessionUser};
use dioxus::prelude::ServerFnError;
use tower_sessions::Session;

/// Key for storing the session token in the session store.
pub const SESSION_TOKEN_KEY: &str = "tipme_session";

/// Seconds since the Unix epoch, for comparing against the token `exp` claim.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn load_session(session: &Session) -> Result<Option<SessionToken>, ServerFnError> {
    session
        .get(SESSION_TOKEN_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

pub async fn store_session(session: &Session, token: &SessionToken) -> Result<(), ServerFnError> {
    session
        .insert(SESSION_TOKEN_KEY, token)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

pub async fn clear_session(session: &Session) -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// The stored session, provided its bearer token has not expired.
pub async fn require_token(session: &Session) -> Result<SessionToken, ServerFnError> {
    match load_session(session).await? {
        Some(token) if !token.is_expired_at(now_secs()) => Ok(token),
        Some(_) => {
            tracing::debug!("Session token expired");
            Err(ServerFnError::new(BackendError::Unauthenticated.to_string()))
        }
        None => Err(ServerFnError::new(BackendError::Unauthenticated.to_string())),
    }
}

/// The signed-in artist, or `None` when there is no session or its token expired.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, ServerFnError> {
    let Some(token) = load_session(session).await? else {
        return Ok(None);
    };
    if token.is_expired_at(now_secs()) {
        tracing::debug!("Stored session token expired");
        return Ok(None);
    }
    Ok(Some(token.user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use backend::token::{encode_unsigned, TokenClaims};
    use tower_sessions::MemoryStore;

    fn empty_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn token_expiring_at(exp: u64) -> SessionToken {
        let mut token = SessionToken {
            access_token: encode_unsigned(&TokenClaims {
                user_id: Some("7".into()),
                exp: Some(exp),
            }),
            ..Default::default()
        };
        token.user.user_id = Some("7".into());
        token.user.artist_name = Some("Mel".into());
        token
    }

    #[tokio::test]
    async fn test_valid_token_is_returned() {
        let session = empty_session();
        let token = token_expiring_at(now_secs() + 3600);
        store_session(&session, &token).await.unwrap();

        assert_eq!(require_token(&session).await.unwrap(), token);
        let user = current_user(&session).await.unwrap().unwrap();
        assert_eq!(user.artist_name.as_deref(), Some("Mel"));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let session = empty_session();
        store_session(&session, &token_expiring_at(1)).await.unwrap();

        let err = require_token(&session).await.unwrap_err();
        assert!(matches!(
            err,
            ServerFnError::ServerError { ref message, .. }
                if *message == BackendError::Unauthenticated.to_string()
        ));
        assert_eq!(current_user(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_session_is_unauthenticated() {
        let session = empty_session();
        assert!(require_token(&session).await.is_err());
        assert_eq!(current_user(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cleared_session_forgets_the_token() {
        let session = empty_session();
        store_session(&session, &token_expiring_at(now_secs() + 3600)).await.unwrap();
        clear_session(&session).await.unwrap();

        assert_eq!(load_session(&session).await.unwrap(), None);
    }
}
