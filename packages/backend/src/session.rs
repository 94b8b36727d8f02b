//! # Session assembly: credential exchange and enrichment
//!
//! A session is built in two steps:
//!
//! 1. **[`sign_in`]** posts the credentials to the login endpoint. A rejected
//!    login, a response without a bearer token, or a transport failure all
//!    yield `None` (logged, never propagated). The user id comes from the
//!    login response, or from the token's `userId` claim when the response
//!    omits it.
//! 2. **[`enrich`]** fetches `/users/all-info` with the bearer token and merges
//!    the profile fields into the session. A failed fetch is logged and leaves
//!    the session as it was: the token stays, profile fields stay empty (or
//!    stale, on refresh). Login still succeeds in that case.
//!
//! [`SessionToken`] is what the server keeps; [`SessionUser`] is the part that
//! may be sent to the browser (it never contains the bearer token).

use serde::{Deserialize, Serialize};

use crate::client::Backend;
use crate::error::BackendError;
use crate::models::{present, AccountInfo, Credentials, RegisterRequest, SocialLink};
use crate::token::TokenClaims;

/// Server-side session: bearer token plus cached profile snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub user: SessionUser,
}

/// Client-safe session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub artist_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub link1: Option<String>,
    pub link2: Option<String>,
    pub link3: Option<String>,
}

impl SessionUser {
    /// Overwrite the cached profile fields with a fresh `/users/all-info` answer.
    ///
    /// Identity fields (`user_id`, `email`) are only replaced when the answer carries them.
    pub fn merge(&mut self, info: AccountInfo) {
        if info.user_id.is_some() {
            self.user_id = info.user_id;
        }
        if info.user_mail.is_some() {
            self.email = info.user_mail;
        }
        self.user_name = info.user_name;
        self.artist_name = info.artist_name;
        self.bio = info.bio;
        self.avatar = info.user_avatar;
        self.link1 = info.user_link1;
        self.link2 = info.user_link2;
        self.link3 = info.user_link3;
    }

    pub fn link(&self, link: SocialLink) -> Option<&str> {
        match link {
            SocialLink::Instagram => present(&self.link1),
            SocialLink::Spotify => present(&self.link2),
            SocialLink::YouTube => present(&self.link3),
        }
    }

    /// Artist name, then username, then email.
    pub fn display_name(&self) -> &str {
        present(&self.artist_name)
            .or_else(|| present(&self.user_name))
            .or_else(|| present(&self.email))
            .unwrap_or("Artista")
    }
}

impl SessionToken {
    pub fn claims(&self) -> Result<TokenClaims, BackendError> {
        TokenClaims::decode(&self.access_token)
    }

    /// Unreadable tokens count as expired.
    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        self.claims()
            .map(|c| c.is_expired_at(now_secs))
            .unwrap_or(true)
    }
}

/// Exchange credentials for an enriched session. `None` means "not signed in".
pub async fn sign_in<B: Backend>(backend: &B, email: &str, password: &str) -> Option<SessionToken> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return None;
    }

    let response = match backend.login(&Credentials::new(email, password)).await {
        Ok(response) => response,
        Err(BackendError::Status { status, message }) => {
            tracing::warn!(status, %message, "Login rejected");
            return None;
        }
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            return None;
        }
    };

    let Some(bearer) = response.bearer() else {
        tracing::warn!("Login response carried no token");
        return None;
    };

    let user_id = match response.user_id() {
        Some(id) => Some(id.to_string()),
        None => match TokenClaims::decode(bearer) {
            Ok(claims) => claims.user_id,
            Err(e) => {
                tracing::error!("Failed to decode token: {}", e);
                None
            }
        },
    };

    let mut session = SessionToken {
        access_token: bearer.to_string(),
        user: SessionUser {
            user_id,
            email: Some(email.to_string()),
            ..Default::default()
        },
    };
    enrich(backend, &mut session).await;
    Some(session)
}

/// Refresh the cached profile fields. Returns whether the fetch succeeded.
pub async fn enrich<B: Backend>(backend: &B, session: &mut SessionToken) -> bool {
    if session.access_token.is_empty() {
        tracing::error!("Session has no access token");
        return false;
    }

    match backend.account_info(&session.access_token).await {
        Ok(info) => {
            session.user.merge(info);
            true
        }
        Err(e) => {
            tracing::error!("Failed to fetch account info: {}", e);
            false
        }
    }
}

/// Create an account, then sign in with the same credentials.
///
/// When the account is created but the sign-in fails, the error says so
/// ([`BackendError::Registered`]) instead of reporting an expired session.
pub async fn register<B: Backend>(
    backend: &B,
    name: &str,
    email: &str,
    password: &str,
) -> Result<SessionToken, BackendError> {
    let request = RegisterRequest {
        user_name: name.trim().to_string(),
        user_mail: email.trim().to_string(),
        user_password: password.to_string(),
    };
    backend.register(&request).await?;

    sign_in(backend, &request.user_mail, password)
        .await
        .ok_or(BackendError::Registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Endpoint, MemoryBackend};

    const NOW: u64 = 1_750_000_000;

    fn backend_with_artist() -> (MemoryBackend, String) {
        let backend = MemoryBackend::new();
        let id = backend.add_account("kiko", "kiko@tipme.dev", "segredo123");
        backend.set_profile(&id, |account| {
            account.artist_name = Some("Kiko Distorção".into());
            account.bio = Some("Noise rock de garagem".into());
            account.links[0] = Some("https://instagram.com/kiko".into());
        });
        (backend, id)
    }

    #[tokio::test]
    async fn test_sign_in_populates_session() {
        let (backend, id) = backend_with_artist();

        let session = sign_in(&backend, "kiko@tipme.dev", "segredo123")
            .await
            .expect("valid credentials");

        assert!(!session.access_token.is_empty());
        assert_eq!(session.user.user_id.as_deref(), Some(id.as_str()));
        assert_eq!(session.user.artist_name.as_deref(), Some("Kiko Distorção"));
        assert_eq!(session.user.user_name.as_deref(), Some("kiko"));
        assert_eq!(session.user.link(SocialLink::Instagram), Some("https://instagram.com/kiko"));
        assert!(!session.is_expired_at(NOW));
    }

    #[tokio::test]
    async fn test_invalid_credentials_yield_no_session() {
        let (backend, _) = backend_with_artist();
        assert!(sign_in(&backend, "kiko@tipme.dev", "errada").await.is_none());
        assert!(sign_in(&backend, "ninguem@tipme.dev", "segredo123").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_credentials_skip_the_request() {
        let (backend, _) = backend_with_artist();
        assert!(sign_in(&backend, "  ", "segredo123").await.is_none());
        assert!(sign_in(&backend, "kiko@tipme.dev", "").await.is_none());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_yields_no_session() {
        let (backend, _) = backend_with_artist();
        backend.fail(Endpoint::Login);
        assert!(sign_in(&backend, "kiko@tipme.dev", "segredo123").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_enrichment_keeps_token() {
        let (backend, id) = backend_with_artist();
        backend.fail(Endpoint::AccountInfo);

        let session = sign_in(&backend, "kiko@tipme.dev", "segredo123")
            .await
            .expect("login still succeeds");

        assert!(!session.access_token.is_empty());
        assert_eq!(session.user.user_id.as_deref(), Some(id.as_str()));
        assert_eq!(session.user.artist_name, None);
        assert_eq!(session.user.bio, None);
        assert_eq!(session.user.avatar, None);
    }

    #[tokio::test]
    async fn test_user_id_falls_back_to_token_claim() {
        let (backend, id) = backend_with_artist();
        backend.omit_login_user_id(true);
        backend.fail(Endpoint::AccountInfo);

        let session = sign_in(&backend, "kiko@tipme.dev", "segredo123").await.unwrap();
        assert_eq!(session.user.user_id.as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_stale_fields() {
        let (backend, id) = backend_with_artist();
        let mut session = sign_in(&backend, "kiko@tipme.dev", "segredo123").await.unwrap();

        backend.set_profile(&id, |account| account.artist_name = Some("Kiko".into()));
        backend.fail(Endpoint::AccountInfo);
        assert!(!enrich(&backend, &mut session).await);
        assert_eq!(session.user.artist_name.as_deref(), Some("Kiko Distorção"));

        backend.recover(Endpoint::AccountInfo);
        assert!(enrich(&backend, &mut session).await);
        assert_eq!(session.user.artist_name.as_deref(), Some("Kiko"));
    }

    #[tokio::test]
    async fn test_register_then_sign_in() {
        let backend = MemoryBackend::new();
        let session = register(&backend, " Nova Banda ", "banda@tipme.dev", "senha-forte")
            .await
            .unwrap();
        assert_eq!(session.user.user_name.as_deref(), Some("Nova Banda"));
        assert_eq!(session.user.email.as_deref(), Some("banda@tipme.dev"));

        let err = register(&backend, "Outra", "banda@tipme.dev", "senha-forte")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn test_failed_sign_in_after_register_keeps_the_account() {
        let backend = MemoryBackend::new();
        backend.fail(Endpoint::Login);

        let err = register(&backend, "Banda Fantasma", "fantasma@tipme.dev", "senha-forte")
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::Registered);
        assert_ne!(err.to_string(), BackendError::Unauthenticated.to_string());

        backend.recover(Endpoint::Login);
        assert!(sign_in(&backend, "fantasma@tipme.dev", "senha-forte").await.is_some());
    }

    #[test]
    fn test_unreadable_token_counts_as_expired() {
        let session = SessionToken {
            access_token: "opaque".into(),
            user: SessionUser::default(),
        };
        assert!(session.is_expired_at(NOW));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = SessionUser {
            email: Some("a@b.c".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "a@b.c");
        user.user_name = Some("ana".into());
        assert_eq!(user.display_name(), "ana");
        user.artist_name = Some("Ana Ruído".into());
        assert_eq!(user.display_name(), "Ana Ruído");
    }
}
