//! # API crate: shared fullstack server functions for TipMe
//!
//! This crate is the bridge between the browser and the TipMe REST backend. It defines
//! every Dioxus server function the web frontend calls. The browser never talks to the
//! backend directly and never sees the bearer token: the token lives in the server-side
//! session (`tower-sessions`), and only the client-safe [`SessionUser`] crosses the wire.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | - | Session store access: load, store, clear, require an unexpired token |
//! | [`config`] | `server` | Layered settings (`tipme.toml` + environment) for backend URL, timeout and session cookie |
//! | [`remote`] | - | Shared [`backend::HttpBackend`] (lazy `OnceCell` singleton) |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - **Authentication**: `get_session`, `login`, `register`, `logout`, `refresh_session`
//! - **Public profile & donations**: `get_public_profile`, `request_pix`
//! - **Settings**: `update_settings`, `update_avatar`, `delete_account`

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod remote;

pub use backend::{FieldReport, PublicProfile, SessionUser, SettingsField, SettingsUpdate, SocialLink};

#[cfg(feature = "server")]
fn server_error(e: impl std::fmt::Display) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

#[cfg(feature = "server")]
async fn backend_client() -> Result<&'static backend::HttpBackend, ServerFnError> {
    remote::get_backend().await.map_err(|e| {
        tracing::error!("Backend client unavailable: {:#}", e);
        server_error(e)
    })
}

/// Get the signed-in artist, or `None` when there is no session or its token expired.
#[cfg(feature = "server")]
#[get("/api/auth/session", session: tower_sessions::Session)]
pub async fn get_session() -> Result<Option<SessionUser>, ServerFnError> {
    auth::current_user(&session).await
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/session")]
pub async fn get_session() -> Result<Option<SessionUser>, ServerFnError> {
    Ok(None)
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    let backend = backend_client().await?;

    let Some(token) = backend::session::sign_in(backend, &email, &password).await else {
        return Err(ServerFnError::new("Credenciais inválidas"));
    };

    session.cycle_id().await.map_err(server_error)?;
    auth::store_session(&session, &token).await?;

    Ok(token.user)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an account, then sign in with it.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    name: String,
    email: String,
    password: String,
) -> Result<SessionUser, ServerFnError> {
    let backend = backend_client().await?;

    let token = backend::session::register(backend, &name, &email, &password)
        .await
        .map_err(|e| {
            tracing::error!("Registration failed: {}", e);
            server_error(e)
        })?;

    session.cycle_id().await.map_err(server_error)?;
    auth::store_session(&session, &token).await?;

    Ok(token.user)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    name: String,
    email: String,
    password: String,
) -> Result<SessionUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    auth::clear_session(&session).await
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Re-fetch the profile fields cached in the session.
///
/// A failed fetch keeps the fields the session already had.
#[cfg(feature = "server")]
#[post("/api/auth/refresh", session: tower_sessions::Session)]
pub async fn refresh_session() -> Result<SessionUser, ServerFnError> {
    let mut token = auth::require_token(&session).await?;
    let backend = backend_client().await?;

    if backend::session::enrich(backend, &mut token).await {
        auth::store_session(&session, &token).await?;
    }

    Ok(token.user)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/refresh")]
pub async fn refresh_session() -> Result<SessionUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Fetch an artist's public profile. Unconfigured artists come back with every field empty.
#[cfg(feature = "server")]
#[get("/api/profile/{user_id}")]
pub async fn get_public_profile(user_id: String) -> Result<PublicProfile, ServerFnError> {
    use backend::Backend;

    let backend = backend_client().await?;
    backend.public_profile(&user_id).await.map_err(|e| {
        tracing::error!(%user_id, "Failed to fetch public profile: {}", e);
        server_error(e)
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/profile/{user_id}")]
pub async fn get_public_profile(user_id: String) -> Result<PublicProfile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the PIX "copia e cola" payload for a donation of `amount` reais to `user_id`.
#[cfg(feature = "server")]
#[post("/api/pix/request")]
pub async fn request_pix(user_id: String, amount: f64) -> Result<String, ServerFnError> {
    let backend = backend_client().await?;

    backend::donation::request_pix(backend, &user_id, amount)
        .await
        .map_err(|e| {
            tracing::error!(%user_id, "PIX request failed: {}", e);
            server_error(e)
        })
}

#[cfg(not(feature = "server"))]
#[post("/api/pix/request")]
pub async fn request_pix(user_id: String, amount: f64) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Apply every filled field of `update` concurrently.
///
/// Returns one report per field sent. Fields that succeeded stay applied even when
/// others failed; the session is refreshed whenever at least one succeeded.
#[cfg(feature = "server")]
#[post("/api/settings/update", session: tower_sessions::Session)]
pub async fn update_settings(update: SettingsUpdate) -> Result<Vec<FieldReport>, ServerFnError> {
    update.validate().map_err(server_error)?;

    let mut token = auth::require_token(&session).await?;
    let backend = backend_client().await?;

    let (report, refreshed) =
        backend::settings::apply_to_session(backend, &mut token, &update).await;
    if refreshed {
        auth::store_session(&session, &token).await?;
    }

    Ok(report.reports())
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/update")]
pub async fn update_settings(update: SettingsUpdate) -> Result<Vec<FieldReport>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Switch to one of the preset avatars.
#[cfg(feature = "server")]
#[post("/api/settings/avatar", session: tower_sessions::Session)]
pub async fn update_avatar(avatar_url: String) -> Result<SessionUser, ServerFnError> {
    use backend::settings::{apply_one, FieldUpdate};

    let avatar_url = avatar_url.trim().to_string();
    if avatar_url.is_empty() {
        return Err(ServerFnError::new("Selecione um avatar"));
    }

    let mut token = auth::require_token(&session).await?;
    if token.user.avatar.as_deref() == Some(avatar_url.as_str()) {
        return Err(ServerFnError::new("Este já é o seu avatar atual"));
    }

    let backend = backend_client().await?;
    apply_one(backend, &token.access_token, &FieldUpdate::Avatar(avatar_url))
        .await
        .map_err(|e| {
            tracing::error!("Avatar update failed: {}", e);
            server_error(e)
        })?;

    if backend::session::enrich(backend, &mut token).await {
        auth::store_session(&session, &token).await?;
    }

    Ok(token.user)
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/avatar")]
pub async fn update_avatar(avatar_url: String) -> Result<SessionUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete the signed-in account and end the session.
#[cfg(feature = "server")]
#[post("/api/settings/delete-account", session: tower_sessions::Session)]
pub async fn delete_account(email: String, password: String) -> Result<(), ServerFnError> {
    use backend::models::Credentials;
    use backend::Backend;

    if email.trim().is_empty() || password.is_empty() {
        return Err(ServerFnError::new("Informe email e senha para excluir a conta"));
    }

    let token = auth::require_token(&session).await?;
    let backend = backend_client().await?;

    backend
        .delete_account(&token.access_token, &Credentials::new(email.trim(), password))
        .await
        .map_err(|e| {
            tracing::error!("Account deletion failed: {}", e);
            server_error(e)
        })?;

    tracing::info!(user_id = ?token.user.user_id, "Account deleted");
    auth::clear_session(&session).await
}

#[cfg(not(feature = "server"))]
#[post("/api/settings/delete-account")]
pub async fn delete_account(email: String, password: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
