//! # Settings updates: single calls and concurrent batches
//!
//! Each profile setting maps to one independent backend call. A settings form
//! collects the edited fields in a [`SettingsUpdate`]; [`apply_all`] turns it
//! into one request per non-empty field, fires them concurrently and waits for
//! every one to settle. There is no compensation: a failed field does not undo
//! or cancel the others, and the backend keeps whatever succeeded.
//!
//! The outcome is a [`BatchReport`] with one [`FieldOutcome`] per request, so a
//! partial success is visible field by field. [`BatchReport::into_result`]
//! collapses it to a single rejection for callers that only need pass/fail.

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::client::Backend;
use crate::error::BackendError;
use crate::models::{
    ArtistNameUpdate, AvatarUpdate, BioUpdate, LinkUpdate, ProfileUpdate, SavePixRequest,
    SocialLink,
};
use crate::session::{enrich, SessionToken};

/// Maximum bio length accepted by the settings form.
pub const BIO_MAX_CHARS: usize = 300;

/// One independently updatable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingsField {
    Profile,
    ArtistName,
    Bio,
    Avatar,
    Link(SocialLink),
    Pix,
}

impl SettingsField {
    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Profile => "Dados da conta",
            SettingsField::ArtistName => "Nome artístico",
            SettingsField::Bio => "Bio",
            SettingsField::Avatar => "Avatar",
            SettingsField::Link(link) => link.label(),
            SettingsField::Pix => "Chave PIX",
        }
    }
}

/// A single backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Profile(ProfileUpdate),
    ArtistName(String),
    Bio(String),
    Avatar(String),
    Link(SocialLink, String),
    Pix(SavePixRequest),
}

impl FieldUpdate {
    pub fn field(&self) -> SettingsField {
        match self {
            FieldUpdate::Profile(_) => SettingsField::Profile,
            FieldUpdate::ArtistName(_) => SettingsField::ArtistName,
            FieldUpdate::Bio(_) => SettingsField::Bio,
            FieldUpdate::Avatar(_) => SettingsField::Avatar,
            FieldUpdate::Link(link, _) => SettingsField::Link(*link),
            FieldUpdate::Pix(_) => SettingsField::Pix,
        }
    }
}

/// Edited values from the settings screen. Blank fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub profile: Option<ProfileUpdate>,
    pub artist_name: Option<String>,
    pub bio: Option<String>,
    pub instagram: Option<String>,
    pub spotify: Option<String>,
    pub youtube: Option<String>,
    pub pix_key: Option<String>,
    pub pix_name: Option<String>,
    pub pix_city: Option<String>,
}

fn filled(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl SettingsUpdate {
    /// One request per filled field, in a stable order. PIX is only sent when
    /// key, name and city are all present.
    pub fn requests(&self) -> Vec<FieldUpdate> {
        let mut requests = Vec::new();

        if let Some(profile) = &self.profile {
            requests.push(FieldUpdate::Profile(profile.clone()));
        }
        if let Some(name) = filled(&self.artist_name) {
            requests.push(FieldUpdate::ArtistName(name));
        }
        if let Some(bio) = filled(&self.bio) {
            requests.push(FieldUpdate::Bio(bio));
        }
        for (link, value) in [
            (SocialLink::Instagram, &self.instagram),
            (SocialLink::Spotify, &self.spotify),
            (SocialLink::YouTube, &self.youtube),
        ] {
            if let Some(url) = filled(value) {
                requests.push(FieldUpdate::Link(link, url));
            }
        }
        if let (Some(pix_key), Some(pix_name), Some(pix_city)) =
            (filled(&self.pix_key), filled(&self.pix_name), filled(&self.pix_city))
        {
            requests.push(FieldUpdate::Pix(SavePixRequest {
                pix_key,
                pix_name,
                pix_city,
            }));
        }

        requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests().is_empty()
    }

    /// Check limits that the backend would reject anyway, and PIX triples
    /// that are only partly filled.
    pub fn validate(&self) -> Result<(), BackendError> {
        let pix = [&self.pix_key, &self.pix_name, &self.pix_city];
        let pix_filled = pix.iter().filter(|v| filled(v).is_some()).count();
        if pix_filled > 0 && pix_filled < pix.len() {
            return Err(BackendError::Invalid(
                "Preencha chave PIX, nome completo e cidade para salvar o PIX".to_string(),
            ));
        }
        if let Some(bio) = &self.bio {
            if bio.chars().count() > BIO_MAX_CHARS {
                return Err(BackendError::Invalid(format!(
                    "A bio deve ter no máximo {} caracteres",
                    BIO_MAX_CHARS
                )));
            }
        }
        if let Some(profile) = &self.profile {
            if profile.password.is_empty() {
                return Err(BackendError::Invalid(
                    "Informe sua senha atual para alterar os dados da conta".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Result of one request inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOutcome {
    pub field: SettingsField,
    pub result: Result<(), BackendError>,
}

/// Client-safe projection of a [`FieldOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub field: SettingsField,
    pub error: Option<String>,
}

impl FieldReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a settings batch, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<FieldOutcome>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = SettingsField> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.field)
    }

    /// First failure in request order, or `Ok` when every request succeeded.
    pub fn into_result(self) -> Result<(), BackendError> {
        self.outcomes
            .into_iter()
            .find_map(|o| o.result.err())
            .map_or(Ok(()), Err)
    }

    pub fn reports(&self) -> Vec<FieldReport> {
        self.outcomes
            .iter()
            .map(|o| FieldReport {
                field: o.field,
                error: o.result.as_ref().err().map(|e| e.to_string()),
            })
            .collect()
    }
}

/// Send one settings request.
pub async fn apply_one<B: Backend>(
    backend: &B,
    token: &str,
    update: &FieldUpdate,
) -> Result<(), BackendError> {
    if token.is_empty() {
        return Err(BackendError::Unauthenticated);
    }

    match update {
        FieldUpdate::Profile(profile) => backend.update_profile(token, profile).await,
        FieldUpdate::ArtistName(artist_name) => {
            let body = ArtistNameUpdate {
                artist_name: artist_name.clone(),
            };
            backend.update_artist_name(token, &body).await
        }
        FieldUpdate::Bio(bio) => backend.update_bio(token, &BioUpdate { bio: bio.clone() }).await,
        FieldUpdate::Avatar(avatar_url) => {
            let body = AvatarUpdate {
                avatar_url: avatar_url.clone(),
            };
            backend.update_avatar(token, &body).await
        }
        FieldUpdate::Link(link, url) => {
            backend
                .update_link(token, *link, &LinkUpdate { link: url.clone() })
                .await
        }
        FieldUpdate::Pix(pix) => backend.save_pix(token, pix).await,
    }
}

/// Fire every filled field concurrently and wait for all of them.
pub async fn apply_all<B: Backend>(backend: &B, token: &str, update: &SettingsUpdate) -> BatchReport {
    let requests = update.requests();
    let results = join_all(requests.iter().map(|r| apply_one(backend, token, r))).await;

    let outcomes: Vec<FieldOutcome> = requests
        .iter()
        .zip(results)
        .map(|(request, result)| {
            if let Err(e) = &result {
                tracing::error!(field = ?request.field(), "Settings update failed: {}", e);
            }
            FieldOutcome {
                field: request.field(),
                result,
            }
        })
        .collect();

    BatchReport { outcomes }
}

/// Apply `update` with the session's token, then refresh the cached profile
/// if at least one field landed. Returns the report and whether the session
/// was refreshed.
pub async fn apply_to_session<B: Backend>(
    backend: &B,
    session: &mut SessionToken,
    update: &SettingsUpdate,
) -> (BatchReport, bool) {
    let report = apply_all(backend, &session.access_token, update).await;
    let refreshed = report.succeeded().next().is_some() && enrich(backend, session).await;
    (report, refreshed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Endpoint, MemoryBackend};
    use crate::session::sign_in;

    async fn signed_in() -> (MemoryBackend, String, String) {
        let backend = MemoryBackend::new();
        let id = backend.add_account("lua", "lua@tipme.dev", "segredo123");
        let session = sign_in(&backend, "lua@tipme.dev", "segredo123").await.unwrap();
        (backend, id, session.access_token)
    }

    #[test]
    fn test_blank_fields_produce_no_requests() {
        let update = SettingsUpdate {
            artist_name: Some("   ".into()),
            bio: Some(String::new()),
            ..Default::default()
        };
        assert!(update.is_empty());
    }

    #[test]
    fn test_pix_needs_all_three_fields() {
        let mut update = SettingsUpdate {
            pix_key: Some("lua@tipme.dev".into()),
            pix_name: Some("Luana Silva".into()),
            ..Default::default()
        };
        assert!(update.requests().is_empty());
        assert!(matches!(update.validate(), Err(BackendError::Invalid(_))));

        update.pix_city = Some("Recife".into());
        assert!(update.validate().is_ok());
        assert_eq!(update.requests().len(), 1);
        assert_eq!(update.requests()[0].field(), SettingsField::Pix);
    }

    #[test]
    fn test_bio_limit() {
        let update = SettingsUpdate {
            bio: Some("a".repeat(BIO_MAX_CHARS + 1)),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(BackendError::Invalid(_))));

        let update = SettingsUpdate {
            bio: Some("ç".repeat(BIO_MAX_CHARS)),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[tokio::test]
    async fn test_batch_applies_every_field() {
        let (backend, id, token) = signed_in().await;
        let update = SettingsUpdate {
            artist_name: Some("Lua Nova".into()),
            bio: Some("Synthpop independente".into()),
            spotify: Some("https://open.spotify.com/artist/lua".into()),
            ..Default::default()
        };

        let report = apply_all(&backend, &token, &update).await;
        assert!(report.is_success());
        assert_eq!(report.outcomes.len(), 3);

        let profile = backend.account(&id).unwrap();
        assert_eq!(profile.artist_name.as_deref(), Some("Lua Nova"));
        assert_eq!(profile.bio.as_deref(), Some("Synthpop independente"));
        assert_eq!(profile.links[1].as_deref(), Some("https://open.spotify.com/artist/lua"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_effects() {
        let (backend, id, token) = signed_in().await;
        backend.fail(Endpoint::Field(SettingsField::Bio));

        let update = SettingsUpdate {
            artist_name: Some("Lua Nova".into()),
            bio: Some("nunca chega".into()),
            instagram: Some("https://instagram.com/lua".into()),
            ..Default::default()
        };
        let report = apply_all(&backend, &token, &update).await;

        assert!(!report.is_success());
        let succeeded: Vec<SettingsField> = report.succeeded().collect();
        assert_eq!(
            succeeded,
            vec![SettingsField::ArtistName, SettingsField::Link(SocialLink::Instagram)]
        );
        let reports = report.reports();
        assert!(reports.iter().any(|r| r.field == SettingsField::Bio && !r.is_success()));

        // the caller sees one rejection ...
        assert!(report.into_result().is_err());

        // ... while the other updates already landed
        let account = backend.account(&id).unwrap();
        assert_eq!(account.artist_name.as_deref(), Some("Lua Nova"));
        assert_eq!(account.bio, None);
        assert_eq!(account.links[0].as_deref(), Some("https://instagram.com/lua"));
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected_locally() {
        let (backend, _, _) = signed_in().await;
        let before = backend.requests().len();
        let result = apply_one(&backend, "", &FieldUpdate::Bio("x".into())).await;
        assert_eq!(result, Err(BackendError::Unauthenticated));
        assert_eq!(backend.requests().len(), before);
    }

    #[tokio::test]
    async fn test_profile_update_requires_current_password() {
        let (backend, id, token) = signed_in().await;

        let wrong = FieldUpdate::Profile(ProfileUpdate {
            user_name: Some("luana".into()),
            password: "errada".into(),
            ..Default::default()
        });
        let err = apply_one(&backend, &token, &wrong).await.unwrap_err();
        assert_eq!(err.status(), Some(401));

        let right = FieldUpdate::Profile(ProfileUpdate {
            user_name: Some("luana".into()),
            password: "segredo123".into(),
            ..Default::default()
        });
        apply_one(&backend, &token, &right).await.unwrap();
        assert_eq!(backend.account(&id).unwrap().user_name, "luana");
    }

    #[tokio::test]
    async fn test_session_refreshes_only_after_a_saved_field() {
        let backend = MemoryBackend::new();
        let id = backend.add_account("lua", "lua@tipme.dev", "segredo123");
        let mut session = sign_in(&backend, "lua@tipme.dev", "segredo123").await.unwrap();
        let fetches = |backend: &MemoryBackend| {
            backend
                .requests()
                .iter()
                .filter(|r| r.as_str() == "GET /users/all-info")
                .count()
        };

        backend.fail(Endpoint::Field(SettingsField::Bio));
        let update = SettingsUpdate {
            bio: Some("nunca chega".into()),
            ..Default::default()
        };
        let before = fetches(&backend);
        let (report, refreshed) = apply_to_session(&backend, &mut session, &update).await;
        assert!(!report.is_success());
        assert!(!refreshed);
        assert_eq!(fetches(&backend), before);

        let update = SettingsUpdate {
            artist_name: Some("Lua Nova".into()),
            bio: Some("nunca chega".into()),
            ..Default::default()
        };
        let (report, refreshed) = apply_to_session(&backend, &mut session, &update).await;
        assert_eq!(report.succeeded().collect::<Vec<_>>(), vec![SettingsField::ArtistName]);
        assert!(refreshed);
        assert_eq!(fetches(&backend), before + 1);
        assert_eq!(session.user.artist_name.as_deref(), Some("Lua Nova"));
        assert_eq!(backend.account(&id).unwrap().bio, None);
    }
}
